//! CIM profile model.
//!
//! A [`CimProfile`] is the domain model extracted from a UML export: the concrete
//! classes with their (eventually flattened) properties. Classes refer to their
//! parents and property types through document identifiers, which are resolved
//! against the class and enumeration indices built by the parser.
//!
//! # Overview
//!
//! - [`CimClass`] - A class with its own and inherited properties.
//! - [`CimProperty`] - A qualified attribute with cardinality bounds and a [`PropertyType`].
//! - [`CimEnum`] - An enumeration and its literals.
//! - [`ResolvePolicy`] - How missing references are treated during resolution.

use std::fmt;

use serde::Deserialize;

/// Upper bound literal meaning "unbounded".
pub const UNBOUNDED: &str = "*";

/// The concrete classes of a parsed model, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CimProfile {
    pub classes: Vec<CimClass>,
}

impl CimProfile {
    /// Finds a class by name.
    pub fn class(&self, name: &str) -> Option<&CimClass> {
        self.classes.iter().find(|class| class.name == name)
    }
}

/// A reference from a class to one of its parents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CimInheritance {
    /// Identifier of the parent class.
    pub id: String,
    /// Name of the parent class, filled in once the reference is resolved.
    pub name: String,
}

impl CimInheritance {
    /// Creates an unresolved reference to the class with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }
}

/// A UML class of the profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CimClass {
    pub name: String,
    pub id: String,

    /// Generalizations as declared on the class, in declaration order.
    pub inherits_from: Vec<CimInheritance>,

    /// The followed inheritance chain, nearest parent first.
    ///
    /// Empty until generalizations are flattened.
    pub ancestors: Vec<CimInheritance>,

    /// Own properties in declaration order, followed by inherited ones.
    pub properties: Vec<CimProperty>,
}

impl CimClass {
    /// Creates a class without properties or generalizations.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    /// Appends an attribute of this class, qualifying its name as `Class.attribute`.
    pub fn add_attribute(
        &mut self,
        attribute: &str,
        object: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
    ) {
        let property = CimProperty::new(format!("{}.{attribute}", self.name), object)
            .with_bounds(lower, upper);
        self.properties.push(property);
    }

    /// Returns the property names in order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Resolution state of a property's type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PropertyType {
    /// Not yet resolved.
    #[default]
    Pending,
    /// The referenced object is a class; holds the class name.
    Class(String),
    /// The referenced object is an enumeration; holds the enumeration name.
    Enumeration(String),
    /// Neither index knows the referenced object; holds the raw identifier.
    ///
    /// Such properties are treated as opaque object references.
    Unresolved(String),
}

impl PropertyType {
    /// Returns the resolved type name.
    ///
    /// For [`PropertyType::Unresolved`] this is the raw object identifier, which
    /// may be empty. [`PropertyType::Pending`] has no name.
    pub fn name(&self) -> &str {
        match self {
            PropertyType::Pending => "",
            PropertyType::Class(name)
            | PropertyType::Enumeration(name)
            | PropertyType::Unresolved(name) => name,
        }
    }

    /// Returns `true` once resolution has run for this property.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, PropertyType::Pending)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attribute of a class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CimProperty {
    /// Qualified name, `Class.attribute`, using the declaring class.
    pub name: String,
    /// Identifier of the referenced class, enumeration or primitive.
    pub object: String,
    pub type_: PropertyType,
    /// Lower cardinality bound as written in the document.
    pub lower: String,
    /// Upper cardinality bound as written in the document; [`UNBOUNDED`] for `*`.
    pub upper: String,
}

impl CimProperty {
    /// Creates a property referencing `object`, with empty bounds and a pending type.
    pub fn new(name: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object: object.into(),
            ..Self::default()
        }
    }

    /// Sets the cardinality bounds.
    pub fn with_bounds(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.lower = lower.into();
        self.upper = upper.into();
        self
    }

    /// Returns `true` if the upper bound is unbounded.
    pub fn is_many(&self) -> bool {
        self.upper == UNBOUNDED
    }

    /// Returns a copy suitable for appending to a descendant class.
    ///
    /// The copy keeps the declaring name, object and bounds; its type is left
    /// pending so that it is resolved together with the descendant's own properties.
    pub fn inherited(&self) -> Self {
        Self {
            name: self.name.clone(),
            object: self.object.clone(),
            type_: PropertyType::Pending,
            lower: self.lower.clone(),
            upper: self.upper.clone(),
        }
    }
}

/// A literal of an enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CimEnumLiteral {
    pub id: String,
    pub name: String,
}

/// A UML enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CimEnum {
    pub id: String,
    pub name: String,
    pub literals: Vec<CimEnumLiteral>,
}

impl CimEnum {
    /// Creates an enumeration without literals.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            literals: Vec::new(),
        }
    }

    /// Appends a literal.
    pub fn add_literal(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.literals.push(CimEnumLiteral {
            id: id.into(),
            name: name.into(),
        });
    }
}

/// How the resolver treats references that cannot be looked up.
///
/// The policy applies to generalization targets, inheritance cycles and property
/// types whose object identifier is non-empty but unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvePolicy {
    /// A missing parent ends the inheritance chain and an unknown type becomes
    /// an opaque object reference.
    #[default]
    Lenient,
    /// Missing references and cycles are errors.
    Strict,
}

impl ResolvePolicy {
    /// Returns `true` for [`ResolvePolicy::Strict`].
    pub fn is_strict(&self) -> bool {
        matches!(self, ResolvePolicy::Strict)
    }
}

impl fmt::Display for ResolvePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvePolicy::Lenient => write!(f, "lenient"),
            ResolvePolicy::Strict => write!(f, "strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_attribute_qualifies_name() {
        let mut class = CimClass::new("Breaker", "C1");
        class.add_attribute("ratedCurrent", "T1", "0", "1");

        assert_eq!(class.property_names(), vec!["Breaker.ratedCurrent"]);
        assert_eq!(class.properties[0].object, "T1");
        assert_eq!(class.properties[0].type_, PropertyType::Pending);
    }

    #[test]
    fn test_property_type_names() {
        assert_eq!(PropertyType::Pending.name(), "");
        assert_eq!(PropertyType::Class("Float".into()).name(), "Float");
        assert_eq!(PropertyType::Enumeration("Color".into()).name(), "Color");
        assert_eq!(PropertyType::Unresolved("EAID_9".into()).name(), "EAID_9");
        assert!(!PropertyType::Pending.is_resolved());
        assert!(PropertyType::Unresolved(String::new()).is_resolved());
    }

    #[test]
    fn test_inherited_resets_type() {
        let mut property = CimProperty::new("A.p1", "T1").with_bounds("1", "*");
        property.type_ = PropertyType::Class("String".into());

        let copy = property.inherited();
        assert_eq!(copy.name, "A.p1");
        assert_eq!(copy.upper, "*");
        assert_eq!(copy.type_, PropertyType::Pending);
        assert!(copy.is_many());
    }

    #[test]
    fn test_profile_class_lookup() {
        let profile = CimProfile {
            classes: vec![CimClass::new("A", "1"), CimClass::new("B", "2")],
        };
        assert_eq!(profile.class("B").map(|c| c.id.as_str()), Some("2"));
        assert!(profile.class("C").is_none());
    }

    #[test]
    fn test_resolve_policy_display() {
        assert_eq!(ResolvePolicy::default(), ResolvePolicy::Lenient);
        assert_eq!(ResolvePolicy::Strict.to_string(), "strict");
        assert!(ResolvePolicy::Strict.is_strict());
    }
}
