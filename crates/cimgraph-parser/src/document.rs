//! Raw XMI element tree.
//!
//! Mirrors the parts of a UML XMI export that matter for profile extraction:
//! models hold packages, packages hold nested package elements, and so on
//! recursively. Every node owns its children. The tree is produced by
//! [`read_document`](crate::read_document) and consumed once by
//! [`build_index`](crate::build_index).

/// `xmi:type` of a class element.
pub const UML_CLASS: &str = "uml:Class";

/// `xmi:type` of an enumeration element.
pub const UML_ENUMERATION: &str = "uml:Enumeration";

/// `xmi:type` of a plain class attribute.
pub const UML_PROPERTY: &str = "uml:Property";

/// The root `XMI` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub models: Vec<ModelNode>,
}

/// A `Model` element directly below the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelNode {
    pub kind: String,
    pub name: String,
    /// Top-level `packagedElement`s of the model.
    pub packages: Vec<PackageElement>,
}

/// A `packagedElement`: a package, class, enumeration or anything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageElement {
    pub id: String,
    pub name: String,
    /// The `xmi:type` tag, e.g. `uml:Class`.
    pub kind: String,
    pub is_abstract: bool,
    pub elements: Vec<PackageElement>,
    pub attributes: Vec<Attribute>,
    pub generalizations: Vec<Generalization>,
    pub literals: Vec<Literal>,
}

impl PackageElement {
    /// Creates an element with the given type tag, name and identifier.
    pub fn new(kind: impl Into<String>, name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind == UML_CLASS
    }

    pub fn is_enumeration(&self) -> bool {
        self.kind == UML_ENUMERATION
    }
}

/// An `ownedAttribute` of a class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: String,
    /// Identifier of the attribute's type, from a nested `type` reference.
    pub type_ref: String,
    /// `lowerValue/@value`.
    pub lower: String,
    /// `upperValue/@value`.
    pub upper: String,
}

impl Attribute {
    pub fn is_property(&self) -> bool {
        self.kind == UML_PROPERTY
    }
}

/// A `generalization` of a class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generalization {
    pub kind: String,
    /// Identifier of the parent class.
    pub general: String,
}

/// An `ownedLiteral` of an enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Literal {
    pub id: String,
    pub name: String,
}
