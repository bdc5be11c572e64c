//! Class and enumeration indexing.
//!
//! A single depth-first, pre-order walk over the package elements of every
//! model collects class and enumeration definitions. Classes are registered in
//! the index whether abstract or not, but only concrete classes become part of
//! the profile. The walk recurses into every element, so classes nested inside
//! classes or unnamed packages are found as well.

use indexmap::IndexMap;
use log::{trace, warn};

use cimgraph_core::profile::{CimClass, CimEnum, CimInheritance, CimProfile};

use crate::document::{Document, PackageElement};

/// Lookup tables of the classes and enumerations of a document, keyed by identifier.
///
/// Built once by [`build_index`] and read-only afterwards. Entries keep the
/// shape they had in the document: indexed classes are never flattened.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    classes: IndexMap<String, CimClass>,
    enums: IndexMap<String, CimEnum>,
}

impl ModelIndex {
    /// Looks up a class by identifier.
    pub fn class(&self, id: &str) -> Option<&CimClass> {
        self.classes.get(id)
    }

    /// Looks up an enumeration by identifier.
    pub fn enumeration(&self, id: &str) -> Option<&CimEnum> {
        self.enums.get(id)
    }

    /// Returns all indexed classes, in document order.
    pub fn classes(&self) -> impl Iterator<Item = &CimClass> {
        self.classes.values()
    }

    /// Returns all indexed enumerations, in document order.
    pub fn enumerations(&self) -> impl Iterator<Item = &CimEnum> {
        self.enums.values()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Registers a class; a class with the same identifier is replaced.
    pub fn insert_class(&mut self, class: CimClass) {
        if let Some(previous) = self.classes.insert(class.id.clone(), class) {
            warn!(id = previous.id, replaced = previous.name; "Duplicate class identifier");
        }
    }

    /// Registers an enumeration; an enumeration with the same identifier is replaced.
    pub fn insert_enum(&mut self, enumeration: CimEnum) {
        if let Some(previous) = self.enums.insert(enumeration.id.clone(), enumeration) {
            warn!(id = previous.id, replaced = previous.name; "Duplicate enumeration identifier");
        }
    }
}

/// Walk a document and collect its classes and enumerations.
///
/// The top-level package of each model is a container only; the walk starts at
/// its elements.
///
/// # Returns
///
/// A tuple containing:
/// - The unflattened [`CimProfile`] of all concrete, named classes
/// - The [`ModelIndex`] of all named classes and enumerations
pub fn build_index(document: &Document) -> (CimProfile, ModelIndex) {
    let mut profile = CimProfile::default();
    let mut index = ModelIndex::default();

    for model in &document.models {
        for package in &model.packages {
            for element in &package.elements {
                visit(element, &mut profile, &mut index);
            }
        }
    }

    (profile, index)
}

fn visit(element: &PackageElement, profile: &mut CimProfile, index: &mut ModelIndex) {
    if element.is_class() && !element.name.is_empty() {
        let class = class_from_element(element);
        trace!(
            class = class.name,
            properties = class.properties.len(),
            is_abstract = element.is_abstract;
            "Indexed class"
        );
        if !element.is_abstract {
            profile.classes.push(class.clone());
        }
        index.insert_class(class);
    }

    if element.is_enumeration() && !element.name.is_empty() {
        let mut enumeration = CimEnum::new(&element.name, &element.id);
        for literal in &element.literals {
            enumeration.add_literal(&literal.id, &literal.name);
        }
        trace!(enumeration = enumeration.name, literals = enumeration.literals.len(); "Indexed enumeration");
        index.insert_enum(enumeration);
    }

    for child in &element.elements {
        visit(child, profile, index);
    }
}

fn class_from_element(element: &PackageElement) -> CimClass {
    let mut class = CimClass::new(&element.name, &element.id);

    for attribute in element.attributes.iter().filter(|a| a.is_property()) {
        class.add_attribute(
            &attribute.name,
            &attribute.type_ref,
            &attribute.lower,
            &attribute.upper,
        );
    }

    class.inherits_from = element
        .generalizations
        .iter()
        .filter(|g| !g.general.is_empty())
        .map(|g| CimInheritance::new(&g.general))
        .collect();

    class
}
