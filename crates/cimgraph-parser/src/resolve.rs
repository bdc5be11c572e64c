//! Inheritance flattening and property type resolution.
//!
//! Both stages run after indexing and read the [`ModelIndex`] only.
//!
//! Flattening follows a single-parent chain: the class's first generalization,
//! then the parent's generalization as long as the parent declares exactly one.
//! A parent with zero generalizations is a root; a parent with several ends the
//! chain. Additional generalizations of the class itself are kept in
//! `inherits_from` but not followed.
//!
//! Type resolution tries the class index first and the enumeration index
//! second. Anything else is unresolved and later treated as an opaque object
//! reference.

use std::collections::HashSet;

use log::{debug, warn};

use cimgraph_core::profile::{CimClass, CimInheritance, CimProfile, PropertyType, ResolvePolicy};

use crate::{
    error::{ParseError, Result},
    index::ModelIndex,
};

/// Flatten generalizations, then resolve property types.
pub fn resolve(profile: &mut CimProfile, index: &ModelIndex, policy: ResolvePolicy) -> Result<()> {
    flatten_generalizations(profile, index, policy)?;
    resolve_property_types(profile, index, policy)
}

/// Copy inherited properties into every class of the profile.
///
/// Each ancestor's own properties are appended after the class's properties,
/// nearest parent first, in declaration order.
///
/// # Errors
///
/// Under [`ResolvePolicy::Strict`], returns [`ParseError::UnknownParent`] when a
/// followed generalization targets an unknown class and
/// [`ParseError::InheritanceCycle`] when the chain revisits a class. Under
/// [`ResolvePolicy::Lenient`] both end the chain with a warning.
pub fn flatten_generalizations(
    profile: &mut CimProfile,
    index: &ModelIndex,
    policy: ResolvePolicy,
) -> Result<()> {
    for class in &mut profile.classes {
        let Some(first) = class.inherits_from.first() else {
            continue;
        };

        let ancestors = ancestor_chain(class, &first.id, index, policy)?;

        for ancestor in &ancestors {
            if let Some(reference) = class
                .inherits_from
                .iter_mut()
                .find(|reference| reference.id == ancestor.id)
            {
                reference.name = ancestor.name.clone();
            }
            if let Some(parent) = index.class(&ancestor.id) {
                class
                    .properties
                    .extend(parent.properties.iter().map(|p| p.inherited()));
            }
        }

        debug!(
            class = class.name,
            depth = ancestors.len(),
            properties = class.properties.len();
            "Flattened generalizations"
        );
        class.ancestors = ancestors;
    }

    Ok(())
}

/// Walk the single-parent chain starting at `first`, nearest parent first.
fn ancestor_chain(
    class: &CimClass,
    first: &str,
    index: &ModelIndex,
    policy: ResolvePolicy,
) -> Result<Vec<CimInheritance>> {
    let mut chain = Vec::new();
    let mut visited: HashSet<&str> = HashSet::from([class.id.as_str()]);
    let mut next = Some(first);

    while let Some(id) = next {
        if !visited.insert(id) {
            if policy.is_strict() {
                return Err(ParseError::InheritanceCycle {
                    class: class.name.clone(),
                    id: id.to_string(),
                });
            }
            warn!(class = class.name, id = id; "Inheritance cycle, chain not followed further");
            break;
        }

        let Some(parent) = index.class(id) else {
            if policy.is_strict() {
                return Err(ParseError::UnknownParent {
                    class: class.name.clone(),
                    id: id.to_string(),
                });
            }
            warn!(class = class.name, id = id; "Generalization targets unknown class");
            break;
        };

        chain.push(CimInheritance {
            id: id.to_string(),
            name: parent.name.clone(),
        });

        next = match parent.inherits_from.as_slice() {
            [only] => Some(only.id.as_str()),
            _ => None,
        };
    }

    Ok(chain)
}

/// Resolve the type of every property of the profile.
///
/// # Errors
///
/// Under [`ResolvePolicy::Strict`], returns [`ParseError::UnresolvedType`] for a
/// property whose non-empty object identifier is neither a class nor an
/// enumeration.
pub fn resolve_property_types(
    profile: &mut CimProfile,
    index: &ModelIndex,
    policy: ResolvePolicy,
) -> Result<()> {
    for class in &mut profile.classes {
        for property in &mut class.properties {
            property.type_ = resolve_type(&property.object, index);

            if let PropertyType::Unresolved(object) = &property.type_ {
                if policy.is_strict() && !object.is_empty() {
                    return Err(ParseError::UnresolvedType {
                        property: property.name.clone(),
                        object: object.clone(),
                    });
                }
                debug!(property = property.name, object = object; "Unresolved type, treated as object reference");
            }
        }
    }

    Ok(())
}

fn resolve_type(object: &str, index: &ModelIndex) -> PropertyType {
    if let Some(class) = index.class(object) {
        return PropertyType::Class(class.name.clone());
    }
    if let Some(enumeration) = index.enumeration(object) {
        return PropertyType::Enumeration(enumeration.name.clone());
    }
    PropertyType::Unresolved(object.to_string())
}
