//! Schema derivation from a resolved profile.
//!
//! Every class with more than one property becomes a node type holding the
//! identity predicate and one predicate per property. Predicates are registered
//! globally by name; the first registration fixes the type of a name and nodes
//! reference the global predicate.

use log::{debug, trace};

use cimgraph_core::{
    profile::{CimProfile, CimProperty, PropertyType},
    schema::{PredicateType, ScalarType, Schema, SchemaPredicate},
};

use crate::config::SchemaConfig;

/// Derive the graph schema of a resolved profile.
pub fn derive_schema(profile: &CimProfile, config: &SchemaConfig) -> Schema {
    let identity = SchemaPredicate::new(
        config.identity_predicate(),
        PredicateType::scalar(ScalarType::String),
    )
    .with_index(config.index_identity());
    let mut schema = Schema::new(identity);

    for class in &profile.classes {
        if class.properties.len() <= 1 {
            trace!(class = class.name, properties = class.properties.len(); "Class skipped");
            continue;
        }

        for property in &class.properties {
            let registered = schema.register_predicate(predicate_for(property)).clone();
            schema.node_entry(&class.name).add_predicate(registered);
        }
    }

    debug!(
        predicates = schema.predicate_count(),
        nodes = schema.node_count();
        "Schema derived"
    );
    schema
}

/// Map a property to its predicate: the primitive table for the scalar, list
/// wrapping for an unbounded upper bound.
///
/// Only resolved class and enumeration names go through the table. An
/// unresolved reference is a `uid` even when its raw identifier spells a
/// primitive name.
fn predicate_for(property: &CimProperty) -> SchemaPredicate {
    let scalar = match &property.type_ {
        PropertyType::Class(name) | PropertyType::Enumeration(name) => {
            ScalarType::from_type_name(name)
        }
        PropertyType::Unresolved(_) | PropertyType::Pending => ScalarType::Uid,
    };
    let type_ = if property.is_many() {
        PredicateType::list(scalar)
    } else {
        PredicateType::scalar(scalar)
    };
    SchemaPredicate::new(&property.name, type_)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cimgraph_core::profile::CimClass;

    fn property(name: &str, type_: PropertyType, upper: &str) -> CimProperty {
        let mut property = CimProperty::new(name, "").with_bounds("0", upper);
        property.type_ = type_;
        property
    }

    fn class(name: &str, properties: Vec<CimProperty>) -> CimClass {
        let mut class = CimClass::new(name, name);
        class.properties = properties;
        class
    }

    fn string() -> PropertyType {
        PropertyType::Class("String".to_string())
    }

    #[test]
    fn test_flattened_class_becomes_node() {
        let profile = CimProfile {
            classes: vec![class(
                "B",
                vec![
                    property("B.p3", PropertyType::Class("Boolean".into()), "1"),
                    property("A.p1", string(), "1"),
                    property("A.p2", PropertyType::Class("Integer".into()), "1"),
                ],
            )],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        let node = schema.node("B").unwrap();
        let names: Vec<_> = node.predicates().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A.p1", "A.p2", "B.p3", "rdf.about"]);
        assert_eq!(schema.predicate("A.p1").unwrap().type_().to_string(), "string");
        assert_eq!(schema.predicate("A.p2").unwrap().type_().to_string(), "int");
        assert_eq!(schema.predicate("B.p3").unwrap().type_().to_string(), "bool");
    }

    #[test]
    fn test_single_property_class_is_skipped() {
        let profile = CimProfile {
            classes: vec![
                class("One", vec![property("One.a", string(), "1")]),
                class(
                    "Two",
                    vec![property("Two.a", string(), "1"), property("Two.b", string(), "1")],
                ),
                class("Empty", vec![]),
            ],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        assert!(schema.node("One").is_none());
        assert!(schema.node("Empty").is_none());
        assert_eq!(schema.node("Two").unwrap().len(), 3);
        assert!(schema.predicate("One.a").is_none());
    }

    #[test]
    fn test_unbounded_and_reference_types() {
        let profile = CimProfile {
            classes: vec![class(
                "Terminal",
                vec![
                    property("Terminal.phases", PropertyType::Enumeration("PhaseCode".into()), "1"),
                    property("Terminal.readings", PropertyType::Class("Float".into()), "*"),
                    property("Terminal.equipment", PropertyType::Unresolved("EAID_1".into()), "*"),
                    property("Terminal.note", PropertyType::Unresolved(String::new()), "1"),
                ],
            )],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        let type_of = |name: &str| schema.predicate(name).unwrap().type_().to_string();
        assert_eq!(type_of("Terminal.phases"), "uid");
        assert_eq!(type_of("Terminal.readings"), "[float]");
        assert_eq!(type_of("Terminal.equipment"), "[uid]");
        assert_eq!(type_of("Terminal.note"), "uid");
    }

    #[test]
    fn test_unresolved_primitive_names_are_references() {
        let profile = CimProfile {
            classes: vec![class(
                "Meter",
                vec![
                    property("Meter.serial", PropertyType::Unresolved("String".into()), "1"),
                    property("Meter.count", PropertyType::Unresolved("Integer".into()), "1"),
                    property("Meter.readings", PropertyType::Unresolved("Date".into()), "*"),
                    property("Meter.pending", PropertyType::Pending, "1"),
                ],
            )],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        let type_of = |name: &str| schema.predicate(name).unwrap().type_();
        assert_eq!(type_of("Meter.serial"), PredicateType::scalar(ScalarType::Uid));
        assert_eq!(type_of("Meter.count"), PredicateType::scalar(ScalarType::Uid));
        assert_eq!(type_of("Meter.pending"), PredicateType::scalar(ScalarType::Uid));

        let readings = type_of("Meter.readings");
        assert!(readings.is_list());
        assert_eq!(readings.scalar_type(), ScalarType::Uid);
        assert_eq!(readings.to_string(), "[uid]");
    }

    #[test]
    fn test_first_registration_wins() {
        let profile = CimProfile {
            classes: vec![
                class(
                    "First",
                    vec![property("Shared.x", string(), "1"), property("First.y", string(), "1")],
                ),
                class(
                    "Second",
                    vec![
                        property("Shared.x", PropertyType::Class("Integer".into()), "*"),
                        property("Second.y", string(), "1"),
                    ],
                ),
            ],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        assert_eq!(schema.predicate("Shared.x").unwrap().type_().to_string(), "string");
        let in_node = schema.node("Second").unwrap().predicate("Shared.x").unwrap();
        assert_eq!(in_node.type_().to_string(), "string");
    }

    #[test]
    fn test_identity_in_every_node_and_configurable() {
        let profile = CimProfile {
            classes: vec![
                class("A", vec![property("A.a", string(), "1"), property("A.b", string(), "1")]),
                class("B", vec![property("B.a", string(), "1"), property("B.b", string(), "1")]),
            ],
        };
        let config = SchemaConfig::new("cim.mRID", true);

        let schema = derive_schema(&profile, &config);

        assert!(schema.nodes().all(|node| node.predicate("cim.mRID").is_some()));
        assert_eq!(schema.identity().name(), "cim.mRID");
        assert!(schema.identity().is_indexed());
        assert!(schema.predicate("rdf.about").is_none());
    }

    #[test]
    fn test_same_class_name_merges() {
        let profile = CimProfile {
            classes: vec![
                class("Dup", vec![property("Dup.a", string(), "1"), property("Dup.b", string(), "1")]),
                class("Dup", vec![property("Dup.c", string(), "1"), property("Dup.a", string(), "1")]),
            ],
        };

        let schema = derive_schema(&profile, &SchemaConfig::default());

        assert_eq!(schema.node_count(), 1);
        assert_eq!(schema.node("Dup").unwrap().len(), 4);
    }
}
