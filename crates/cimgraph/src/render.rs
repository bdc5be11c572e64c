//! Text renderings of schemas and profiles.
//!
//! The schema is rendered in Dgraph's alteration syntax:
//!
//! ```text
//! <A.p1>: string .
//! <rdf.about>: string .
//! type <B> {
//!   A.p1
//!   rdf.about
//! }
//! ```
//!
//! The same text is written to the schema dump and sent to the store. The
//! profile audit lists every class with its flattened properties.

use std::{
    fmt::Write as _,
    fs,
    path::Path,
};

use log::info;

use cimgraph_core::{
    profile::CimProfile,
    schema::{Schema, SchemaNode, SchemaPredicate},
};

/// Render one predicate declaration, without trailing newline.
pub fn render_predicate(predicate: &SchemaPredicate) -> String {
    let index = if predicate.is_indexed() {
        " @index(exact)"
    } else {
        ""
    };
    format!("<{}>: {}{index} .", predicate.name(), predicate.type_())
}

/// Render one node type block, with trailing newline.
pub fn render_node(node: &SchemaNode) -> String {
    let mut block = format!("type <{}> {{\n", node.name());
    for predicate in node.predicates() {
        let _ = writeln!(block, "  {}", predicate.name());
    }
    block.push_str("}\n");
    block
}

/// Render a complete schema: every predicate, then every node type, each in
/// name order.
pub fn render_schema(schema: &Schema) -> String {
    let mut text = String::new();
    for predicate in schema.predicates() {
        text.push_str(&render_predicate(predicate));
        text.push('\n');
    }
    for node in schema.nodes() {
        text.push_str(&render_node(node));
    }
    text
}

/// Render the audit listing of a resolved profile.
pub fn render_profile(profile: &CimProfile) -> String {
    let mut text = String::new();
    for class in &profile.classes {
        let _ = writeln!(text, "Class: {}", class.name);
        for property in &class.properties {
            let _ = writeln!(
                text,
                ".  Property: {} Type: {} Upper {}",
                property.name, property.type_, property.upper
            );
        }
    }
    text
}

/// Write rendered text to `path`, creating missing parent directories.
pub(crate) fn write_dump(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = path.display().to_string(), bytes = contents.len(); "Dump written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cimgraph_core::{
        profile::{CimClass, CimProperty, PropertyType},
        schema::{PredicateType, ScalarType},
    };

    fn identity() -> SchemaPredicate {
        SchemaPredicate::new("rdf.about", PredicateType::scalar(ScalarType::String))
    }

    #[test]
    fn test_render_predicate() {
        let list = SchemaPredicate::new("Terminal.phases", PredicateType::list(ScalarType::Int));
        assert_eq!(render_predicate(&list), "<Terminal.phases>: [int] .");
        assert_eq!(
            render_predicate(&identity().with_index(true)),
            "<rdf.about>: string @index(exact) ."
        );
    }

    #[test]
    fn test_render_schema_orders_predicates_then_nodes() {
        let mut schema = Schema::new(identity());
        for (node, name, scalar) in [
            ("B", "B.p3", ScalarType::Bool),
            ("B", "A.p1", ScalarType::String),
            ("A", "A.p1", ScalarType::String),
        ] {
            let predicate = SchemaPredicate::new(name, PredicateType::scalar(scalar));
            let registered = schema.register_predicate(predicate).clone();
            schema.node_entry(node).add_predicate(registered);
        }

        let expected = "\
<A.p1>: string .
<B.p3>: bool .
<rdf.about>: string .
type <A> {
  A.p1
  rdf.about
}
type <B> {
  A.p1
  B.p3
  rdf.about
}
";
        assert_eq!(render_schema(&schema), expected);
    }

    #[test]
    fn test_render_profile() {
        let mut class = CimClass::new("B", "B");
        let mut p3 = CimProperty::new("B.p3", "T_BOOL").with_bounds("0", "1");
        p3.type_ = PropertyType::Class("Boolean".into());
        let mut p1 = CimProperty::new("A.p1", "T_STRING").with_bounds("0", "*");
        p1.type_ = PropertyType::Class("String".into());
        class.properties = vec![p3, p1];
        let profile = CimProfile {
            classes: vec![class, CimClass::new("Empty", "E")],
        };

        let expected = "\
Class: B
.  Property: B.p3 Type: Boolean Upper 1
.  Property: A.p1 Type: String Upper *
Class: Empty
";
        assert_eq!(render_profile(&profile), expected);
    }

    #[test]
    fn test_write_dump_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("schema.txt");

        write_dump(&path, "<a>: int .\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<a>: int .\n");
    }
}
