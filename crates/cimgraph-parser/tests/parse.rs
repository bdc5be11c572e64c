use std::fs;

use tempfile::tempdir;

use cimgraph_core::profile::{PropertyType, ResolvePolicy};
use cimgraph_parser::{ErrorCode, ParseError, parse_bytes, parse_file};

const INHERITANCE: &str = r#"<?xml version="1.0" encoding="windows-1252"?>
<xmi:XMI xmi:version="2.1" xmlns:uml="http://schema.omg.org/spec/UML/2.1" xmlns:xmi="http://schema.omg.org/spec/XMI/2.1">
  <uml:Model xmi:type="uml:Model" name="EA_Model">
    <packagedElement xmi:type="uml:Package" xmi:id="P0" name="TC57CIM">
      <packagedElement xmi:type="uml:Class" xmi:id="T_STRING" name="String"/>
      <packagedElement xmi:type="uml:Class" xmi:id="T_INT" name="Integer"/>
      <packagedElement xmi:type="uml:Class" xmi:id="T_BOOL" name="Boolean"/>
      <packagedElement xmi:type="uml:Class" xmi:id="A" name="A">
        <ownedAttribute xmi:type="uml:Property" name="p1"><type xmi:idref="T_STRING"/></ownedAttribute>
        <ownedAttribute xmi:type="uml:Property" name="p2"><type xmi:idref="T_INT"/></ownedAttribute>
      </packagedElement>
      <packagedElement xmi:type="uml:Class" xmi:id="B" name="B">
        <generalization xmi:type="uml:Generalization" general="A"/>
        <ownedAttribute xmi:type="uml:Property" name="p3"><type xmi:idref="T_BOOL"/></ownedAttribute>
      </packagedElement>
    </packagedElement>
  </uml:Model>
</xmi:XMI>"#;

#[test]
fn test_inheritance_is_flattened_and_resolved() {
    let profile = parse_bytes(INHERITANCE.as_bytes(), ResolvePolicy::Lenient)
        .expect("Failed to parse");

    let names: Vec<_> = profile.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["String", "Integer", "Boolean", "A", "B"]);

    let b = profile.class("B").expect("B should be in the profile");
    assert_eq!(b.property_names(), vec!["B.p3", "A.p1", "A.p2"]);
    assert_eq!(b.properties[0].type_, PropertyType::Class("Boolean".to_string()));
    assert_eq!(b.properties[1].type_, PropertyType::Class("String".to_string()));
    assert_eq!(b.properties[2].type_, PropertyType::Class("Integer".to_string()));

    let a = profile.class("A").expect("A should be in the profile");
    assert_eq!(a.property_names(), vec!["A.p1", "A.p2"]);
}

#[test]
fn test_windows_1252_names_are_decoded() {
    let mut source = br#"<?xml version="1.0" encoding="windows-1252"?>
<xmi:XMI xmlns:xmi="http://schema.omg.org/spec/XMI/2.1" xmlns:uml="http://schema.omg.org/spec/UML/2.1">
  <uml:Model xmi:type="uml:Model" name="M">
    <packagedElement xmi:type="uml:Package" name="P">
      <packagedElement xmi:type="uml:Class" xmi:id="C1" name="Caf"#
        .to_vec();
    source.push(0xE9);
    source.extend_from_slice(
        br#""/>
    </packagedElement>
  </uml:Model>
</xmi:XMI>"#,
    );

    let profile = parse_bytes(&source, ResolvePolicy::Lenient).expect("Failed to parse");
    assert_eq!(profile.classes[0].name, "Café");
}

#[test]
fn test_utf16_declaration_is_rejected() {
    let source = r#"<?xml version="1.0" encoding="utf-16"?><xmi:XMI/>"#;

    let err = parse_bytes(source.as_bytes(), ResolvePolicy::Lenient).unwrap_err();

    assert!(matches!(err, ParseError::UnknownCharset(ref name) if name == "utf-16"));
    assert_eq!(err.code(), ErrorCode::E002);
}

#[test]
fn test_abstract_and_enum_types() {
    let source = r#"<xmi:XMI xmlns:xmi="http://schema.omg.org/spec/XMI/2.1" xmlns:uml="http://schema.omg.org/spec/UML/2.1">
  <uml:Model xmi:type="uml:Model" name="M">
    <packagedElement xmi:type="uml:Package" name="P">
      <packagedElement xmi:type="uml:Class" xmi:id="IO" name="IdentifiedObject" isAbstract="true">
        <ownedAttribute xmi:type="uml:Property" name="mRID"><type xmi:idref="T_STRING"/></ownedAttribute>
      </packagedElement>
      <packagedElement xmi:type="uml:Enumeration" xmi:id="PHASE" name="PhaseCode">
        <ownedLiteral xmi:id="L1" name="A"/>
        <ownedLiteral xmi:id="L2" name="B"/>
      </packagedElement>
      <packagedElement xmi:type="uml:Class" xmi:id="T" name="Terminal">
        <generalization xmi:type="uml:Generalization" general="IO"/>
        <ownedAttribute xmi:type="uml:Property" name="phases"><type xmi:idref="PHASE"/></ownedAttribute>
      </packagedElement>
    </packagedElement>
  </uml:Model>
</xmi:XMI>"#;

    let profile = parse_bytes(source.as_bytes(), ResolvePolicy::Lenient).expect("Failed to parse");

    assert_eq!(profile.classes.len(), 1);
    let terminal = &profile.classes[0];
    assert_eq!(
        terminal.property_names(),
        vec!["Terminal.phases", "IdentifiedObject.mRID"]
    );
    assert_eq!(
        terminal.properties[0].type_,
        PropertyType::Enumeration("PhaseCode".to_string())
    );
    // Primitive class is not part of this document
    assert_eq!(
        terminal.properties[1].type_,
        PropertyType::Unresolved("T_STRING".to_string())
    );
    assert_eq!(terminal.ancestors[0].name, "IdentifiedObject");

    let err = parse_bytes(source.as_bytes(), ResolvePolicy::Strict).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E202);
}

#[test]
fn test_parse_file_reads_from_disk() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("schema.xmi");
    fs::write(&path, INHERITANCE).expect("Failed to write document");

    let profile = parse_file(&path, ResolvePolicy::default()).expect("Failed to parse");
    assert_eq!(profile.classes.len(), 5);

    let missing = dir.path().join("missing.xmi");
    let err = parse_file(&missing, ResolvePolicy::default()).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert_eq!(err.code(), ErrorCode::E001);
}
