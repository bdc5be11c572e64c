//! # cimgraph Parser
//!
//! Reader for XMI exports of a CIM UML model. This crate provides the pipeline
//! from an XMI file to a resolved [`CimProfile`].
//!
//! ## Usage
//!
//! ```
//! # use cimgraph_core::profile::ResolvePolicy;
//! # use cimgraph_parser::{parse_bytes, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = br#"<?xml version="1.0" encoding="windows-1252"?>
//!         <xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001"
//!                  xmlns:uml="http://www.omg.org/spec/UML/20131001">
//!           <uml:Model xmi:type="uml:Model" name="CIM">
//!             <packagedElement xmi:type="uml:Package" name="Core">
//!               <packagedElement xmi:type="uml:Class" xmi:id="C1" name="Terminal"/>
//!             </packagedElement>
//!           </uml:Model>
//!         </xmi:XMI>"#;
//!
//!     let profile = parse_bytes(source, ResolvePolicy::default())?;
//!     assert_eq!(profile.classes[0].name, "Terminal");
//!     Ok(())
//! }
//! ```

mod charset;
pub mod document;
pub mod error;
mod index;
mod reader;
mod resolve;

pub use error::{ErrorCode, ParseError};
pub use index::{ModelIndex, build_index};
pub use reader::read_document;
pub use resolve::{flatten_generalizations, resolve, resolve_property_types};

use std::{fs, path::Path};

use log::{debug, info};

use cimgraph_core::profile::{CimProfile, ResolvePolicy};

/// Parse an XMI file into a resolved CIM profile.
///
/// The file is read in a single call, so its handle is released before any
/// decoding happens, whether or not decoding succeeds.
///
/// # Arguments
///
/// * `path` - Path to the XMI document
/// * `policy` - How unresolvable references are treated
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, and any error of
/// [`parse_bytes`] otherwise.
pub fn parse_file(path: impl AsRef<Path>, policy: ResolvePolicy) -> Result<CimProfile, ParseError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Reading XMI document");

    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = bytes.len(); "Document loaded");

    parse_bytes(&bytes, policy)
}

/// Parse XMI content into a resolved CIM profile.
///
/// Orchestrates the complete pipeline:
///
/// 1. **Decode** - Check the declared charset and read the element tree
/// 2. **Index** - Collect classes and enumerations by identifier
/// 3. **Flatten** - Copy inherited properties along single-parent chains
/// 4. **Resolve** - Resolve property types against classes, then enumerations
///
/// # Errors
///
/// Returns a [`ParseError`] for unsupported charsets, malformed XML, an
/// unexpected document root, or (under [`ResolvePolicy::Strict`]) unresolvable
/// references.
pub fn parse_bytes(bytes: &[u8], policy: ResolvePolicy) -> Result<CimProfile, ParseError> {
    let document = read_document(bytes)?;

    let (mut profile, index) = build_index(&document);
    info!(
        classes = profile.classes.len(),
        indexed_classes = index.class_count(),
        enumerations = index.enum_count();
        "Model indexed"
    );

    resolve(&mut profile, &index, policy)?;
    debug!(policy = policy.to_string(); "Profile resolved");

    Ok(profile)
}
