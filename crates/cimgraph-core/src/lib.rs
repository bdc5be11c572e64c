//! cimgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the cimgraph crates:
//!
//! - **Profile**: The flattened CIM domain model ([`profile`] module)
//! - **Schema**: Graph-store schema objects derived from a profile ([`schema`] module)

pub mod profile;
pub mod schema;
