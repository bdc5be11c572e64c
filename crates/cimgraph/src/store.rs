//! Graph store backends.
//!
//! This module provides the [`SchemaStore`] trait, the interface through which
//! a rendered schema reaches a live graph store. It is the final stage of the
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! XMI Document
//!     ↓ parse
//! Resolved Profile
//!     ↓ derive
//! Schema
//!     ↓ render
//! Alteration Text
//!     ↓ apply (this module)
//! Graph Store
//! ```
//!
//! # Available Backends
//!
//! - [`dgraph`] - Dgraph over HTTP via [`dgraph::DgraphStore`]

/// Dgraph HTTP backend.
pub mod dgraph;

use log::info;
use thiserror::Error;

/// Abstraction over graph stores that accept schema alterations.
pub trait SchemaStore {
    /// Removes all data and schema from the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails or the store rejects it.
    fn drop_all(&mut self) -> Result<(), StoreError>;

    /// Applies a schema in the store's alteration syntax.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails or the store rejects it.
    fn alter(&mut self, schema: &str) -> Result<(), StoreError>;
}

/// Errors that can occur while talking to a graph store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("store responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store rejected the operation: {0}")]
    Rejected(String),
}

/// Replace the store's schema with `schema`.
///
/// Wipes the store, then applies the whole schema text in a single alteration.
/// A failed alteration is not undone, so the store is left empty.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised by the store; nothing is applied
/// when the wipe fails.
pub fn apply_schema(store: &mut impl SchemaStore, schema: &str) -> Result<(), StoreError> {
    info!("Dropping all data and schema");
    store.drop_all()?;

    info!(bytes = schema.len(); "Applying schema");
    store.alter(schema)?;

    info!("Schema applied");
    Ok(())
}
