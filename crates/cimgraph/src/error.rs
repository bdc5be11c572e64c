//! Error types for cimgraph operations.
//!
//! This module provides the main error type [`CimGraphError`] which wraps the
//! error conditions of every pipeline stage.

use std::{io, path::PathBuf};

use thiserror::Error;

use cimgraph_parser::ParseError;

use crate::store::StoreError;

/// The main error type for cimgraph operations.
#[derive(Debug, Error)]
pub enum CimGraphError {
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Schema application failed: {0}")]
    Store(#[from] StoreError),

    /// Invalid or unreadable configuration, raised by front ends.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CimGraphError {
    /// Create an `Io` error for the file at `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
