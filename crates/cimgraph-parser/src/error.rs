//! Error types for reading and resolving XMI documents.
//!
//! Every [`ParseError`] carries an [`ErrorCode`] for documentation and
//! searchability, plus optional help text for the CLI.

mod error_code;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use error_code::ErrorCode;

/// Errors raised while turning an XMI document into a CIM profile.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown charset: {0}")]
    UnknownCharset(String),

    #[error("XML error at position {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("expected element type <XMI> but have <{0}>")]
    UnexpectedRoot(String),

    #[error("unexpected end of document")]
    UnexpectedEof,

    #[error("class `{class}` generalizes unknown class `{id}`")]
    UnknownParent { class: String, id: String },

    #[error("inheritance cycle through `{id}` while flattening class `{class}`")]
    InheritanceCycle { class: String, id: String },

    #[error("property `{property}` references unknown type `{object}`")]
    UnresolvedType { property: String, object: String },
}

impl ParseError {
    /// Create an XML syntax error at a byte position.
    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// Returns the error code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Io { .. } => ErrorCode::E001,
            ParseError::UnknownCharset(_) => ErrorCode::E002,
            ParseError::Xml { .. } => ErrorCode::E003,
            ParseError::UnexpectedRoot(_) => ErrorCode::E100,
            ParseError::UnexpectedEof => ErrorCode::E101,
            ParseError::UnknownParent { .. } => ErrorCode::E200,
            ParseError::InheritanceCycle { .. } => ErrorCode::E201,
            ParseError::UnresolvedType { .. } => ErrorCode::E202,
        }
    }

    /// Returns help text with a suggestion to fix the error, if any.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::UnknownCharset(_) => {
                Some("supported encodings are UTF-8, ISO-8859-1 and windows-1252")
            }
            ParseError::UnexpectedRoot(_) => {
                Some("the input must be an XMI export with an <xmi:XMI> root element")
            }
            ParseError::UnknownParent { .. } | ParseError::UnresolvedType { .. } => {
                Some("set `policy = \"lenient\"` in the [resolve] configuration section to treat unknown references as object references")
            }
            _ => None,
        }
    }
}

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;
