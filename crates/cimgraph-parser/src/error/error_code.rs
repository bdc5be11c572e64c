//! Error codes for the cimgraph parser.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Reading and decoding errors
//! - `E1xx` - Document structure errors
//! - `E2xx` - Resolution errors (strict policy)

use std::fmt;

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Reading Errors (E0xx)
    // =========================================================================
    /// The document could not be read from disk.
    E001,

    /// Unsupported declared charset.
    ///
    /// Only UTF-8 and the single-byte ISO-8859-1/windows-1252 encodings are read.
    E002,

    /// Malformed XML.
    E003,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// The root element is not `XMI`.
    E100,

    /// The document ended before all elements were closed, or has no root.
    E101,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// A generalization targets an identifier that is not a known class.
    E200,

    /// A generalization chain revisits a class.
    E201,

    /// A property references an identifier that is neither a class nor an enumeration.
    E202,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }
}
