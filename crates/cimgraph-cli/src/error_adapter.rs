//! Error adapter for converting CimGraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors carry
//! their parser error code and help text; other variants get a category code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use cimgraph::CimGraphError;

/// Adapter that renders a [`CimGraphError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CimGraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CimGraphError::Parse(err) => err.code().as_str(),
            CimGraphError::Io { .. } => "cimgraph::io",
            CimGraphError::Store(_) => "cimgraph::store",
            CimGraphError::Config(_) => "cimgraph::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CimGraphError::Parse(err) => err.help()?,
            CimGraphError::Store(_) => {
                "check that Dgraph is reachable at the configured URL, or run with --dry-run"
            }
            CimGraphError::Io { .. } | CimGraphError::Config(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
