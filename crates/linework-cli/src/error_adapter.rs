//! Error adapter for converting LineworkError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use linework::LineworkError;

/// Adapter giving a [`LineworkError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a LineworkError);

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
            LineworkError::UnsupportedNodeType(_) => "linework::node_type",
            LineworkError::Config(_) => "linework::config",
            LineworkError::Io(_) => "linework::io",
            LineworkError::Export(_) => "linework::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LineworkError::UnsupportedNodeType(_) => {
                "register the node type before creating nodes of it"
            }
            LineworkError::Config(_) => "check the [routing] and [interaction] sections",
            LineworkError::Io(_) | LineworkError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`LineworkError`] into a reportable error.
pub fn to_reportable(err: &LineworkError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
