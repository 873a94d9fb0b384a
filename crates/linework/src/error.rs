//! Error types for Linework operations.
//!
//! This module provides the main error type [`LineworkError`]. Geometry and
//! hit testing never fail; errors only come from contract violations
//! (an unregistered node type), invalid configuration, and output.

use std::io;

use thiserror::Error;

use linework_core::identifier::Id;

/// The main error type for Linework operations.
#[derive(Debug, Error)]
pub enum LineworkError {
    /// A node was requested for a type that is not in the registry.
    #[error("Unsupported node type: {0}")]
    UnsupportedNodeType(Id),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}
