//! Fatal validation errors
//!
//! These halt the run before the per-entry pass. Display text is the exact
//! diagnostic line the report prints, so callers can emit errors verbatim.
//! Per-entry problems (missing fields, duplicates) are not errors; they
//! accumulate in the report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that end validation immediately
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Error: File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON Syntax Error at line {line}, column {column}:\n  {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Error: Root should be an object, got {actual}")]
    RootNotObject { actual: &'static str },

    #[error("Error: Missing 'models' array in root object")]
    MissingModels,

    #[error("Error: 'models' should be an array, got {actual}")]
    ModelsNotArray { actual: &'static str },
}
