//! Supported-models manifest validator
//!
//! A small tool that checks the `supported_models.txt` JSON manifest for
//! syntax errors, missing required fields, and duplicate entries (by
//! download URL and by model name).

pub mod error;
pub mod manifest;
pub mod report;
pub mod validator;

pub use error::ManifestError;
pub use manifest::{DEFAULT_MANIFEST_PATH, extract_models, parse_manifest, read_manifest};
pub use report::{DuplicateGroup, Issue, ValidationReport, display_url};
pub use validator::{REQUIRED_FIELDS, check_entries, validate_file};
