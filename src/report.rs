//! Validation report: per-entry issues, duplicate groups, and rendering
//!
//! Everything here is transient; the report is assembled during one pass
//! over the manifest, printed, and dropped.

use std::borrow::Cow;
use std::io::Write;

/// URLs this long or longer are truncated for display.
const URL_DISPLAY_MAX: usize = 60;

/// One non-fatal problem found on a manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The entry at this position is not a JSON object.
    NotAnObject {
        index: usize,
        /// Compact JSON rendering of the offending value.
        value: String,
    },
    /// The entry at this position lacks a required field.
    MissingField {
        index: usize,
        field: &'static str,
        /// The entry's `model_name`, or `unknown` when absent.
        model_name: String,
    },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { index, value } => {
                write!(f, "[{index}] Entry is not an object: {value}")
            }
            Self::MissingField {
                index,
                field,
                model_name,
            } => {
                write!(f, "[{index}] Missing required field '{field}': {model_name}")
            }
        }
    }
}

/// Entries sharing one index key (a URL or a model name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// The shared URL or name.
    pub key: String,
    /// (position, counterpart value): the entry's name for URL groups, its
    /// URL for name groups. Empty when the counterpart field is absent.
    pub entries: Vec<(usize, String)>,
}

/// Outcome of the per-entry pass over the `models` array
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub total_models: usize,
    pub issues: Vec<Issue>,
    pub duplicate_urls: Vec<DuplicateGroup>,
    pub duplicate_names: Vec<DuplicateGroup>,
}

impl ValidationReport {
    /// True when the pass found no field issues and no duplicates.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.duplicate_urls.is_empty() && self.duplicate_names.is_empty()
    }

    /// Render the issue sections followed by the success line or the
    /// summary block.
    pub fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        if !self.issues.is_empty() {
            writeln!(out)?;
            writeln!(out, "Field Issues ({}):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(out, "  {issue}")?;
            }
        }

        if !self.duplicate_urls.is_empty() {
            writeln!(out)?;
            writeln!(out, "Duplicate URLs ({}):", self.duplicate_urls.len())?;
            for group in &self.duplicate_urls {
                writeln!(out, "  URL: {}", group.key)?;
                for (index, name) in &group.entries {
                    writeln!(out, "    [{index}] {name}")?;
                }
            }
        }

        if !self.duplicate_names.is_empty() {
            writeln!(out)?;
            writeln!(out, "Duplicate Model Names ({}):", self.duplicate_names.len())?;
            for group in &self.duplicate_names {
                writeln!(out, "  Name: {}", group.key)?;
                for (index, url) in &group.entries {
                    writeln!(out, "    [{index}] {}", display_url(url))?;
                }
            }
        }

        if self.is_clean() {
            writeln!(out)?;
            writeln!(out, "No issues found!")?;
        } else {
            writeln!(out)?;
            writeln!(out, "Summary:")?;
            writeln!(out, "  - Field issues: {}", self.issues.len())?;
            writeln!(out, "  - Duplicate URLs: {}", self.duplicate_urls.len())?;
            writeln!(out, "  - Duplicate names: {}", self.duplicate_names.len())?;
        }

        Ok(())
    }
}

/// Display form of a URL: verbatim under 60 characters, otherwise the first
/// 57 characters plus an ellipsis. Counted in chars, never bytes.
pub fn display_url(url: &str) -> Cow<'_, str> {
    if url.chars().count() < URL_DISPLAY_MAX {
        Cow::Borrowed(url)
    } else {
        let head: String = url.chars().take(URL_DISPLAY_MAX - 3).collect();
        Cow::Owned(format!("{head}..."))
    }
}
