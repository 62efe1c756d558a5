//! The per-entry validation pass and the report pipeline
//!
//! `validate_file` is the whole program: read, parse, check shape, walk the
//! entries once while the duplicate indices fill, then print. Field issues
//! and duplicates never abort the pass; a single run reports everything.

use crate::error::ManifestError;
use crate::manifest::{extract_models, parse_manifest, read_manifest, syntax_context};
use crate::report::{DuplicateGroup, Issue, ValidationReport};
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Fields every manifest entry must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["model_name", "url", "directory"];

/// Position/counterpart pairs collected per index key.
type DuplicateIndex = BTreeMap<String, Vec<(usize, String)>>;

/// Run the per-entry checks and derive duplicate groups.
///
/// Entries that are not objects are reported and skipped. Required-field
/// checks test key presence only. URLs and names enter the duplicate
/// indices unless empty or falsy, verbatim: whitespace-only strings are
/// indexed, never trimmed or normalized, and truthy non-string values are
/// keyed by their JSON rendering.
pub fn check_entries(models: &[Value]) -> ValidationReport {
    let mut report = ValidationReport {
        total_models: models.len(),
        ..Default::default()
    };

    let mut url_index = DuplicateIndex::new();
    let mut name_index = DuplicateIndex::new();

    for (index, entry) in models.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            report.issues.push(Issue::NotAnObject {
                index,
                value: entry.to_string(),
            });
            continue;
        };

        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                report.issues.push(Issue::MissingField {
                    index,
                    field,
                    model_name: cited_name(fields),
                });
            }
        }

        let url = fields.get("url");
        let name = fields.get("model_name");

        if let Some(key) = index_key(url) {
            url_index
                .entry(key)
                .or_default()
                .push((index, counterpart(name)));
        }
        if let Some(key) = index_key(name) {
            name_index
                .entry(key)
                .or_default()
                .push((index, counterpart(url)));
        }
    }

    report.duplicate_urls = duplicate_groups(url_index);
    report.duplicate_names = duplicate_groups(name_index);

    tracing::debug!(
        total = report.total_models,
        field_issues = report.issues.len(),
        duplicate_urls = report.duplicate_urls.len(),
        duplicate_names = report.duplicate_names.len(),
        "entry pass complete"
    );

    report
}

/// Index key for a `url`/`model_name` value: strings verbatim, other
/// values by their compact JSON rendering. Empty or falsy values (absent,
/// null, false, zero, empty string/array/object) are never indexed.
fn index_key(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Counterpart value recorded alongside an index entry: the raw string, the
/// JSON rendering of a non-string, or empty when the key is absent.
fn counterpart(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Name cited in a field issue: the entry's `model_name` string, the JSON
/// rendering of a non-string value, or `unknown` when the key is absent.
fn cited_name(fields: &serde_json::Map<String, Value>) -> String {
    match fields.get("model_name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

/// Keys recorded at two or more positions, in key order.
fn duplicate_groups(index: DuplicateIndex) -> Vec<DuplicateGroup> {
    index
        .into_iter()
        .filter(|(_, entries)| entries.len() > 1)
        .map(|(key, entries)| DuplicateGroup { key, entries })
        .collect()
}

/// Validate the manifest at `path`, writing the report to `out`.
///
/// Returns `Ok(true)` when the manifest is clean and `Ok(false)` when
/// validation failed; `Err` only when the output stream itself fails.
pub fn validate_file(path: &Path, out: &mut dyn Write) -> Result<bool> {
    writeln!(out, "Validating: {}\n", path.display())?;

    let content = match read_manifest(path) {
        Ok(content) => content,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(false);
        }
    };

    let doc = match parse_manifest(&content) {
        Ok(doc) => doc,
        Err(err) => {
            writeln!(out, "{err}")?;
            if let ManifestError::Syntax { line, .. } = &err {
                writeln!(out)?;
                writeln!(out, "Context:")?;
                for ctx in syntax_context(&content, *line) {
                    let marker = if ctx.marked { ">>>" } else { "   " };
                    writeln!(out, "  {marker} {}: {}", ctx.number, ctx.text)?;
                }
            }
            return Ok(false);
        }
    };

    writeln!(out, "JSON syntax: OK")?;

    let models = match extract_models(&doc) {
        Ok(models) => models,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(false);
        }
    };

    writeln!(out, "Total models: {}", models.len())?;

    let report = check_entries(models);
    report.write_to(out)?;

    Ok(report.is_clean())
}
