//! Manifest loading and structural checks
//!
//! The manifest is a UTF-8 file containing a single JSON object:
//!
//! ```text
//! { "models": [ { "model_name": "...", "url": "...", "directory": "..." }, ... ] }
//! ```
//!
//! Entries are handed to the validator as raw [`serde_json::Value`]s rather
//! than a typed struct: the per-entry checks must distinguish an absent key
//! from a present key with an unexpected type, which a derived deserializer
//! would collapse.

use crate::error::ManifestError;
use serde_json::Value;
use std::path::Path;

/// Default manifest filename, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "supported_models.txt";

/// Read the manifest file as UTF-8 text.
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    tracing::debug!(path = %path.display(), "reading manifest");

    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Parse manifest text as a JSON document.
pub fn parse_manifest(content: &str) -> Result<Value, ManifestError> {
    serde_json::from_str(content).map_err(|err| ManifestError::Syntax {
        line: err.line(),
        column: err.column(),
        message: bare_message(&err),
    })
}

/// serde_json appends "at line L column C" to its messages; the report
/// prints the position itself, so strip the suffix.
fn bare_message(err: &serde_json::Error) -> String {
    let rendered = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match rendered.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => rendered,
    }
}

/// Locate the `models` array inside the parsed document.
///
/// Fails when the root is not an object, the `models` key is missing, or
/// its value is not an array.
pub fn extract_models(doc: &Value) -> Result<&[Value], ManifestError> {
    let root = doc.as_object().ok_or(ManifestError::RootNotObject {
        actual: json_type_name(doc),
    })?;

    let models = root.get("models").ok_or(ManifestError::MissingModels)?;

    models
        .as_array()
        .map(|list| list.as_slice())
        .ok_or(ManifestError::ModelsNotArray {
            actual: json_type_name(models),
        })
}

/// JSON type name for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One line of source text surrounding a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Whether this is the offending line.
    pub marked: bool,
    pub text: String,
}

/// Context window for a syntax error report: up to two lines before the
/// offending line, the offending line itself, and one line after.
///
/// `error_line` is the parser's 1-based line number.
pub fn syntax_context(content: &str, error_line: usize) -> Vec<ContextLine> {
    let lines: Vec<&str> = content.split('\n').collect();
    let start = error_line.saturating_sub(3);
    let end = lines.len().min(error_line + 1);

    (start..end)
        .map(|i| ContextLine {
            number: i + 1,
            marked: i + 1 == error_line,
            text: lines[i].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_manifest_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_file.txt");

        let err = read_manifest(&missing).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_read_manifest_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.txt");
        std::fs::write(&path, r#"{"models": []}"#).unwrap();

        let content = read_manifest(&path).unwrap();
        assert_eq!(content, r#"{"models": []}"#);
    }

    #[test]
    fn test_read_manifest_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[test]
    fn test_parse_manifest_reports_position() {
        // Error on line 3: dangling comma before the closing bracket
        let content = "{\n  \"models\": [\n    {},,\n  ]\n}";

        let err = parse_manifest(content).unwrap_err();
        match err {
            ManifestError::Syntax { line, column, .. } => {
                assert_eq!(line, 3);
                assert!(column > 0);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_manifest_message_has_no_position_suffix() {
        let err = parse_manifest("{").unwrap_err();
        match err {
            ManifestError::Syntax { message, .. } => {
                assert!(!message.contains("at line"), "message: {message}");
                assert!(!message.is_empty());
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_models_root_not_object() {
        let doc = json!(["not", "an", "object"]);
        let err = extract_models(&doc).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::RootNotObject { actual: "array" }
        ));
    }

    #[test]
    fn test_extract_models_missing_key() {
        let doc = json!({ "modules": [] });
        let err = extract_models(&doc).unwrap_err();
        assert!(matches!(err, ManifestError::MissingModels));
    }

    #[test]
    fn test_extract_models_wrong_type() {
        let doc = json!({ "models": "nope" });
        let err = extract_models(&doc).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::ModelsNotArray { actual: "string" }
        ));
    }

    #[test]
    fn test_extract_models_ok() {
        let doc = json!({ "models": [{}, {}] });
        let models = extract_models(&doc).unwrap();
        assert_eq!(models.len(), 2);
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }

    #[test]
    fn test_syntax_context_window() {
        let content = "line one\nline two\nline three\nline four\nline five";

        let context = syntax_context(content, 3);
        let numbers: Vec<usize> = context.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let marked: Vec<usize> = context
            .iter()
            .filter(|l| l.marked)
            .map(|l| l.number)
            .collect();
        assert_eq!(marked, vec![3]);
        assert_eq!(context[2].text, "line three");
    }

    #[test]
    fn test_syntax_context_at_first_line() {
        let context = syntax_context("only\ntwo", 1);
        let numbers: Vec<usize> = context.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(context[0].marked);
    }

    #[test]
    fn test_syntax_context_at_last_line() {
        let context = syntax_context("a\nb\nc", 3);
        let numbers: Vec<usize> = context.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(context[2].marked);
    }

    #[test]
    fn test_syntax_context_line_zero_marks_nothing() {
        // serde_json reports line 0 for non-positional failures; the window
        // degenerates to the first line, unmarked
        let context = syntax_context("a\nb\nc", 0);
        assert!(context.iter().all(|l| !l.marked));
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].number, 1);
    }
}
