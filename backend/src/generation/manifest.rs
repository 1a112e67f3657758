//! Validation of the model output.
//!
//! The completion is expected to be one JSON object mapping relative file paths to file
//! contents. Anything else is rejected with a reason that names the offending key, so
//! the archiver only ever sees safe paths and string contents.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("completion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("completion is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
    #[error("value for {path:?} is a JSON {kind}, expected a string")]
    NonStringValue { path: String, kind: &'static str },
    #[error("unsafe file path {0:?}")]
    UnsafePath(String),
    #[error("completion contains no files")]
    Empty,
}

/// Relative file path → file content, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    files: BTreeMap<String, String>,
}

impl Manifest {
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(raw)?;
        let object = match value {
            Value::Object(object) => object,
            other => return Err(ManifestError::NotAnObject(kind_of(&other))),
        };
        let mut files = BTreeMap::new();
        for (path, content) in object {
            let content = match content {
                Value::String(content) => content,
                other => {
                    return Err(ManifestError::NonStringValue {
                        path,
                        kind: kind_of(&other),
                    })
                }
            };
            if !is_safe_relative_path(&path) {
                return Err(ManifestError::UnsafePath(path));
            }
            files.insert(path, content);
        }

        let manifest = Self { files };
        if manifest.is_empty() {
            return Err(ManifestError::Empty);
        }
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A path is accepted when it is relative and every `/`-separated segment is a plain
/// name: no empty segment, no `.` or `..`, no backslash, no drive prefix.
fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.contains('\\') || path.contains(':') {
        return false;
    }
    path.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_an_object_of_strings() {
        let manifest = Manifest::parse(r#"{"b/c.txt": "world", "a.txt": "hello"}"#).unwrap();
        assert_eq!(manifest.len(), 2);
        let entries: Vec<_> = manifest.iter().collect();
        assert_eq!(entries, vec![("a.txt", "hello"), ("b/c.txt", "world")]);
    }

    #[test]
    fn rejects_text_that_is_not_json() {
        let err = Manifest::parse("Here is your project: {").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidJson(_)));
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(matches!(
            Manifest::parse(r#"["a.txt"]"#),
            Err(ManifestError::NotAnObject("array"))
        ));
        assert!(matches!(
            Manifest::parse(r#""a.txt""#),
            Err(ManifestError::NotAnObject("string"))
        ));
    }

    #[test]
    fn rejects_nested_and_non_string_values_by_path() {
        match Manifest::parse(r#"{"src": {"main.ts": "x"}}"#) {
            Err(ManifestError::NonStringValue { path, kind }) => {
                assert_eq!(path, "src");
                assert_eq!(kind, "object");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            Manifest::parse(r#"{"port.txt": 3000}"#),
            Err(ManifestError::NonStringValue { kind: "number", .. })
        ));
    }

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        for key in ["../etc/passwd", "src/../../x", "/abs.txt", "C:/win.txt", "a\\b.txt", "a//b", "./a", ""] {
            let raw = serde_json::json!({ key: "x" }).to_string();
            assert!(
                matches!(Manifest::parse(&raw), Err(ManifestError::UnsafePath(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_an_empty_object() {
        assert!(matches!(Manifest::parse("{}"), Err(ManifestError::Empty)));
    }
}
