use crate::error::CatalogLoadError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and parses a catalog file.
///
/// These are the only fatal conditions in the pipeline: a missing file,
/// unreadable bytes, invalid JSON or a root that is not an object. Anything
/// wrong *inside* the object is left to the validator.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, CatalogLoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogLoadError::NotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read catalog");
    parse_document(&content)
}

/// Parses catalog text that is already in memory.
pub fn parse_document(content: &str) -> Result<Value, CatalogLoadError> {
    let document: Value = serde_json::from_str(content)?;
    match &document {
        Value::Object(_) => Ok(document),
        Value::Array(_) => Err(CatalogLoadError::NotAnObject("an array")),
        Value::String(_) => Err(CatalogLoadError::NotAnObject("a string")),
        Value::Number(_) => Err(CatalogLoadError::NotAnObject("a number")),
        Value::Bool(_) => Err(CatalogLoadError::NotAnObject("a boolean")),
        Value::Null => Err(CatalogLoadError::NotAnObject("null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_object_roots() {
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(CatalogLoadError::NotAnObject("an array"))
        ));
        assert!(matches!(
            parse_document("{ not json"),
            Err(CatalogLoadError::Parse(_))
        ));
        assert!(parse_document(r#"{"blockTypes": {}}"#).is_ok());
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let err = load_document("definitely/not/here.json").unwrap_err();
        assert_eq!(err.to_string(), "File not found: definitely/not/here.json");
    }
}
