//! Document input handling.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads a data structure document from a file, or from stdin when no
/// path is given.
pub fn read_document(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("provided input is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_a_json_document_from_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"self": {"vendor": "com.snowplow"}}"#).unwrap();

        let document = read_document(Some(&path)).unwrap();
        assert_eq!(document["self"], json!({"vendor": "com.snowplow"}));
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, "not json").unwrap();

        let err = read_document(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn reports_the_missing_path() {
        let err = read_document(Some(Path::new("/no/such/file.json"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.json"));
    }
}
