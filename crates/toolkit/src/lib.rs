//! Support library for the bundled tool binaries.
//!
//! Every tool honors the same calling convention: it lives in the tool
//! directory, reads its arguments from the `input.json` side-channel next
//! to its own executable, prints human-readable text, and signals failure
//! with a non-zero exit and a diagnostic on stderr. The workspace the
//! tools operate on is the parent of the tool directory.

use benchhand_core::manifest::ARGUMENT_FILE;
use serde_json::{Map, Value};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Directory holding the running tool's executable.
pub fn tool_dir() -> Result<PathBuf, Box<dyn Error>> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or("Tool executable has no parent directory.")?;
    Ok(dir.to_path_buf())
}

/// The workspace root: the parent of the tool directory.
pub fn workspace_root(tool_dir: &Path) -> PathBuf {
    match tool_dir.parent() {
        Some(parent) => parent.to_path_buf(),
        None => tool_dir.to_path_buf(),
    }
}

/// Read the argument side-channel, tolerating its absence.
///
/// The dispatcher only writes the file when there are arguments, so a
/// missing file means an empty mapping, not an error.
pub fn read_params(tool_dir: &Path) -> Result<Map<String, Value>, Box<dyn Error>> {
    let path = tool_dir.join(ARGUMENT_FILE);
    if !path.exists() {
        return Ok(Map::new());
    }
    let text = std::fs::read_to_string(&path)?;
    let params = serde_json::from_str(&text)?;
    Ok(params)
}

/// Fetch a required string parameter.
pub fn require_str<'a>(
    params: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, Box<dyn Error>> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Missing or invalid '{key}' parameter.").into())
}

/// Fetch an optional string parameter, defaulting to empty.
pub fn optional_str<'a>(
    params: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, Box<dyn Error>> {
    match params.get(key) {
        None => Ok(""),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(format!("Parameter '{key}' must be a string if provided.").into()),
    }
}

/// Fetch an optional boolean parameter, defaulting to false.
pub fn optional_bool(params: &Map<String, Value>, key: &str) -> Result<bool, Box<dyn Error>> {
    match params.get(key) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(format!("Parameter '{key}' must be a boolean if provided.").into()),
    }
}

/// Report failure the way the dispatcher expects and exit non-zero.
pub fn fail(error: Box<dyn Error>) -> ! {
    eprintln!("[ERROR] {error}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(body: &str) -> Map<String, Value> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn missing_argument_file_is_an_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_params(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn argument_file_parses_into_a_mapping() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ARGUMENT_FILE),
            r#"{"path": "notes.md", "count": 2}"#,
        )
        .unwrap();

        let params = read_params(dir.path()).unwrap();
        assert_eq!(params.get("path"), Some(&json!("notes.md")));
        assert_eq!(params.get("count"), Some(&json!(2)));
    }

    #[test]
    fn malformed_argument_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARGUMENT_FILE), "{ nope").unwrap();
        assert!(read_params(dir.path()).is_err());
    }

    #[test]
    fn require_str_reports_missing_and_mistyped_keys() {
        let params = params(r#"{"path": 7}"#);
        let missing = require_str(&params, "filename").unwrap_err();
        assert_eq!(missing.to_string(), "Missing or invalid 'filename' parameter.");
        let mistyped = require_str(&params, "path").unwrap_err();
        assert_eq!(mistyped.to_string(), "Missing or invalid 'path' parameter.");
    }

    #[test]
    fn optional_str_defaults_and_rejects_non_strings() {
        let params = params(r#"{"subfolder": "projects", "depth": 2}"#);
        assert_eq!(optional_str(&params, "subfolder").unwrap(), "projects");
        assert_eq!(optional_str(&params, "absent").unwrap(), "");
        assert!(optional_str(&params, "depth").is_err());
    }

    #[test]
    fn optional_bool_defaults_and_rejects_non_booleans() {
        let params = params(r#"{"dry_run": true, "count": 1}"#);
        assert!(optional_bool(&params, "dry_run").unwrap());
        assert!(!optional_bool(&params, "absent").unwrap());
        assert!(optional_bool(&params, "count").is_err());
    }

    #[test]
    fn workspace_root_is_the_tool_dirs_parent() {
        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("tools");
        assert_eq!(workspace_root(&tools), dir.path());
    }
}
