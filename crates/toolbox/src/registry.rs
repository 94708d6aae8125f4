//! Tool discovery: pairing executable artifacts with declarations.
//!
//! A tool is dispatchable only when both halves exist side by side in the
//! tool directory: the executable artifact and a `.json` declaration with
//! the same base name. Either half alone is invisible.

use benchhand_core::manifest::ToolManifest;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Scan the tool directory and load every declared tool, keyed by the
/// artifact's file name.
///
/// Artifacts without a declaration are silently excluded; a declaration
/// that fails to read or parse excludes only that one tool, with a
/// warning. The scan is uncached: tools added between turns (including by
/// the session itself) show up on the next call.
pub fn load_manifests(dir: &Path) -> BTreeMap<String, ToolManifest> {
    let mut manifests = BTreeMap::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Tool directory not readable");
            return manifests;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // Declarations describe tools; they are not artifacts themselves.
        if path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let declaration = path.with_extension("json");
        if !declaration.exists() {
            continue;
        }

        let loaded = std::fs::read_to_string(&declaration)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                serde_json::from_str::<ToolManifest>(&text).map_err(|e| e.to_string())
            });

        match loaded {
            Ok(mut manifest) => {
                // The artifact's file name is the tool's identity; a
                // declaration's own "name" field never overrides it.
                manifest.name = name.to_string();
                manifests.insert(name.to_string(), manifest);
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Skipping tool with unusable declaration");
            }
        }
    }

    debug!(path = %dir.display(), count = manifests.len(), "Tool manifests loaded");
    manifests
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(dir: &Path, stem: &str, body: &str) {
        std::fs::write(dir.join(format!("{stem}.json")), body).unwrap();
    }

    #[test]
    fn pairs_artifact_with_declaration() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("list_directory.py"), "# tool").unwrap();
        declare(
            dir.path(),
            "list_directory",
            r#"{"name":"list_directory.py","description":"List entries","inputs":[{"name":"directory","type":"string"}]}"#,
        );

        let manifests = load_manifests(dir.path());
        assert_eq!(manifests.len(), 1);
        let manifest = &manifests["list_directory.py"];
        assert_eq!(manifest.description, "List entries");
        assert_eq!(manifest.inputs.len(), 1);
    }

    #[test]
    fn extensionless_artifact_pairs_too() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("create_file"), "binary").unwrap();
        declare(dir.path(), "create_file", r#"{"name":"create_file"}"#);

        let manifests = load_manifests(dir.path());
        assert!(manifests.contains_key("create_file"));
    }

    #[test]
    fn artifact_name_wins_over_declared_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("read_file.py"), "# tool").unwrap();
        declare(dir.path(), "read_file", r#"{"name":"reader","inputs":[]}"#);

        let manifests = load_manifests(dir.path());
        assert_eq!(manifests["read_file.py"].name, "read_file.py");
    }

    #[test]
    fn artifact_without_declaration_is_invisible() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mystery.py"), "# tool").unwrap();

        assert!(load_manifests(dir.path()).is_empty());
    }

    #[test]
    fn declaration_without_artifact_is_invisible() {
        let dir = tempfile::tempdir().unwrap();
        declare(dir.path(), "ghost", r#"{"name":"ghost"}"#);

        assert!(load_manifests(dir.path()).is_empty());
    }

    #[test]
    fn bad_declaration_skips_only_that_tool() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.py"), "# tool").unwrap();
        declare(dir.path(), "good", r#"{"name":"good.py"}"#);
        std::fs::write(dir.path().join("broken.py"), "# tool").unwrap();
        declare(dir.path(), "broken", "{ not json");

        let manifests = load_manifests(dir.path());
        assert_eq!(manifests.len(), 1);
        assert!(manifests.contains_key("good.py"));
    }

    #[test]
    fn missing_directory_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_manifests(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn rescan_sees_tools_added_between_calls() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_manifests(dir.path()).is_empty());

        std::fs::write(dir.path().join("late.py"), "# tool").unwrap();
        declare(dir.path(), "late", r#"{"name":"late.py"}"#);

        assert!(load_manifests(dir.path()).contains_key("late.py"));
    }
}
