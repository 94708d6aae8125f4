//! Per-turn context assembly.
//!
//! Before every decision the builder takes a fresh look at the world: the
//! currently dispatchable tools, a recursive inventory of the workspace,
//! and whatever advisory snippets are on disk. The resulting snapshot is
//! serialized into the system prompt and discarded; nothing here survives
//! the turn.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use benchhand_core::manifest::ToolManifest;
use benchhand_memory::SnippetStore;
use serde::Serialize;
use tracing::warn;

/// Who the agent says it is, constant across turns.
pub const IDENTITY: &str = "You are Benchhand, a self-maintaining tool orchestrator.";

/// What the agent is for, constant across turns.
pub const PURPOSE: &str = "Turn operator requests into precise local tool runs.";

/// Ephemeral view of the world for one decision.
///
/// Rebuilt from scratch each turn so the model always sees files and tools
/// created by earlier turns, including ones the session itself wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    pub identity: String,
    pub purpose: String,
    /// Every dispatchable tool's declaration, surfaced verbatim.
    pub tools: Vec<ToolManifest>,
    /// Relative paths of every file under the workspace root.
    pub files_known: Vec<String>,
    /// Raw advisory memory texts.
    pub memory_snippets: Vec<String>,
}

/// Assembles a [`ContextSnapshot`] from the workspace.
pub struct ContextBuilder {
    workspace_root: PathBuf,
    snippets: SnippetStore,
}

impl ContextBuilder {
    pub fn new(workspace_root: impl Into<PathBuf>, snippets: SnippetStore) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            snippets,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Build the snapshot for this turn.
    ///
    /// Reads the filesystem but never changes it; two builds with no
    /// intervening writes produce equal snapshots.
    pub fn build(&self, manifests: &BTreeMap<String, ToolManifest>) -> ContextSnapshot {
        ContextSnapshot {
            identity: IDENTITY.to_string(),
            purpose: PURPOSE.to_string(),
            tools: manifests.values().cloned().collect(),
            files_known: self.file_inventory(),
            memory_snippets: self.snippets.load(),
        }
    }

    /// Every file under the workspace root, as sorted relative paths.
    fn file_inventory(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.workspace_root, &self.workspace_root, &mut files);
        files.sort();
        files
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if path.is_file() {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            out.push(relative.to_string_lossy().into_owned());
        }
    }
}
