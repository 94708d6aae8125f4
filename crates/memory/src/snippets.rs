//! Markdown snippet store for free-text advisory memory.
//!
//! Snippets are plain Markdown fragments under the memory directory, folded
//! raw into every decision's context. They are advisory only: never parsed,
//! never validated, never written back by the core. Anything the operator
//! (or a tool) drops into the directory shows up on the next turn.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads advisory snippets from a directory tree.
///
/// Collection is best-effort: one unreadable file must not block the rest,
/// so failures are logged and skipped.
pub struct SnippetStore {
    root: PathBuf,
}

impl SnippetStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every readable `*.md` snippet under the root, recursively.
    ///
    /// Snippet text is trimmed of surrounding whitespace. Paths are sorted
    /// before reading so the context order is deterministic for a given
    /// filesystem state. A missing root yields no snippets; that is the
    /// normal state before onboarding.
    pub fn load(&self) -> Vec<String> {
        if !self.root.exists() {
            debug!(path = %self.root.display(), "Memory directory missing, no snippets");
            return Vec::new();
        }

        let mut paths = Vec::new();
        collect_markdown(&self.root, &mut paths);
        paths.sort();

        let snippets: Vec<String> = paths
            .iter()
            .filter_map(|path| match std::fs::read_to_string(path) {
                Ok(text) => Some(text.trim().to_string()),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable snippet");
                    None
                }
            })
            .collect();

        debug!(count = snippets.len(), "Memory snippets loaded");
        snippets
    }
}

/// Recursively gather `*.md` files under `dir`.
fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Skipping unreadable snippet directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_markdown(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            out.push(path);
        }
    }
}
