//! Append-only JSONL writer.
//!
//! The running process only ever writes this file: records are never read
//! back, rotated, or compacted. Unbounded growth is a documented
//! limitation of the log, not of the session.

use crate::record::{RunEvent, RunRecord};
use benchhand_core::error::RunlogError;
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle on the append-only run log file.
///
/// Each append opens, writes one line, and closes, so the handle itself
/// carries no state and is freely shareable.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Create a handle writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this log appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, stamped with the write-time UTC timestamp.
    pub fn append(&self, event: RunEvent) -> Result<(), RunlogError> {
        let record = RunRecord {
            timestamp: Utc::now(),
            event,
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| RunlogError::Serialize(e.to_string()))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RunlogError::Open {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        writeln!(file, "{line}").map_err(|e| RunlogError::Append(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchhand_core::provider::Usage;
    use serde_json::json;

    #[test]
    fn append_then_reparse_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("runlog.jsonl"));

        log.append(RunEvent::ModelCall {
            model: "gpt-4o".into(),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 2,
                total_tokens: 12,
            }),
        })
        .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let record: RunRecord = serde_json::from_str(content.trim()).unwrap();
        match record.event {
            RunEvent::ModelCall { model, usage } => {
                assert_eq!(model, "gpt-4o");
                assert_eq!(usage.unwrap().total_tokens, 12);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn records_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("runlog.jsonl"));

        log.append(RunEvent::ModelCall {
            model: "gpt-4o".into(),
            usage: None,
        })
        .unwrap();
        let mut input = serde_json::Map::new();
        input.insert("directory".into(), json!(""));
        log.append(RunEvent::ToolCall {
            tool: "list_directory".into(),
            input,
            output: "[]".into(),
            success: true,
        })
        .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"event\":\"model_call\""));
        assert!(lines[1].contains("\"event\":\"tool_call\""));
    }

    #[test]
    fn timestamps_are_monotonic_per_writer() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("runlog.jsonl"));
        for _ in 0..3 {
            log.append(RunEvent::ModelCall {
                model: "m".into(),
                usage: None,
            })
            .unwrap();
        }
        let content = std::fs::read_to_string(log.path()).unwrap();
        let stamps: Vec<chrono::DateTime<Utc>> = content
            .lines()
            .map(|l| serde_json::from_str::<RunRecord>(l).unwrap().timestamp)
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn missing_parent_directory_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::new(dir.path().join("nope").join("runlog.jsonl"));
        let err = log
            .append(RunEvent::ModelCall {
                model: "m".into(),
                usage: None,
            })
            .unwrap_err();
        assert!(matches!(err, RunlogError::Open { .. }));
    }
}
