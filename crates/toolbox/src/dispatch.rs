//! Subprocess tool execution.
//!
//! A tool is an executable artifact in the tool directory. Arguments are
//! passed through a JSON side-channel file next to the artifact, never on
//! the command line, and the process's combined output comes back as one
//! text blob. A missing artifact, a declined confirmation, and a non-zero
//! exit are all ordinary results; the caller always gets printable text.

use std::path::{Path, PathBuf};

use benchhand_core::error::ToolError;
use benchhand_core::manifest::ARGUMENT_FILE;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::confirm::Confirmer;

/// Outcome of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Tool name as requested.
    pub tool: String,
    /// Argument mapping the tool was given.
    pub args: Map<String, Value>,
    /// Combined stdout and stderr, or the refusal text.
    pub output: String,
    /// False for missing artifacts, declined runs, and non-zero exits.
    pub success: bool,
}

/// Runs tools as isolated child processes behind a confirmation gate.
pub struct ToolDispatcher {
    tools_dir: PathBuf,
    confirmer: Box<dyn Confirmer>,
}

impl ToolDispatcher {
    pub fn new(tools_dir: impl Into<PathBuf>, confirmer: Box<dyn Confirmer>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
            confirmer,
        }
    }

    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Execute one tool and wait for it to exit.
    ///
    /// Only infrastructure failures (argument file unwritable, spawn
    /// refused by the OS) surface as `Err`. Everything a tool itself can
    /// get wrong comes back as an [`ExecutionResult`] with `success:
    /// false` and a message the operator can read.
    pub async fn run(
        &self,
        tool: &str,
        args: Map<String, Value>,
    ) -> Result<ExecutionResult, ToolError> {
        let artifact = self.tools_dir.join(tool);
        if !artifact.exists() {
            return Ok(ExecutionResult {
                tool: tool.to_string(),
                args,
                output: format!("Tool not found: {tool}"),
                success: false,
            });
        }

        if !self.confirmer.confirm(tool).await {
            debug!(tool, "operator declined, nothing spawned");
            return Ok(ExecutionResult {
                tool: tool.to_string(),
                args,
                output: "Execution aborted.".to_string(),
                success: false,
            });
        }

        if !args.is_empty() {
            let payload =
                serde_json::to_string_pretty(&args).map_err(|e| ToolError::ArgumentFile {
                    tool_name: tool.to_string(),
                    reason: e.to_string(),
                })?;
            tokio::fs::write(self.tools_dir.join(ARGUMENT_FILE), payload)
                .await
                .map_err(|e| ToolError::ArgumentFile {
                    tool_name: tool.to_string(),
                    reason: e.to_string(),
                })?;
        }

        let mut command = match interpreter_for(&artifact) {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(&artifact);
                command
            }
            None => Command::new(&artifact),
        };
        command.current_dir(&self.tools_dir);

        debug!(tool, "spawning tool process");
        let output = command
            .output()
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: tool.to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{stdout}{stderr}").trim().to_string();

        if output.status.success() {
            Ok(ExecutionResult {
                tool: tool.to_string(),
                args,
                output: combined,
                success: true,
            })
        } else {
            let code = output.status.code().unwrap_or(-1);
            warn!(tool, code, "tool exited with failure");
            Ok(ExecutionResult {
                tool: tool.to_string(),
                args,
                output: format!("[ERROR in {tool}]\n{combined}"),
                success: false,
            })
        }
    }
}

/// Interpreter for a tool artifact, by extension. Native binaries and
/// extensionless artifacts run directly.
fn interpreter_for(artifact: &Path) -> Option<&'static str> {
    match artifact.extension().and_then(|e| e.to_str()) {
        Some("py") => Some("python3"),
        Some("sh") => Some("sh"),
        _ => None,
    }
}
