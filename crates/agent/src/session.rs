//! The session state machine: one operator line in, one outcome out.
//!
//! A turn moves through three stages. The caller blocks on input, then
//! `handle_line` runs deciding (context assembly plus the model call) and
//! dispatching (interpret, validate, run) and hands back the lines to
//! print. The transcript lives here and nowhere else.
//!
//! Turn-level failures are the caller's to report: print the error and
//! read the next line. Only the reserved exit words end a session.

use benchhand_core::action::{Decision, interpret};
use benchhand_core::error::Error;
use benchhand_core::manifest::validate_args;
use benchhand_core::message::{Transcript, Turn};
use benchhand_runlog::{RunEvent, RunLog};
use benchhand_toolbox::{ToolDispatcher, load_manifests};
use tracing::{info, warn};

use crate::context::ContextBuilder;
use crate::engine::DecisionEngine;

/// Reserved lines that end the session.
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Reserved line that lists dispatchable tools without a model call.
const LIST_TOOLS_COMMAND: &str = "list tools";

/// What one handled line produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The operator asked to end the session.
    Exit,

    /// Lines to show the operator; the loop continues.
    Continue(Vec<String>),
}

/// Owns the transcript and drives one full turn at a time.
pub struct Session {
    engine: DecisionEngine,
    context: ContextBuilder,
    dispatcher: ToolDispatcher,
    runlog: RunLog,
    history: Transcript,
}

impl Session {
    pub fn new(
        engine: DecisionEngine,
        context: ContextBuilder,
        dispatcher: ToolDispatcher,
        runlog: RunLog,
        max_turns: usize,
    ) -> Self {
        Self {
            engine,
            context,
            dispatcher,
            runlog,
            history: Transcript::new(max_turns),
        }
    }

    /// The retained conversation window.
    pub fn history(&self) -> &Transcript {
        &self.history
    }

    /// Process one line of operator input.
    ///
    /// Reserved commands short-circuit: the exit words end the session and
    /// the listing command reports tools without touching the model or the
    /// transcript. Everything else becomes a user turn, goes to the model,
    /// and comes back as either a verbatim reply or a tool run whose
    /// result is folded into the transcript as a system turn.
    ///
    /// An `Err` means the turn was abandoned partway; the caller reports
    /// it and keeps the session alive.
    pub async fn handle_line(&mut self, line: &str) -> Result<Outcome, Error> {
        let input = line.trim();
        if EXIT_COMMANDS.contains(&input) {
            return Ok(Outcome::Exit);
        }
        if input == LIST_TOOLS_COMMAND {
            return Ok(Outcome::Continue(self.list_tools()));
        }

        // Fresh scan every turn: tools added by earlier turns count.
        let manifests = load_manifests(self.dispatcher.tools_dir());
        let snapshot = self.context.build(&manifests);
        self.history.push(Turn::user(input));

        let raw = self.engine.decide(&self.history, &snapshot).await?;

        let mut lines = Vec::new();
        match interpret(&raw) {
            Decision::Reply(text) => lines.push(text),
            Decision::Invoke { tool, mut args } => {
                if validate_args(&tool, &mut args, &manifests) {
                    let result = self.dispatcher.run(&tool, args).await?;
                    info!(tool = %result.tool, success = result.success, "Tool dispatched");

                    lines.push(result.output.clone());
                    self.history
                        .push(Turn::system(format!("Tool execution result:\n{}", result.output)));

                    if let Err(e) = self.runlog.append(RunEvent::ToolCall {
                        tool: result.tool,
                        input: result.args,
                        output: result.output,
                        success: result.success,
                    }) {
                        warn!(error = %e, "Could not record tool call");
                    }
                } else {
                    lines.push(format!("Invalid or missing inputs for {tool}."));
                }
            }
        }

        self.history.push(Turn::assistant(raw));
        Ok(Outcome::Continue(lines))
    }

    /// Names of currently dispatchable tools, scanned fresh.
    fn list_tools(&self) -> Vec<String> {
        let manifests = load_manifests(self.dispatcher.tools_dir());
        if manifests.is_empty() {
            vec!["(no tools installed)".to_string()]
        } else {
            manifests.into_keys().collect()
        }
    }
}
