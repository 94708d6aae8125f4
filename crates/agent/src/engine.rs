//! The decision call: one completion per operator turn.

use std::sync::Arc;

use benchhand_core::error::ProviderError;
use benchhand_core::message::{Transcript, Turn};
use benchhand_core::provider::{CompletionRequest, Provider};
use benchhand_runlog::{RunEvent, RunLog};
use tracing::{debug, warn};

use crate::context::ContextSnapshot;

/// Standing instructions sent ahead of every decision. The protocol line
/// is the load-bearing part: a tool action must come back as bare JSON
/// with "tool" and "input" keys, anything else is read as a plain reply.
pub const SYSTEM_PROMPT: &str = "\
You are Benchhand, a sharp and pragmatic autonomous operator agent.
Your job is to orchestrate local tool usage and keep the workspace tidy.
You always prioritize correctness, clarity, and cost-efficiency.

If a request clearly maps to a known tool and you have all required parameters, respond ONLY with:
{\"action\": \"run_tool\", \"tool\": \"<tool_name>\", \"input\": {...}}

Only invoke a tool when the request is a command or task that cannot be answered directly.
Do not use tools for acknowledgments, confirmations, or obviously inferable answers.

Never include explanation, commentary, or any extra text.
Never wrap the JSON in code blocks or quotes.

Use the tool context below to ground every decision.";

/// Marker between the standing instructions and the serialized snapshot.
const CONTEXT_HEADER: &str = "[TOOL CONTEXT]";

/// Drives the model call for each turn and accounts for its cost.
pub struct DecisionEngine {
    provider: Arc<dyn Provider>,
    model: String,
    runlog: RunLog,
}

impl DecisionEngine {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, runlog: RunLog) -> Self {
        Self {
            provider,
            model: model.into(),
            runlog,
        }
    }

    /// Ask the model what to do with the conversation so far.
    ///
    /// Sends the standing instructions plus the serialized snapshot as the
    /// system turn, followed by the whole transcript, at temperature 0.
    /// Returns the top completion's text verbatim. A usage record is
    /// appended for every response received, parseable or not; transport
    /// errors propagate to the caller and leave no record, since no
    /// tokens were billed.
    pub async fn decide(
        &self,
        history: &Transcript,
        context: &ContextSnapshot,
    ) -> Result<String, ProviderError> {
        let context_block = match serde_json::to_string_pretty(context) {
            Ok(block) => block,
            Err(e) => {
                warn!(error = %e, "Context serialization failed, deciding without it");
                String::new()
            }
        };
        let system = format!("{SYSTEM_PROMPT}\n\n{CONTEXT_HEADER}\n{context_block}");

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Turn::system(system));
        messages.extend(history.turns().cloned());

        debug!(
            model = %self.model,
            turns = history.len(),
            tools = context.tools.len(),
            "Requesting decision"
        );

        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.model.clone(),
                messages,
                temperature: 0.0,
            })
            .await?;

        if let Err(e) = self.runlog.append(RunEvent::ModelCall {
            model: response.model.clone(),
            usage: response.usage,
        }) {
            warn!(error = %e, "Could not record model call usage");
        }

        Ok(response.text)
    }
}
