//! Interpretation of raw model output into a session decision.
//!
//! The decision protocol recognizes exactly one structured shape: a JSON
//! object carrying a string `tool` and an object `input`. Everything else,
//! including partially structured objects, is a plain reply relayed to the
//! operator verbatim.

use serde_json::Value;

/// The parsed intent of one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Ordinary free text, shown to the operator unchanged.
    Reply(String),

    /// A proposed tool invocation, pending validation.
    Invoke {
        tool: String,
        args: serde_json::Map<String, Value>,
    },
}

/// Interpret one raw model response.
///
/// A response counts as an invocation only when the whole text parses as a
/// JSON object with both a string `tool` and an object `input`. A failed
/// parse is the normal path for conversational answers, not an error.
pub fn interpret(raw: &str) -> Decision {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return Decision::Reply(raw.to_string());
    };
    let Some(obj) = value.as_object() else {
        return Decision::Reply(raw.to_string());
    };
    let (Some(tool), Some(args)) = (
        obj.get("tool").and_then(Value::as_str),
        obj.get("input").and_then(Value::as_object),
    ) else {
        return Decision::Reply(raw.to_string());
    };
    Decision::Invoke {
        tool: tool.to_string(),
        args: args.clone(),
    }
}
