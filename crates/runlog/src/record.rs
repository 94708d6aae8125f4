//! Run log records, one structured line per model call or tool run.

use benchhand_core::provider::Usage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One auditable event, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// One completion request answered by the model service.
    ModelCall {
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },

    /// One tool subprocess run to completion (or refused before spawn).
    ToolCall {
        tool: String,
        input: serde_json::Map<String, Value>,
        output: String,
        success: bool,
    },
}

/// A run log line: the event plus the UTC timestamp stamped at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub event: RunEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_call_serializes_flat() {
        let record = RunRecord {
            timestamp: Utc::now(),
            event: RunEvent::ModelCall {
                model: "gpt-4o".into(),
                usage: Some(Usage {
                    prompt_tokens: 120,
                    completion_tokens: 8,
                    total_tokens: 128,
                }),
            },
        };
        let line = serde_json::to_string(&record).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "model_call");
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["usage"]["total_tokens"], 128);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn model_call_without_usage_omits_field() {
        let record = RunRecord {
            timestamp: Utc::now(),
            event: RunEvent::ModelCall {
                model: "gpt-4o".into(),
                usage: None,
            },
        };
        let value: Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert!(value.get("usage").is_none());
    }

    #[test]
    fn tool_call_carries_input_and_output() {
        let mut input = serde_json::Map::new();
        input.insert("directory".into(), json!(""));
        let record = RunRecord {
            timestamp: Utc::now(),
            event: RunEvent::ToolCall {
                tool: "list_directory".into(),
                input,
                output: "[\"a.txt\",\"b.txt\"]".into(),
                success: true,
            },
        };
        let value: Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(value["event"], "tool_call");
        assert_eq!(value["tool"], "list_directory");
        assert_eq!(value["input"]["directory"], "");
        assert_eq!(value["success"], true);
    }

    #[test]
    fn record_roundtrip_preserves_structure() {
        let record = RunRecord {
            timestamp: Utc::now(),
            event: RunEvent::ToolCall {
                tool: "check_capacity".into(),
                input: serde_json::Map::new(),
                output: "Current memory usage: 41.2%".into(),
                success: true,
            },
        };
        let line = serde_json::to_string(&record).unwrap();
        let back: RunRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
