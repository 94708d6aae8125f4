//! Error types for the benchhand domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all benchhand operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Run log errors ---
    #[error("Run log error: {0}")]
    Runlog(#[from] RunlogError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to write argument file for {tool_name}: {reason}")]
    ArgumentFile { tool_name: String, reason: String },

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RunlogError {
    #[error("Failed to open run log at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Failed to serialize run log record: {0}")]
    Serialize(String),

    #[error("Failed to append run log record: {0}")]
    Append(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "create_file".into(),
            reason: "spawn failed".into(),
        });
        assert!(err.to_string().contains("create_file"));
        assert!(err.to_string().contains("spawn failed"));
    }

    #[test]
    fn runlog_error_displays_correctly() {
        let err = Error::Runlog(RunlogError::Open {
            path: "/tmp/runlog.jsonl".into(),
            reason: "permission denied".into(),
        });
        assert!(err.to_string().contains("runlog.jsonl"));
        assert!(err.to_string().contains("permission denied"));
    }
}
