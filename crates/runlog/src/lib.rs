//! Append-only run log for benchhand.
//!
//! One JSON object per line: model calls with their token usage, tool runs
//! with their inputs and outputs. An audit trail, not a database.

pub mod record;
pub mod writer;

pub use record::{RunEvent, RunRecord};
pub use writer::RunLog;
