//! Tool discovery and execution for Benchhand.
//!
//! Tools live in one directory as executable artifacts paired with JSON
//! declaration files of the same base name. [`registry::load_manifests`]
//! scans that directory fresh on every call, and [`dispatch::ToolDispatcher`]
//! runs an approved tool as an isolated child process behind the
//! [`confirm::Confirmer`] gate.

pub mod confirm;
pub mod dispatch;
pub mod registry;

pub use confirm::{AutoConfirmer, Confirmer, LineSource, StdinConfirmer};
pub use dispatch::{ExecutionResult, ToolDispatcher};
pub use registry::load_manifests;
