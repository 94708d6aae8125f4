//! # Benchhand Core
//!
//! Domain types, traits, and error definitions for the benchhand agent
//! loop. This crate has **zero framework dependencies**: it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The decision/validation seam lives here: manifests, the action
//! interpreter, and the provider trait. Implementations (HTTP backends,
//! subprocess dispatch, storage) live in their respective crates and
//! depend inward on core.

pub mod action;
pub mod error;
pub mod manifest;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use action::{Decision, interpret};
pub use error::{Error, Result};
pub use manifest::{FieldKind, FieldSpec, ToolManifest, validate_args};
pub use message::{Role, Transcript, Turn};
pub use provider::{CompletionRequest, CompletionResponse, Provider, Usage};
