//! Completion service clients for benchhand.
//!
//! All backends implement the `benchhand_core::Provider` trait; the CLI
//! picks one from configuration.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
