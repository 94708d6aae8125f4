//! Advisory memory for benchhand.

pub mod snippets;

pub use snippets::SnippetStore;
