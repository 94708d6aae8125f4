//! The Benchhand decision loop.
//!
//! Each operator turn follows the same cycle:
//!
//! 1. **Scan** the tool directory for dispatchable tools
//! 2. **Assemble** a fresh context snapshot (tools, files, memory)
//! 3. **Decide** via one model call over the snapshot and transcript
//! 4. **Interpret** the response as a tool invocation or a plain reply
//! 5. **Dispatch** validated invocations, folding results back into the
//!    transcript; relay everything else verbatim
//!
//! Nothing from a turn survives except the transcript window and the
//! append-only run log.

pub mod context;
pub mod engine;
pub mod session;

pub use context::{ContextBuilder, ContextSnapshot};
pub use engine::{DecisionEngine, SYSTEM_PROMPT};
pub use session::{Outcome, Session};
