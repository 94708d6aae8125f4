//! Turn and Transcript domain types.
//!
//! These are the core value objects of a session: the operator speaks, the
//! model answers, tool results are folded back in as system turns. The
//! transcript is the only cross-turn state carried in process memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Default turn cap for a transcript's sliding window.
pub const DEFAULT_MAX_TURNS: usize = 40;

/// The role of a turn in the session transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The operator
    User,
    /// The model's reply
    Assistant,
    /// Injected instructions and tool results
    System,
}

/// A single turn in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn ID
    pub id: String,

    /// Who produced this turn
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn tagged(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::tagged(Role::User, content)
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::tagged(Role::Assistant, content)
    }

    /// Create a new system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::tagged(Role::System, content)
    }
}

/// The session transcript: an ordered sequence of turns bounded by a
/// sliding window.
///
/// Turns append at the tail; once the window cap is exceeded the oldest
/// turns are evicted from the head. The cap keeps enough recent context for
/// coherent multi-turn reasoning without letting a long session grow the
/// prompt without limit.
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl Transcript {
    /// Create an empty transcript holding at most `max_turns` turns.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns,
        }
    }

    /// Append a turn, evicting from the head once the window is full.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// Iterate turns oldest-first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turns are retained.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}
