//! The interactive confirmation gate.
//!
//! Every dispatch passes through a [`Confirmer`] before any process is
//! spawned. The gate is part of the safety contract around tools; the
//! auto-confirm configuration swaps in [`AutoConfirmer`] rather than
//! bypassing the seam. Interactive answers arrive through a [`LineSource`]
//! shared with the surrounding prompt loop.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

/// Decides whether a proposed tool run may proceed.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask whether the named tool may run.
    async fn confirm(&self, tool: &str) -> bool;
}

/// Confirms every run without prompting (the auto-confirm setting).
pub struct AutoConfirmer;

#[async_trait]
impl Confirmer for AutoConfirmer {
    async fn confirm(&self, tool: &str) -> bool {
        // Still tell the operator a tool is about to run unasked.
        println!("[Auto-confirm enabled] Running '{tool}' without prompt.");
        true
    }
}

type BoxedReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// A buffered line reader shared by every interactive consumer.
///
/// Operator input must flow through exactly one buffer. A second reader on
/// the same handle buffers ahead past lines it was never meant to take,
/// which loses input whenever stdin is a pipe rather than a terminal. The
/// prompt loop and [`StdinConfirmer`] therefore draw from one `LineSource`.
pub struct LineSource {
    lines: Mutex<Lines<BoxedReader>>,
}

impl LineSource {
    /// A source over the process's standard input.
    pub fn stdin() -> Arc<Self> {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// A source over any buffered reader.
    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Arc<Self> {
        let boxed: BoxedReader = Box::new(reader);
        Arc::new(Self {
            lines: Mutex::new(boxed.lines()),
        })
    }

    /// The next line, handed out in arrival order across all holders.
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

/// Prompts the operator and reads the answer from a shared [`LineSource`];
/// only an explicit "n" declines.
pub struct StdinConfirmer {
    input: Arc<LineSource>,
}

impl StdinConfirmer {
    /// Gate answering from the given source. Hand it the same source the
    /// surrounding prompt loop reads from.
    pub fn new(input: Arc<LineSource>) -> Self {
        Self { input }
    }
}

/// Whether an answer line declines the run. Anything except a trimmed,
/// case-insensitive "n" confirms, matching the `[Y]/n` prompt.
fn is_decline(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("n")
}

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, tool: &str) -> bool {
        print!("Execute tool '{tool}'? [Y]/n: ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        match self.input.next_line().await {
            Ok(Some(answer)) => !is_decline(&answer),
            // EOF or read failure declines; never run unacknowledged
            Ok(None) | Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_confirmer_always_approves() {
        assert!(AutoConfirmer.confirm("anything").await);
    }

    #[test]
    fn only_n_declines() {
        assert!(is_decline("n"));
        assert!(is_decline(" N \n"));
        assert!(!is_decline(""));
        assert!(!is_decline("y"));
        assert!(!is_decline("no"));
        assert!(!is_decline("yes"));
    }

    #[tokio::test]
    async fn prompt_loop_and_gate_share_one_buffer() {
        // A piped session delivers the command and the answer together.
        // The prompt loop takes the first line; the gate must still see
        // the second instead of hitting a drained handle.
        let source = LineSource::from_reader(BufReader::new(&b"wipe the workspace\ny\n"[..]));
        assert_eq!(
            source.next_line().await.unwrap().as_deref(),
            Some("wipe the workspace")
        );

        let gate = StdinConfirmer::new(source.clone());
        assert!(gate.confirm("wipe.sh").await);
    }

    #[tokio::test]
    async fn declining_answer_reaches_the_gate() {
        let source = LineSource::from_reader(BufReader::new(&b"clear the logs\n N \n"[..]));
        source.next_line().await.unwrap();

        let gate = StdinConfirmer::new(source);
        assert!(!gate.confirm("wipe.sh").await);
    }

    #[tokio::test]
    async fn eof_on_the_source_declines() {
        let source = LineSource::from_reader(BufReader::new(&b""[..]));
        let gate = StdinConfirmer::new(source);
        assert!(!gate.confirm("wipe.sh").await);
    }
}
