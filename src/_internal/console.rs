//! Operator-facing output.
//!
//! Everything the client shows the operator goes through a [`Console`], so
//! foreground commands and background subscriptions share one sink and tests
//! can record exactly what was printed.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::types::{GoalReachedNotice, WrongWayNotice};

/// Command prompt.
pub const PROMPT: &str = ">";

/// Sink for operator output.
///
/// Called from the command loop and from background subscription tasks at
/// the same time; each call must emit its text without interleaving inside
/// a single line.
pub trait Console: Send + Sync {
    /// Print one line.
    fn line(&self, text: &str);

    /// Print the prompt, without a trailing newline.
    fn prompt(&self);
}

/// Console writing to the process stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // stdout going away is not something the client can report anywhere
        let _ = writeln!(out, "{}", text);
    }

    fn prompt(&self) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{}", PROMPT);
        let _ = out.flush();
    }
}

/// Console that keeps everything in memory.
///
/// Prompts are recorded as a line containing only [`PROMPT`].
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferConsole {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Printed lines, without prompts.
    pub fn output(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line != PROMPT)
            .collect()
    }

    fn push(&self, text: String) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(text),
            Err(poisoned) => poisoned.into_inner().push(text),
        }
    }
}

impl Console for BufferConsole {
    fn line(&self, text: &str) {
        self.push(text.to_string());
    }

    fn prompt(&self) {
        self.push(PROMPT.to_string());
    }
}

// ============================================================================
// Presenters
// ============================================================================

/// Receives the events of one subscription.
pub trait EventHandler<T>: Send + Sync {
    /// Called once per event, in delivery order.
    fn on_event(&self, event: &T);
}

/// Prints wrong-way notices.
pub struct WrongWayPresenter {
    console: Arc<dyn Console>,
}

impl WrongWayPresenter {
    /// Create a presenter printing to `console`.
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

impl EventHandler<WrongWayNotice> for WrongWayPresenter {
    fn on_event(&self, event: &WrongWayNotice) {
        self.console.line(&format!("WrongWay: {}", event.message));
        // the operator is most likely sitting at a prompt
        self.console.prompt();
    }
}

/// Prints goal-reached notices.
pub struct GoalReachedPresenter {
    console: Arc<dyn Console>,
}

impl GoalReachedPresenter {
    /// Create a presenter printing to `console`.
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

impl EventHandler<GoalReachedNotice> for GoalReachedPresenter {
    fn on_event(&self, event: &GoalReachedNotice) {
        self.console.line(&format!(
            "The goal was reached in {} steps!",
            event.count
        ));
        self.console.prompt();
    }
}
