//! Unary call dispatch.
//!
//! [`CallDispatcher`] issues exactly one remote call per operation, waits for
//! the outcome and reports failures on the console as `<code>: <message>`.

use std::sync::Arc;
use tracing::debug;

use super::console::Console;
use super::transport::MazeTransport;
use crate::errors::{MazeClientError, Result};
use crate::types::Direction;

/// Step count reported to the operator when the query failed.
pub const STEP_COUNT_UNAVAILABLE: i32 = -1;

/// Issues unary calls and reports their failures.
pub struct CallDispatcher {
    transport: Arc<dyn MazeTransport>,
    console: Arc<dyn Console>,
}

impl CallDispatcher {
    /// Create a dispatcher over a shared transport.
    pub fn new(transport: Arc<dyn MazeTransport>, console: Arc<dyn Console>) -> Self {
        Self { transport, console }
    }

    /// Take one step.
    ///
    /// # Errors
    ///
    /// Returns the call failure after it has been printed.
    pub async fn go(&self, direction: Direction) -> Result<()> {
        let result = self.transport.go(direction).await;
        self.report(result)
    }

    /// Read the step count, or [`STEP_COUNT_UNAVAILABLE`] if the call failed.
    ///
    /// The failure itself is printed. Use
    /// [`try_step_count`](Self::try_step_count) to tell failure apart from
    /// the count.
    pub async fn step_count(&self) -> i32 {
        match self.try_step_count().await {
            Ok(count) => count,
            Err(e) => {
                self.print_failure(&e);
                STEP_COUNT_UNAVAILABLE
            }
        }
    }

    /// Read the step count without printing anything.
    ///
    /// # Errors
    ///
    /// Returns the call failure.
    pub async fn try_step_count(&self) -> Result<i32> {
        self.transport.step_count().await
    }

    /// Adjust the step count by `adjustment`.
    ///
    /// # Errors
    ///
    /// Returns the call failure after it has been printed.
    pub async fn adjust_step_count(&self, adjustment: i32) -> Result<()> {
        let result = self.transport.adjust_step_count(adjustment).await;
        self.report(result)
    }

    /// Ask the server to close the wrong-way stream.
    ///
    /// # Errors
    ///
    /// Returns the call failure after it has been printed.
    pub async fn unsubscribe_wrong_way(&self) -> Result<()> {
        let result = self.transport.unsubscribe_wrong_way().await;
        self.report(result)
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.print_failure(e);
        }
        result
    }

    fn print_failure(&self, err: &MazeClientError) {
        let (code, message) = err.status();
        debug!(?code, "remote call failed: {}", message);
        self.console.line(&format!("{}: {}", code as i32, message));
    }
}
