//! Maze walker client.
//!
//! This module provides [`MazeClient`], the facade tying together the unary
//! call dispatcher, the subscription controller and the console. It supports:
//!
//! - Moving through the maze and reading/adjusting the step count
//! - Subscribing to and unsubscribing from wrong-way notifications
//! - A goal-reached listener running for the lifetime of the client

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::_internal::console::{Console, StdConsole};
use crate::_internal::dispatcher::CallDispatcher;
use crate::_internal::lifecycle::{SubscribeOutcome, SubscriptionController, UnsubscribeOutcome};
use crate::_internal::transport::{GrpcTransport, MazeTransport};
use crate::errors::Result;
use crate::types::*;

/// Client for the maze walker service.
///
/// # Examples
///
/// ```rust,no_run
/// use maze_walker_client::{Direction, MazeClient, MazeClientOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = MazeClientOptions::new().with_target("localhost:50051");
///     let mut client = MazeClient::new(Some(options))?;
///     client.start();
///
///     client.go(Direction::North).await.ok();
///     println!("Steps so far: {}", client.step_count().await);
///     Ok(())
/// }
/// ```
pub struct MazeClient {
    /// Unary calls.
    dispatcher: Arc<CallDispatcher>,
    /// Background subscriptions.
    controller: SubscriptionController,
    /// Operator output.
    console: Arc<dyn Console>,
    /// Goal-reached listener, once started.
    goal_reached: Option<JoinHandle<StreamStatus>>,
}

impl MazeClient {
    /// Create a client talking gRPC to the configured target and printing to
    /// stdout.
    ///
    /// The connection is made lazily by the first call. Must be called from
    /// within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the target address is invalid.
    pub fn new(options: Option<MazeClientOptions>) -> Result<Self> {
        let options = options.unwrap_or_default();
        let transport = GrpcTransport::new(&options)?;
        Ok(Self::with_transport(Arc::new(transport), Arc::new(StdConsole)))
    }

    /// Create a client over any transport and console.
    pub fn with_transport(transport: Arc<dyn MazeTransport>, console: Arc<dyn Console>) -> Self {
        let dispatcher = Arc::new(CallDispatcher::new(
            Arc::clone(&transport),
            Arc::clone(&console),
        ));
        let controller =
            SubscriptionController::new(transport, Arc::clone(&dispatcher), Arc::clone(&console));

        Self {
            dispatcher,
            controller,
            console,
            goal_reached: None,
        }
    }

    /// Start listening for the goal-reached notification.
    ///
    /// Only the first call has an effect.
    pub fn start(&mut self) {
        if self.goal_reached.is_none() {
            self.goal_reached = Some(self.controller.start_goal_reached());
            debug!("goal-reached listener started");
        }
    }

    /// Whether the goal-reached listener was started.
    pub fn is_started(&self) -> bool {
        self.goal_reached.is_some()
    }

    /// Run one command.
    pub async fn execute(&self, command: &Command) -> Flow {
        match command {
            Command::Move(direction) => {
                let _ = self.go(*direction).await;
            }
            Command::Steps => {
                let count = self.step_count().await;
                self.console.line(&format!("Step count: {}", count));
            }
            Command::Adjust(amount) => {
                let _ = self.adjust_step_count(*amount).await;
            }
            Command::Subscribe => {
                let _ = self.subscribe();
            }
            Command::Unsubscribe => {
                let _ = self.unsubscribe().await;
            }
            Command::Exit => return Flow::Exit,
            Command::Unknown(line) => {
                self.console.line(&format!("Unknown command '{}'", line));
            }
        }
        Flow::Continue
    }

    /// Take one step. Failures are printed and returned.
    ///
    /// # Errors
    ///
    /// Returns the call failure.
    pub async fn go(&self, direction: Direction) -> Result<()> {
        self.dispatcher.go(direction).await
    }

    /// Read the step count; `-1` if the call failed.
    pub async fn step_count(&self) -> i32 {
        self.dispatcher.step_count().await
    }

    /// Read the step count as an explicit result.
    ///
    /// # Errors
    ///
    /// Returns the call failure.
    pub async fn try_step_count(&self) -> Result<i32> {
        self.dispatcher.try_step_count().await
    }

    /// Adjust the step count. Failures are printed and returned.
    ///
    /// # Errors
    ///
    /// Returns the call failure.
    pub async fn adjust_step_count(&self, adjustment: i32) -> Result<()> {
        self.dispatcher.adjust_step_count(adjustment).await
    }

    /// Subscribe to wrong-way notifications.
    pub fn subscribe(&self) -> SubscribeOutcome {
        self.controller.subscribe()
    }

    /// Cancel the wrong-way subscription.
    pub async fn unsubscribe(&self) -> UnsubscribeOutcome {
        self.controller.unsubscribe().await
    }

    /// Whether a wrong-way subscription is active.
    pub fn is_subscribed(&self) -> bool {
        self.controller.is_subscribed()
    }

    /// The console this client prints to.
    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }
}

/// Builder for creating a [`MazeClient`] with configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use maze_walker_client::MazeClientBuilder;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MazeClientBuilder::new()
///         .target("maze.internal:50051")
///         .connect_timeout_secs(5)
///         .build()?;
///     println!("{}", client.step_count().await);
///     Ok(())
/// }
/// ```
pub struct MazeClientBuilder {
    options: MazeClientOptions,
    console: Option<Arc<dyn Console>>,
}

impl MazeClientBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: MazeClientOptions::new(),
            console: None,
        }
    }

    /// Set the service address.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.options.target = target.into();
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.options.connect_timeout_secs = Some(secs);
        self
    }

    /// Print to `console` instead of stdout.
    pub fn console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    /// Build the client over gRPC.
    ///
    /// # Errors
    ///
    /// Returns an error if the target address is invalid.
    pub fn build(self) -> Result<MazeClient> {
        let transport = GrpcTransport::new(&self.options)?;
        let console = self
            .console
            .unwrap_or_else(|| Arc::new(StdConsole) as Arc<dyn Console>);
        Ok(MazeClient::with_transport(Arc::new(transport), console))
    }
}

impl Default for MazeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
