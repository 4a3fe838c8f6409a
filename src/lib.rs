//! # Maze Walker Client
//!
//! A client for the `maze.MazeWalker` gRPC service.
//!
//! The operator walks the maze with unary calls while two server-streaming
//! subscriptions run in the background:
//!
//! - **Wrong way**: started with `subscribe`, stopped with `unsubscribe`;
//!   at most one is active at a time.
//! - **Goal reached**: started once when the client starts and never stopped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maze_walker_client::{run_repl, MazeClient, MazeClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = MazeClient::new(Some(MazeClientOptions::new()))?;
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     run_repl(&mut client, stdin).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod errors;
mod repl;
mod types;

pub mod _internal;

// Re-export public API
pub use _internal::console::{BufferConsole, Console, StdConsole};
pub use _internal::lifecycle::{SubscribeOutcome, UnsubscribeOutcome};
pub use _internal::transport::{EventStream, GrpcTransport, MazeTransport};
pub use client::{MazeClient, MazeClientBuilder};
pub use errors::*;
pub use repl::{run_repl, HELP};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
