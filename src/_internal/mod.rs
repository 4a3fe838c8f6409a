//! Internal implementation details for the maze walker client.
//!
//! This module contains the building blocks behind [`MazeClient`](crate::MazeClient).
//! While exposed for tests and advanced use, the API here may change between
//! versions.

pub mod console;
pub mod dispatcher;
pub mod lifecycle;
#[allow(missing_docs, non_camel_case_types, clippy::all)]
pub mod proto;
pub mod subscription;
pub mod transport;

pub use console::{BufferConsole, Console, EventHandler, StdConsole};
pub use dispatcher::{CallDispatcher, STEP_COUNT_UNAVAILABLE};
pub use lifecycle::{SubscribeOutcome, SubscriptionController, UnsubscribeOutcome};
pub use subscription::SubscriptionSession;
pub use transport::{EventStream, GrpcTransport, MazeTransport};
