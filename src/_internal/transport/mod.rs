//! Transport layer for talking to the maze walker service.
//!
//! This module provides the [`MazeTransport`] trait for abstracting the remote
//! operations, and [`GrpcTransport`] as the concrete gRPC implementation.

mod grpc;

pub use grpc::GrpcTransport;

use async_trait::async_trait;
use std::pin::Pin;
use tokio_stream::Stream;

use crate::errors::Result;
use crate::types::{Direction, GoalReachedNotice, WrongWayNotice};

/// A server-pushed event stream.
///
/// The stream yields `Err` once if the call terminates with a non-OK status
/// and ends (`None`) when the server closes it.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'static>>;

/// Abstract transport trait for the maze walker service.
///
/// Implementations must allow independent calls to run concurrently from
/// several tasks through a shared reference.
#[async_trait]
pub trait MazeTransport: Send + Sync {
    /// Take one step in `direction`.
    async fn go(&self, direction: Direction) -> Result<()>;

    /// Read the current step count.
    async fn step_count(&self) -> Result<i32>;

    /// Add `adjustment` to the step count.
    async fn adjust_step_count(&self, adjustment: i32) -> Result<()>;

    /// Open the wrong-way notification stream.
    async fn subscribe_wrong_way(&self) -> Result<EventStream<WrongWayNotice>>;

    /// Open the goal-reached notification stream.
    async fn subscribe_goal_reached(&self) -> Result<EventStream<GoalReachedNotice>>;

    /// Ask the server to close the wrong-way stream.
    async fn unsubscribe_wrong_way(&self) -> Result<()>;
}
