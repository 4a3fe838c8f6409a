//! gRPC transport implementation for the maze walker service.
//!
//! This module provides the concrete implementation of the [`MazeTransport`]
//! trait on top of a tonic channel.

use async_trait::async_trait;
use std::time::Duration;
use tokio_stream::StreamExt;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, trace};

use super::{EventStream, MazeTransport};
use crate::_internal::proto::maze_walker_client::MazeWalkerClient;
use crate::_internal::proto::AdjustStepCountRequest;
use crate::errors::{MazeClientError, Result};
use crate::types::{Direction, GoalReachedNotice, MazeClientOptions, WrongWayNotice};

/// gRPC transport for the `maze.MazeWalker` service.
///
/// The channel connects lazily: the first call dials the server and a server
/// that is down shows up as an `Unavailable` status on that call rather than
/// as a construction error. Every call works on its own clone of the stub, so
/// unary calls and open streams never wait on each other.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    /// Stub shared by all calls.
    client: MazeWalkerClient<Channel>,
    /// URI the channel dials.
    uri: String,
}

impl GrpcTransport {
    /// Build a transport for the configured target.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is empty or not a valid URI.
    pub fn new(options: &MazeClientOptions) -> Result<Self> {
        let uri = options.endpoint_uri()?;
        let mut endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| {
            MazeClientError::connection_with_source(format!("invalid target '{}'", uri), e)
        })?;

        if let Some(secs) = options.connect_timeout_secs {
            endpoint = endpoint.connect_timeout(Duration::from_secs(secs));
        }

        let channel: Channel = endpoint.connect_lazy();
        debug!(uri = %uri, "created lazy gRPC channel");

        Ok(Self {
            client: MazeWalkerClient::new(channel),
            uri,
        })
    }

    /// The URI this transport dials.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn stub(&self) -> MazeWalkerClient<Channel> {
        self.client.clone()
    }
}

#[async_trait]
impl MazeTransport for GrpcTransport {
    async fn go(&self, direction: Direction) -> Result<()> {
        trace!(%direction, "sending move");
        let mut stub = self.stub();
        match direction {
            Direction::East => stub.go_east(()).await?,
            Direction::West => stub.go_west(()).await?,
            Direction::North => stub.go_north(()).await?,
            Direction::South => stub.go_south(()).await?,
        };
        Ok(())
    }

    async fn step_count(&self) -> Result<i32> {
        let reply = self.stub().step_count(()).await?;
        Ok(reply.into_inner().count)
    }

    async fn adjust_step_count(&self, adjustment: i32) -> Result<()> {
        trace!(adjustment, "sending step count adjustment");
        self.stub()
            .adjust_step_count(AdjustStepCountRequest { adjustment })
            .await?;
        Ok(())
    }

    async fn subscribe_wrong_way(&self) -> Result<EventStream<WrongWayNotice>> {
        let stream = self.stub().subscribe_wrong_way(()).await?.into_inner();
        Ok(Box::pin(stream.map(|item| {
            item.map(|ww| WrongWayNotice {
                message: ww.message,
            })
            .map_err(MazeClientError::from)
        })))
    }

    async fn subscribe_goal_reached(&self) -> Result<EventStream<GoalReachedNotice>> {
        let stream = self.stub().subscribe_goal_reached(()).await?.into_inner();
        Ok(Box::pin(stream.map(|item| {
            item.map(|reply| GoalReachedNotice { count: reply.count })
                .map_err(MazeClientError::from)
        })))
    }

    async fn unsubscribe_wrong_way(&self) -> Result<()> {
        self.stub().unsubscribe_wrong_way(()).await?;
        Ok(())
    }
}
