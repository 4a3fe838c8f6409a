//! Type definitions for the maze walker client.
//!
//! This module contains the operator-facing command model, the event payloads
//! pushed by the service, the subscription status types and client options.

use std::fmt;
use std::str::FromStr;

use crate::errors::{MazeClientError, Result};

/// Default address of the maze walker service.
pub const DEFAULT_TARGET: &str = "localhost:50051";

// ============================================================================
// Commands
// ============================================================================

/// Direction of a single step through the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One step east.
    East,
    /// One step west.
    West,
    /// One step north.
    North,
    /// One step south.
    South,
}

impl Direction {
    /// All directions, in the order the service lists them.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// The command keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::West => "west",
            Direction::North => "north",
            Direction::South => "south",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line of operator input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take one step in a direction.
    Move(Direction),
    /// Report the number of steps taken.
    Steps,
    /// Adjust the step count by a signed amount.
    Adjust(i32),
    /// Subscribe to wrong-way notifications.
    Subscribe,
    /// Cancel the wrong-way subscription.
    Unsubscribe,
    /// Leave the command loop.
    Exit,
    /// Anything else; holds the line as typed.
    Unknown(String),
}

impl Command {
    /// Classify one line of input.
    ///
    /// # Errors
    ///
    /// Returns [`MazeClientError::InvalidArgument`] when `adjust` is given a
    /// missing or non-numeric amount.
    pub fn parse(line: &str) -> Result<Self> {
        let raw = line.trim_end_matches(['\r', '\n']);
        let trimmed = raw.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match (head, rest.is_empty()) {
            ("east", true) => Command::Move(Direction::East),
            ("west", true) => Command::Move(Direction::West),
            ("north", true) => Command::Move(Direction::North),
            ("south", true) => Command::Move(Direction::South),
            ("steps", true) => Command::Steps,
            ("subscribe", true) => Command::Subscribe,
            ("unsubscribe", true) => Command::Unsubscribe,
            ("exit", true) => Command::Exit,
            ("adjust", true) => {
                return Err(MazeClientError::invalid_argument(
                    "missing amount for adjust",
                ))
            }
            ("adjust", false) => {
                let amount = rest.parse::<i32>().map_err(|_| {
                    MazeClientError::invalid_argument(format!("'{}' for adjust", rest))
                })?;
                Command::Adjust(amount)
            }
            _ => Command::Unknown(raw.to_string()),
        };

        Ok(command)
    }
}

impl FromStr for Command {
    type Err = MazeClientError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)
    }
}

/// What the command loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop reading commands.
    Exit,
}

// ============================================================================
// Event Payloads
// ============================================================================

/// Notice pushed when the walker took a wrong turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongWayNotice {
    /// Text supplied by the service.
    pub message: String,
}

/// Notice pushed when the walker reached the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalReachedNotice {
    /// Steps taken to reach the goal.
    pub count: i32,
}

// ============================================================================
// Subscription Types
// ============================================================================

/// The two server-streaming subscriptions offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    /// Wrong-way notifications; started and stopped on demand.
    WrongWay,
    /// Goal-reached notification; started once and never stopped.
    GoalReached,
}

impl SubscriptionKind {
    /// Name of the remote method that opens this subscription.
    pub fn rpc_name(&self) -> &'static str {
        match self {
            SubscriptionKind::WrongWay => "Subscribe_WrongWay",
            SubscriptionKind::GoalReached => "Subscribe_GoalReached",
        }
    }

    /// Line printed when the subscription ends with a failure.
    pub fn failure_message(&self) -> String {
        format!("{} rpc failed.", self.rpc_name())
    }
}

/// Terminal status of a streaming call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    /// The server closed the stream cleanly.
    Ok,
    /// The stream ended with an error, or could not be opened.
    Failed {
        /// Status code.
        code: tonic::Code,
        /// Status message.
        message: String,
    },
}

impl StreamStatus {
    /// Whether the stream finished successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, StreamStatus::Ok)
    }
}

impl From<&MazeClientError> for StreamStatus {
    fn from(err: &MazeClientError) -> Self {
        let (code, message) = err.status();
        StreamStatus::Failed { code, message }
    }
}

/// Lifecycle state of a subscription session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The subscription request has not been answered yet.
    Created,
    /// The stream is open and a read is outstanding.
    Reading,
    /// The stream ended; no further transitions happen.
    Done(StreamStatus),
}

impl SessionState {
    /// Whether the session reached its terminal state.
    pub fn is_done(&self) -> bool {
        matches!(self, SessionState::Done(_))
    }
}

// ============================================================================
// Options
// ============================================================================

/// Configuration for a [`MazeClient`](crate::MazeClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeClientOptions {
    /// Address of the service, with or without a URI scheme.
    pub target: String,
    /// Timeout for establishing the connection, in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for MazeClientOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            connect_timeout_secs: None,
        }
    }
}

impl MazeClientOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service address.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// The target as a URI tonic can dial.
    ///
    /// Plain `host:port` targets are treated as cleartext HTTP/2.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the target is empty.
    pub fn endpoint_uri(&self) -> Result<String> {
        let target = self.target.trim();
        if target.is_empty() {
            return Err(MazeClientError::configuration("target address is empty"));
        }
        if target.contains("://") {
            Ok(target.to_string())
        } else {
            Ok(format!("http://{}", target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        for direction in Direction::ALL {
            assert_eq!(
                Command::parse(direction.as_str()).unwrap(),
                Command::Move(direction)
            );
        }
    }

    #[test]
    fn test_parse_strips_line_ending() {
        assert_eq!(Command::parse("steps\r\n").unwrap(), Command::Steps);
        assert_eq!(Command::parse("  exit  ").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_adjust() {
        assert_eq!(Command::parse("adjust 5").unwrap(), Command::Adjust(5));
        assert_eq!(Command::parse("adjust -3").unwrap(), Command::Adjust(-3));
    }

    #[test]
    fn test_parse_adjust_invalid() {
        let err = Command::parse("adjust five").unwrap_err();
        assert!(matches!(err, MazeClientError::InvalidArgument { .. }));
        assert!(err.to_string().contains("'five'"));

        assert!(Command::parse("adjust").is_err());
        assert!(Command::parse("adjust 99999999999").is_err());
    }

    #[test]
    fn test_parse_unknown_keeps_line() {
        assert_eq!(
            Command::parse("jump").unwrap(),
            Command::Unknown("jump".to_string())
        );
        assert_eq!(
            Command::parse("east now").unwrap(),
            Command::Unknown("east now".to_string())
        );
    }

    #[test]
    fn test_endpoint_uri() {
        let options = MazeClientOptions::new();
        assert_eq!(options.endpoint_uri().unwrap(), "http://localhost:50051");

        let options = options.with_target("https://maze.example:443");
        assert_eq!(options.endpoint_uri().unwrap(), "https://maze.example:443");

        assert!(MazeClientOptions::new()
            .with_target("  ")
            .endpoint_uri()
            .is_err());
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            SubscriptionKind::WrongWay.failure_message(),
            "Subscribe_WrongWay rpc failed."
        );
        assert_eq!(
            SubscriptionKind::GoalReached.failure_message(),
            "Subscribe_GoalReached rpc failed."
        );
    }
}
