//! Error types for the maze walker client.
//!
//! This module provides the error hierarchy for the failure modes the client
//! can run into: building the channel, remote calls returning a non-OK status,
//! and malformed operator input.

use std::io;
use thiserror::Error;

/// Main error type for the maze walker client.
#[derive(Error, Debug)]
pub enum MazeClientError {
    /// The channel to the maze service could not be set up.
    #[error("Connection error: {message}")]
    Connection {
        /// Detailed error message
        message: String,
        /// Underlying transport error if applicable
        #[source]
        source: Option<tonic::transport::Error>,
    },

    /// A remote call completed with a non-OK status.
    #[error("RPC failed with {code:?}: {message}")]
    Rpc {
        /// Status code returned by the server (or synthesized by the channel)
        code: tonic::Code,
        /// Status message
        message: String,
    },

    /// The operator supplied an argument that could not be parsed.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// An invalid configuration was provided.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// An IO error occurred while reading commands or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An internal error that should not normally occur.
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl MazeClientError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with the underlying transport error.
    pub fn connection_with_source(
        message: impl Into<String>,
        source: tonic::transport::Error,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an RPC error from a status code and message.
    pub fn rpc(code: tonic::Code, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Status code and message to report for this error.
    ///
    /// Errors that did not come from a remote call are reported as
    /// [`tonic::Code::Unknown`] with their display text.
    pub fn status(&self) -> (tonic::Code, String) {
        match self {
            Self::Rpc { code, message } => (*code, message.clone()),
            other => (tonic::Code::Unknown, other.to_string()),
        }
    }

    /// The status code, if this error came from a remote call.
    pub fn rpc_code(&self) -> Option<tonic::Code> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this error is a remote call failure.
    pub fn is_rpc(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }
}

impl From<tonic::Status> for MazeClientError {
    fn from(status: tonic::Status) -> Self {
        Self::Rpc {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, MazeClientError>;
