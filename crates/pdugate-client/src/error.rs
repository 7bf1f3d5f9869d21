//! Client error types.

use pdugate_proto::{Opcode, ProtocolError};
use thiserror::Error;

/// Errors from client operations.
///
/// A server-side rejection carried inside an ack (400/403 status) is not an
/// error; only failures to obtain a well-formed ack are.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not connect or the connection broke mid-exchange.
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),

    /// Ack frame could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// HTTP request failed or the response body was not an ack.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server refused to parse the request.
    #[error("request rejected: {body}")]
    Rejected {
        /// Plain-text body of the rejection.
        body: String,
    },

    /// Server answered with an ack for a different request kind.
    #[error("unexpected ack: expected {expected:?}, got {actual:?}")]
    UnexpectedAck {
        /// Ack opcode matching the request.
        expected: Opcode,
        /// Ack opcode actually received.
        actual: Opcode,
    },
}
