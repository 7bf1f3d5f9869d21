//! Server error types.

use std::time::Duration;

use pdugate_proto::ProtocolError;
use thiserror::Error;

/// Errors that can occur in the server.
///
/// None of these represent a domain outcome: a rejected registration is a
/// 400 ack, not a `ServerError`.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// Peer sent no complete request before the read deadline
    #[error("no request within {0:?}")]
    Timeout(Duration),

    /// Malformed frame on the binary transport
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn protocol_error_is_source() {
        let err = ServerError::from(ProtocolError::UnknownOpcode(0x10));
        assert_eq!(err.to_string(), "protocol error: unknown opcode: 0x10");
        assert!(err.source().is_some());
    }

    #[test]
    fn timeout_names_deadline() {
        let err = ServerError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "no request within 10s");
    }

    #[test]
    fn io_error_maps_to_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = ServerError::from(io);
        assert!(matches!(err, ServerError::Transport(_)));
        assert!(err.source().is_none());
    }
}
