//! Protocol error types.

use thiserror::Error;

use crate::opcodes::Opcode;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding, decoding, or transporting frames.
///
/// None of these ever reach the session registry: a frame that fails to
/// decode is dropped by the transport adapter.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Header does not start with the protocol magic.
    #[error("invalid magic: expected {expected:02x?}, got {actual:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Magic bytes found in the header.
        actual: [u8; 4],
    },

    /// Header carries a version this implementation does not speak.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// Opcode byte is not a known message kind.
    #[error("unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Opcode is valid but not allowed in this direction (e.g. an ack sent to
    /// the server).
    #[error("unexpected opcode {0:?}")]
    UnexpectedOpcode(Opcode),

    /// Declared payload exceeds the protocol limit.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Declared payload size.
        size: usize,
        /// Maximum allowed payload size.
        max: usize,
    },

    /// Buffer ended before the full frame was available.
    #[error("frame truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// CBOR payload could not be encoded.
    #[error("payload encode failed: {0}")]
    Encode(String),

    /// CBOR payload could not be decoded into the expected message.
    #[error("payload decode failed: {0}")]
    Decode(String),

    /// Underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
