//! # pdugate Protocol: Wire Types and Framing
//!
//! This crate defines the messages exchanged between a subscriber client and
//! the pdugate server, and the binary framing used by the socket transport.
//!
//! ## Messages
//!
//! Requests and acknowledgments are closed sum types ([`Request`], [`Ack`]).
//! Each variant wraps a plain struct that is also the JSON body used by the
//! HTTP transport, so both transports carry the same shapes.
//!
//! ## Binary Framing
//!
//! ```text
//! +--------+---------+--------+----------+----------------+----------------+
//! | magic  | version | opcode | reserved | payload_size   | CBOR payload   |
//! | 4 B    | 1 B     | 1 B    | 2 B      | 4 B (BE u32)   | payload_size B |
//! +--------+---------+--------+----------+----------------+----------------+
//! ```
//!
//! - The header is parsed with [`zerocopy`](https://docs.rs/zerocopy) directly
//!   from network bytes; malformed headers are rejected before the payload is
//!   read.
//! - The opcode is the variant tag, the payload is the CBOR encoding of the
//!   variant's struct.
//! - Payloads are capped at [`MAX_PAYLOAD_SIZE`] bytes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod frame;
pub mod header;
pub mod io;
pub mod messages;
pub mod opcodes;

pub use errors::{ProtocolError, Result};
pub use frame::Frame;
pub use header::{FrameHeader, MAGIC, MAX_PAYLOAD_SIZE, VERSION};
pub use io::{read_frame, write_frame};
pub use messages::{
    Ack, DeregistrationAck, DeregistrationRequest, PduSessionAck, PduSessionRequest,
    RegistrationAck, RegistrationRequest, Request, StatusCode, SubscriberId,
};
pub use opcodes::Opcode;
