//! Fixed-size frame header.

use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{BigEndian, U32},
};

use crate::{
    errors::{ProtocolError, Result},
    opcodes::Opcode,
};

/// Protocol magic, first four bytes of every frame.
pub const MAGIC: [u8; 4] = *b"PDUG";

/// Current protocol version.
pub const VERSION: u8 = 1;

/// Largest payload accepted on the wire (64 KiB).
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Frame header as laid out on the wire.
///
/// All fields are byte arrays or big-endian wrappers, so the struct has
/// alignment 1 and can be read straight out of a receive buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct FrameHeader {
    magic: [u8; 4],
    version: u8,
    opcode: u8,
    reserved: [u8; 2],
    payload_size: U32<BigEndian>,
}

impl FrameHeader {
    /// Encoded header size in bytes.
    pub const SIZE: usize = 12;

    /// Build a header for an outgoing frame.
    pub fn new(opcode: Opcode, payload_size: u32) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            opcode: opcode.to_u8(),
            reserved: [0; 2],
            payload_size: U32::new(payload_size),
        }
    }

    /// Parse and validate a header from the first [`FrameHeader::SIZE`] bytes
    /// of `bytes`.
    ///
    /// # Errors
    ///
    /// - `Truncated` if fewer than `SIZE` bytes are available
    /// - `InvalidMagic`, `UnsupportedVersion`, `UnknownOpcode` on a bad header
    /// - `PayloadTooLarge` if the declared payload exceeds [`MAX_PAYLOAD_SIZE`]
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(prefix) = bytes.get(..Self::SIZE) else {
            return Err(ProtocolError::Truncated { expected: Self::SIZE, actual: bytes.len() });
        };

        let header = Self::read_from_bytes(prefix)
            .map_err(|_| ProtocolError::Truncated { expected: Self::SIZE, actual: bytes.len() })?;

        if header.magic != MAGIC {
            return Err(ProtocolError::InvalidMagic { expected: MAGIC, actual: header.magic });
        }
        if header.version != VERSION {
            return Err(ProtocolError::UnsupportedVersion(header.version));
        }
        Opcode::try_from(header.opcode)?;

        let size = header.payload_size();
        if size > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge { size, max: MAX_PAYLOAD_SIZE });
        }

        Ok(header)
    }

    /// Message kind carried by this frame.
    pub fn opcode(&self) -> Result<Opcode> {
        Opcode::try_from(self.opcode)
    }

    /// Declared payload length in bytes.
    pub fn payload_size(&self) -> usize {
        self.payload_size.get() as usize
    }

    /// Raw header bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }
}
