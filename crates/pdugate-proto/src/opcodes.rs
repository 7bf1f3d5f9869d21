//! Message kind tags carried in the frame header.

use crate::errors::ProtocolError;

/// Frame opcode.
///
/// Requests live in the low range, acknowledgments set the high bit so the
/// direction of a frame is visible from its opcode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Client asks to register a subscriber.
    RegistrationRequest = 0x01,
    /// Client asks for a PDU session on a slice.
    PduSessionRequest = 0x02,
    /// Client asks to deregister a subscriber.
    DeregistrationRequest = 0x03,
    /// Server answer to [`Opcode::RegistrationRequest`].
    RegistrationAck = 0x81,
    /// Server answer to [`Opcode::PduSessionRequest`].
    PduSessionAck = 0x82,
    /// Server answer to [`Opcode::DeregistrationRequest`].
    DeregistrationAck = 0x83,
}

impl Opcode {
    const ACK_BIT: u8 = 0x80;

    /// Wire value.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// True for server-to-client opcodes.
    pub fn is_ack(self) -> bool {
        self.to_u8() & Self::ACK_BIT != 0
    }

    /// The acknowledgment opcode answering this request opcode.
    ///
    /// Returns `None` when called on an ack.
    pub fn ack(self) -> Option<Self> {
        match self {
            Self::RegistrationRequest => Some(Self::RegistrationAck),
            Self::PduSessionRequest => Some(Self::PduSessionAck),
            Self::DeregistrationRequest => Some(Self::DeregistrationAck),
            Self::RegistrationAck | Self::PduSessionAck | Self::DeregistrationAck => None,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::RegistrationRequest),
            0x02 => Ok(Self::PduSessionRequest),
            0x03 => Ok(Self::DeregistrationRequest),
            0x81 => Ok(Self::RegistrationAck),
            0x82 => Ok(Self::PduSessionAck),
            0x83 => Ok(Self::DeregistrationAck),
            other => Err(ProtocolError::UnknownOpcode(other)),
        }
    }
}
