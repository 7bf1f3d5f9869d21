//! Complete frame: header plus CBOR payload.

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::{ProtocolError, Result},
    header::{FrameHeader, MAX_PAYLOAD_SIZE},
    opcodes::Opcode,
};

/// A decoded frame.
///
/// The payload is kept as raw bytes; turning it into a typed message is the
/// job of [`Request::from_frame`](crate::Request::from_frame) and
/// [`Ack::from_frame`](crate::Ack::from_frame).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    opcode: Opcode,
    payload: Bytes,
}

impl Frame {
    /// Create a frame from an opcode and an already-encoded payload.
    pub fn new(opcode: Opcode, payload: impl Into<Bytes>) -> Self {
        Self { opcode, payload: payload.into() }
    }

    /// Create a frame by CBOR-encoding `message` as the payload.
    pub fn from_message<T: Serialize>(opcode: Opcode, message: &T) -> Result<Self> {
        let mut payload = Vec::new();
        ciborium::ser::into_writer(message, &mut payload)
            .map_err(|e| ProtocolError::Encode(e.to_string()))?;
        Ok(Self::new(opcode, payload))
    }

    /// Decode the CBOR payload as `T`.
    pub fn message<T: DeserializeOwned>(&self) -> Result<T> {
        ciborium::de::from_reader(&self.payload[..])
            .map_err(|e| ProtocolError::Decode(e.to_string()))
    }

    /// Message kind.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Header describing this frame.
    pub fn header(&self) -> Result<FrameHeader> {
        let size = self.payload.len();
        if size > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge { size, max: MAX_PAYLOAD_SIZE });
        }
        // MAX_PAYLOAD_SIZE fits in u32
        Ok(FrameHeader::new(self.opcode, size as u32))
    }

    /// Total encoded length (header + payload).
    pub fn encoded_len(&self) -> usize {
        FrameHeader::SIZE + self.payload.len()
    }

    /// Append the wire encoding of this frame to `dst`.
    ///
    /// # Errors
    ///
    /// Returns `PayloadTooLarge` if the payload exceeds [`MAX_PAYLOAD_SIZE`].
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<()> {
        let header = self.header()?;
        dst.reserve(self.encoded_len());
        dst.extend_from_slice(&header.to_bytes());
        dst.extend_from_slice(&self.payload);
        Ok(())
    }

    /// Decode one frame from the start of `bytes`. Trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// Any header validation error, or `Truncated` if the payload is
    /// incomplete.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = FrameHeader::parse(bytes)?;
        let end = FrameHeader::SIZE + header.payload_size();

        let payload = bytes
            .get(FrameHeader::SIZE..end)
            .ok_or(ProtocolError::Truncated { expected: end, actual: bytes.len() })?;

        Ok(Self { opcode: header.opcode()?, payload: Bytes::copy_from_slice(payload) })
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn encode_writes_header_then_payload() {
        let frame = Frame::new(Opcode::DeregistrationRequest, vec![0xa1, 0x00]);
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();

        assert_eq!(buf, hex!("50445547 01 03 0000 00000002 a100"));
        assert_eq!(buf.len(), frame.encoded_len());
    }

    #[test]
    fn decode_reads_what_encode_wrote() {
        let frame = Frame::new(Opcode::PduSessionAck, b"payload".to_vec());
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();

        assert_eq!(Frame::decode(&buf).unwrap(), frame);
    }

    #[test]
    fn decode_rejects_incomplete_payload() {
        let bytes = hex!("50445547 01 01 0000 00000008 a1 62 69 64");
        assert!(matches!(
            Frame::decode(&bytes),
            Err(ProtocolError::Truncated { expected: 20, actual: 16 })
        ));
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        let frame = Frame::new(Opcode::RegistrationRequest, vec![0u8; MAX_PAYLOAD_SIZE + 1]);
        let mut buf = Vec::new();
        assert!(matches!(frame.encode(&mut buf), Err(ProtocolError::PayloadTooLarge { .. })));
        assert!(buf.is_empty());
    }

    #[test]
    fn message_decode_failure_is_reported() {
        let frame = Frame::new(Opcode::RegistrationRequest, vec![0xff, 0xff]);
        let result: Result<u64> = frame.message();
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
