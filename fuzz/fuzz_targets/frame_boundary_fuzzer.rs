//! Fuzz target for frame decoding
//!
//! # Strategy
//!
//! - Raw bytes straight into `Frame::decode`
//! - Anything that decodes is pushed through `Request::from_frame` and
//!   `Ack::from_frame`
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - A decoded frame never claims more payload than `MAX_PAYLOAD_SIZE`
//! - A frame decodes as a request or as an ack, never both
//! - Re-encoding a decoded frame reproduces the consumed prefix, reserved
//!   bytes aside

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdugate_proto::{Ack, Frame, FrameHeader, MAX_PAYLOAD_SIZE, Request};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = Frame::decode(data) else {
        return;
    };

    assert!(frame.payload().len() <= MAX_PAYLOAD_SIZE);

    let mut encoded = Vec::new();
    frame.encode(&mut encoded).expect("decoded frame must re-encode");
    assert_eq!(encoded.len(), FrameHeader::SIZE + frame.payload().len());
    // Reserved bytes (offsets 6..8) are ignored on decode and zeroed on encode
    assert_eq!(&encoded[..6], &data[..6]);
    assert_eq!(&encoded[8..], &data[8..encoded.len()]);

    let as_request = Request::from_frame(&frame);
    let as_ack = Ack::from_frame(&frame);
    assert!(!(as_request.is_ok() && as_ack.is_ok()), "frame decoded in both directions");

    if let Ok(request) = as_request {
        assert_eq!(request.opcode(), frame.opcode());
    }
    if let Ok(ack) = as_ack {
        assert_eq!(ack.opcode(), frame.opcode());
    }
});
