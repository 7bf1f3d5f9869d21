//! Property tests for frame decoding.
//!
//! Decoding is the first thing that touches untrusted bytes, so it must never
//! panic and must never accept a frame that was not produced by the encoder.

use pdugate_proto::{
    Ack, DeregistrationRequest, Frame, FrameHeader, PduSessionRequest, ProtocolError,
    RegistrationRequest, Request, StatusCode,
};
use proptest::prelude::*;

fn request_strategy() -> impl Strategy<Value = Request> {
    prop_oneof![
        any::<i64>().prop_map(|id| Request::Registration(RegistrationRequest { id })),
        (any::<i64>(), any::<i64>(), "[0-9a-zA-Z]{0,8}").prop_map(|(id, sst, sd)| {
            Request::PduSession(PduSessionRequest { id, sst, sd })
        }),
        any::<i64>().prop_map(|id| Request::Deregistration(DeregistrationRequest { id })),
    ]
}

proptest! {
    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(frame) = Frame::decode(&bytes) {
            let _ = Request::from_frame(&frame);
            let _ = Ack::from_frame(&frame);
        }
    }

    #[test]
    fn prop_encoded_request_decodes_to_same_request(request in request_strategy()) {
        let mut buf = Vec::new();
        request.to_frame().unwrap().encode(&mut buf).unwrap();

        let frame = Frame::decode(&buf).unwrap();
        prop_assert_eq!(Request::from_frame(&frame).unwrap(), request);
    }

    #[test]
    fn prop_truncated_frame_rejected(request in request_strategy(), cut in 1usize..12) {
        let mut buf = Vec::new();
        request.to_frame().unwrap().encode(&mut buf).unwrap();
        buf.truncate(buf.len().saturating_sub(cut));

        let is_truncated = matches!(Frame::decode(&buf), Err(ProtocolError::Truncated { .. }));
        prop_assert!(is_truncated);
    }

    #[test]
    fn prop_corrupted_magic_rejected(
        request in request_strategy(),
        idx in 0usize..4,
        flip in 1u8..
    ) {
        let mut buf = Vec::new();
        request.to_frame().unwrap().encode(&mut buf).unwrap();
        buf[idx] ^= flip;

        let is_bad_magic = matches!(Frame::decode(&buf), Err(ProtocolError::InvalidMagic { .. }));
        prop_assert!(is_bad_magic);
    }
}

#[test]
fn header_size_constant() {
    assert_eq!(FrameHeader::SIZE, 12);
}

#[test]
fn status_codes_are_the_closed_set() {
    let codes: Vec<u16> = [StatusCode::Ok, StatusCode::BadRequest, StatusCode::Forbidden]
        .iter()
        .map(|s| s.as_u16())
        .collect();
    assert_eq!(codes, vec![200, 400, 403]);
}
