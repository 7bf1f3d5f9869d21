//! Request and acknowledgment messages.
//!
//! Every request kind has exactly one acknowledgment kind. Domain outcomes
//! (success, validation failure, denial) are carried as a [`StatusCode`] plus
//! a human-readable message inside the ack; they are never protocol errors.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{
    errors::{ProtocolError, Result},
    frame::Frame,
    opcodes::Opcode,
};

/// Externally supplied subscriber identifier.
pub type SubscriberId = i64;

/// Status carried by every acknowledgment.
///
/// Closed set: the server never emits any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u16)]
pub enum StatusCode {
    /// Operation completed.
    Ok = 200,
    /// Validation failure or conflicting subscriber state.
    BadRequest = 400,
    /// Operation requires a prior registration.
    Forbidden = 403,
}

impl StatusCode {
    /// Numeric value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// True for [`StatusCode::Ok`].
    pub fn is_success(self) -> bool {
        self == Self::Ok
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Register a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Subscriber to register.
    pub id: SubscriberId,
}

/// Establish a PDU session on a network slice.
///
/// `sst` and `sd` are carried unvalidated; range and format checks belong to
/// the session registry so that every transport applies the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PduSessionRequest {
    /// Requesting subscriber.
    pub id: SubscriberId,
    /// Slice/service type.
    pub sst: i64,
    /// Slice differentiator, expected as four hex digits.
    pub sd: String,
}

/// Deregister a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeregistrationRequest {
    /// Subscriber to deregister.
    pub id: SubscriberId,
}

/// Answer to a [`RegistrationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationAck {
    /// Subscriber the request was about.
    pub id: SubscriberId,
    /// Outcome.
    pub status: StatusCode,
    /// Human-readable outcome.
    pub message: String,
}

/// Answer to a [`PduSessionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PduSessionAck {
    /// Subscriber the request was about.
    pub id: SubscriberId,
    /// Assigned PDU session id, present only on success.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pdu_id: Option<u8>,
    /// Outcome.
    pub status: StatusCode,
    /// Human-readable outcome.
    pub message: String,
}

/// Answer to a [`DeregistrationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeregistrationAck {
    /// Subscriber the request was about.
    pub id: SubscriberId,
    /// Outcome.
    pub status: StatusCode,
    /// Human-readable outcome.
    pub message: String,
}

/// Any client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Register a subscriber.
    Registration(RegistrationRequest),
    /// Establish a PDU session.
    PduSession(PduSessionRequest),
    /// Deregister a subscriber.
    Deregistration(DeregistrationRequest),
}

impl Request {
    /// Subscriber the request is about.
    pub fn id(&self) -> SubscriberId {
        match self {
            Self::Registration(req) => req.id,
            Self::PduSession(req) => req.id,
            Self::Deregistration(req) => req.id,
        }
    }

    /// Opcode used on the binary transport.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Registration(_) => Opcode::RegistrationRequest,
            Self::PduSession(_) => Opcode::PduSessionRequest,
            Self::Deregistration(_) => Opcode::DeregistrationRequest,
        }
    }

    /// Opcode of the ack that answers this request.
    pub fn ack_opcode(&self) -> Opcode {
        match self {
            Self::Registration(_) => Opcode::RegistrationAck,
            Self::PduSession(_) => Opcode::PduSessionAck,
            Self::Deregistration(_) => Opcode::DeregistrationAck,
        }
    }

    /// Encode as a binary frame.
    pub fn to_frame(&self) -> Result<Frame> {
        match self {
            Self::Registration(req) => Frame::from_message(self.opcode(), req),
            Self::PduSession(req) => Frame::from_message(self.opcode(), req),
            Self::Deregistration(req) => Frame::from_message(self.opcode(), req),
        }
    }

    /// Decode from a binary frame.
    ///
    /// # Errors
    ///
    /// `UnexpectedOpcode` if the frame carries an ack, `Decode` if the payload
    /// does not match the opcode's message.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        match frame.opcode() {
            Opcode::RegistrationRequest => frame.message().map(Self::Registration),
            Opcode::PduSessionRequest => frame.message().map(Self::PduSession),
            Opcode::DeregistrationRequest => frame.message().map(Self::Deregistration),
            op @ (Opcode::RegistrationAck | Opcode::PduSessionAck | Opcode::DeregistrationAck) => {
                Err(ProtocolError::UnexpectedOpcode(op))
            },
        }
    }
}

impl From<RegistrationRequest> for Request {
    fn from(req: RegistrationRequest) -> Self {
        Self::Registration(req)
    }
}

impl From<PduSessionRequest> for Request {
    fn from(req: PduSessionRequest) -> Self {
        Self::PduSession(req)
    }
}

impl From<DeregistrationRequest> for Request {
    fn from(req: DeregistrationRequest) -> Self {
        Self::Deregistration(req)
    }
}

/// Any server acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    /// Registration outcome.
    Registration(RegistrationAck),
    /// PDU session outcome.
    PduSession(PduSessionAck),
    /// Deregistration outcome.
    Deregistration(DeregistrationAck),
}

impl Ack {
    /// Subscriber the ack is about.
    pub fn id(&self) -> SubscriberId {
        match self {
            Self::Registration(ack) => ack.id,
            Self::PduSession(ack) => ack.id,
            Self::Deregistration(ack) => ack.id,
        }
    }

    /// Outcome status.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Registration(ack) => ack.status,
            Self::PduSession(ack) => ack.status,
            Self::Deregistration(ack) => ack.status,
        }
    }

    /// Human-readable outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Registration(ack) => &ack.message,
            Self::PduSession(ack) => &ack.message,
            Self::Deregistration(ack) => &ack.message,
        }
    }

    /// Opcode used on the binary transport.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Registration(_) => Opcode::RegistrationAck,
            Self::PduSession(_) => Opcode::PduSessionAck,
            Self::Deregistration(_) => Opcode::DeregistrationAck,
        }
    }

    /// Encode as a binary frame.
    pub fn to_frame(&self) -> Result<Frame> {
        match self {
            Self::Registration(ack) => Frame::from_message(self.opcode(), ack),
            Self::PduSession(ack) => Frame::from_message(self.opcode(), ack),
            Self::Deregistration(ack) => Frame::from_message(self.opcode(), ack),
        }
    }

    /// Decode from a binary frame.
    ///
    /// # Errors
    ///
    /// `UnexpectedOpcode` if the frame carries a request, `Decode` if the
    /// payload does not match the opcode's message.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        match frame.opcode() {
            Opcode::RegistrationAck => frame.message().map(Self::Registration),
            Opcode::PduSessionAck => frame.message().map(Self::PduSession),
            Opcode::DeregistrationAck => frame.message().map(Self::Deregistration),
            op @ (Opcode::RegistrationRequest
            | Opcode::PduSessionRequest
            | Opcode::DeregistrationRequest) => Err(ProtocolError::UnexpectedOpcode(op)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdu_request() -> PduSessionRequest {
        PduSessionRequest { id: 5, sst: 10, sd: "00ab".to_string() }
    }

    #[test]
    fn request_frame_carries_variant_tag() {
        let request = Request::from(pdu_request());
        let frame = request.to_frame().unwrap();

        assert_eq!(frame.opcode(), Opcode::PduSessionRequest);
        assert_eq!(Request::from_frame(&frame).unwrap(), request);
        assert_eq!(Some(request.ack_opcode()), request.opcode().ack());
    }

    #[test]
    fn ack_frame_rejected_as_request() {
        let ack = Ack::Registration(RegistrationAck {
            id: 1,
            status: StatusCode::Ok,
            message: "Registration Successful".to_string(),
        });
        let frame = ack.to_frame().unwrap();

        assert!(matches!(
            Request::from_frame(&frame),
            Err(ProtocolError::UnexpectedOpcode(Opcode::RegistrationAck))
        ));
    }

    #[test]
    fn request_frame_rejected_as_ack() {
        let frame = Request::from(DeregistrationRequest { id: 9 }).to_frame().unwrap();
        assert!(matches!(
            Ack::from_frame(&frame),
            Err(ProtocolError::UnexpectedOpcode(Opcode::DeregistrationRequest))
        ));
    }

    #[test]
    fn mismatched_payload_is_decode_error() {
        // Registration payload under the PDU session opcode lacks sst/sd.
        let frame = Frame::from_message(Opcode::PduSessionRequest, &RegistrationRequest { id: 3 })
            .unwrap();
        assert!(matches!(Request::from_frame(&frame), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn pdu_ack_without_pdu_id_survives_cbor() {
        let ack = Ack::PduSession(PduSessionAck {
            id: 5,
            pdu_id: None,
            status: StatusCode::Forbidden,
            message: "PDU Session Denied: ID Not Registered".to_string(),
        });
        let frame = ack.to_frame().unwrap();
        assert_eq!(Ack::from_frame(&frame).unwrap(), ack);
    }

    #[test]
    fn status_code_serializes_as_number() {
        assert_eq!(serde_json::to_string(&StatusCode::Forbidden).unwrap(), "403");
        let parsed: StatusCode = serde_json::from_str("400").unwrap();
        assert_eq!(parsed, StatusCode::BadRequest);
        assert!(serde_json::from_str::<StatusCode>("500").is_err());
    }

    #[test]
    fn pdu_ack_json_body() {
        let ack = PduSessionAck {
            id: 5,
            pdu_id: Some(7),
            status: StatusCode::Ok,
            message: "PDU Session Established".to_string(),
        };
        insta::assert_snapshot!(
            serde_json::to_string(&ack).unwrap(),
            @r#"{"id":5,"pdu_id":7,"status":200,"message":"PDU Session Established"}"#
        );
    }

    #[test]
    fn denied_pdu_ack_json_omits_pdu_id() {
        let ack = PduSessionAck {
            id: 5,
            pdu_id: None,
            status: StatusCode::BadRequest,
            message: "Invalid SST Value. Must be between 1 and 255.".to_string(),
        };
        insta::assert_snapshot!(
            serde_json::to_string(&ack).unwrap(),
            @r#"{"id":5,"status":400,"message":"Invalid SST Value. Must be between 1 and 255."}"#
        );
    }

    #[test]
    fn pdu_request_json_body() {
        let parsed: PduSessionRequest =
            serde_json::from_str(r#"{"id":5,"sst":10,"sd":"00ab"}"#).unwrap();
        assert_eq!(parsed, pdu_request());
    }

    #[test]
    fn ack_accessors() {
        let ack = Ack::Deregistration(DeregistrationAck {
            id: 4,
            status: StatusCode::BadRequest,
            message: "Deregistration Failed: ID Not Found".to_string(),
        });
        assert_eq!(ack.id(), 4);
        assert_eq!(ack.status(), StatusCode::BadRequest);
        assert_eq!(ack.message(), "Deregistration Failed: ID Not Found");
        assert_eq!(ack.opcode(), Opcode::DeregistrationAck);
    }
}
