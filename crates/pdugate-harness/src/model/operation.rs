//! Operations for model-based testing.
//!
//! Operations represent every request a client can make. They are generated
//! randomly by proptest (or by `arbitrary` in fuzzing) and applied to both the
//! model and the real registry.

use arbitrary::Arbitrary;
use pdugate_proto::{
    DeregistrationRequest, PduSessionRequest, RegistrationRequest, Request, StatusCode,
    SubscriberId,
};

/// Subscriber identifier (u8 keeps collisions frequent).
pub type ModelSubscriberId = u8;

/// Operations that can be applied to the system.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Register a subscriber.
    Register {
        /// Subscriber to register.
        id: ModelSubscriberId,
    },

    /// Request a PDU session.
    EstablishPduSession {
        /// Requesting subscriber.
        id: ModelSubscriberId,
        /// Slice/service type; i16 covers both valid and out-of-range values.
        sst: i16,
        /// Slice differentiator.
        sd: SmallSd,
    },

    /// Deregister a subscriber.
    Deregister {
        /// Subscriber to deregister.
        id: ModelSubscriberId,
    },
}

impl Operation {
    /// Subscriber id in the real id space.
    pub fn subscriber(&self) -> SubscriberId {
        match self {
            Self::Register { id }
            | Self::EstablishPduSession { id, .. }
            | Self::Deregister { id } => SubscriberId::from(*id),
        }
    }

    /// Wire request equivalent to this operation.
    pub fn to_request(&self) -> Request {
        let id = self.subscriber();
        match self {
            Self::Register { .. } => RegistrationRequest { id }.into(),
            Self::EstablishPduSession { sst, sd, .. } => {
                PduSessionRequest { id, sst: i64::from(*sst), sd: sd.render() }.into()
            },
            Self::Deregister { .. } => DeregistrationRequest { id }.into(),
        }
    }
}

/// Compact slice differentiator for testing.
///
/// `shape` picks which family of string to render so both valid and invalid
/// descriptors show up often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct SmallSd {
    /// String family (0-4).
    pub shape: u8,
    /// Digits to render.
    pub value: u16,
}

impl SmallSd {
    /// Expand to the string sent on the wire.
    pub fn render(&self) -> String {
        match self.shape % 5 {
            0 => format!("{:04x}", self.value),
            1 => format!("{:04X}", self.value),
            2 => format!("{:03x}", self.value & 0x0fff),
            3 => format!("{:05x}", u32::from(self.value) | 0x1_0000),
            _ => format!("g{:03x}", self.value & 0x0fff),
        }
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation was rejected.
    Error(OperationError),
}

/// Rejections the model predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Register of an id that is already registered.
    AlreadyRegistered,

    /// sst outside 1..=255.
    InvalidSst,

    /// sd not 4 hex digits.
    InvalidSd,

    /// PDU session for an unregistered id.
    NotRegistered,

    /// Deregister of an id that is not registered.
    NotFound,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationResult::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Status code the real system must report.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::Ok,
            Self::Error(OperationError::NotRegistered) => StatusCode::Forbidden,
            Self::Error(_) => StatusCode::BadRequest,
        }
    }

    /// Ack message the real system must report for `op`.
    pub fn message(&self, op: &Operation) -> &'static str {
        match (self, op) {
            (Self::Ok, Operation::Register { .. }) => "Registration Successful",
            (Self::Ok, Operation::EstablishPduSession { .. }) => "PDU Session Established",
            (Self::Ok, Operation::Deregister { .. }) => "Deregistration Successful",
            (Self::Error(OperationError::AlreadyRegistered), _) => "User Already Registered",
            (Self::Error(OperationError::InvalidSst), _) => {
                "Invalid SST Value. Must be between 1 and 255."
            },
            (Self::Error(OperationError::InvalidSd), _) => {
                "Invalid SD Value. Must be a 4-byte hexadecimal number."
            },
            (Self::Error(OperationError::NotRegistered), _) => {
                "PDU Session Denied: ID Not Registered"
            },
            (Self::Error(OperationError::NotFound), _) => "Deregistration Failed: ID Not Found",
        }
    }
}
