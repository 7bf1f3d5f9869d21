//! Registry outcome errors.
//!
//! These never cross the registry's public API as `Err`: every one is folded
//! into an acknowledgment whose message is the error's `Display` text and
//! whose status is [`RegistryError::status`].

use pdugate_proto::{StatusCode, SubscriberId};
use thiserror::Error;

/// Reasons a registry operation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Slice/service type outside 1..=255.
    #[error("Invalid SST Value. Must be between 1 and 255.")]
    InvalidSst(i64),

    /// Slice differentiator is not four hex digits.
    #[error("Invalid SD Value. Must be a 4-byte hexadecimal number.")]
    InvalidSd(String),

    /// Register called for an id that is already active.
    #[error("User Already Registered")]
    AlreadyRegistered(SubscriberId),

    /// PDU session requested by an id that is not registered.
    #[error("PDU Session Denied: ID Not Registered")]
    NotRegistered(SubscriberId),

    /// Deregister called for an id that is not active.
    #[error("Deregistration Failed: ID Not Found")]
    NotFound(SubscriberId),
}

impl RegistryError {
    /// Status code reported in the acknowledgment.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotRegistered(_) => StatusCode::Forbidden,
            Self::InvalidSst(_)
            | Self::InvalidSd(_)
            | Self::AlreadyRegistered(_)
            | Self::NotFound(_) => StatusCode::BadRequest,
        }
    }
}
