//! Session Registry
//!
//! Owns subscriber registration state and the three request handlers.
//!
//! ## Responsibilities
//!
//! - Registration set: an id is a member iff it was registered and not yet
//!   deregistered
//! - Validation: slice descriptor rules and the registration gate for PDU
//!   sessions
//! - Acknowledgments: every outcome, success or not, becomes a typed ack
//!
//! ## Design
//!
//! - No I/O: transports decode requests, call in, and encode the returned ack
//! - Not thread-safe by itself: wrap in
//!   [`SharedRegistry`](crate::SharedRegistry) when more than one task needs
//!   access
//! - PDU session ids are drawn from the environment and never tracked

use std::collections::HashSet;

use pdugate_proto::{
    Ack, DeregistrationAck, PduSessionAck, RegistrationAck, Request, StatusCode, SubscriberId,
};

use crate::{env::Environment, error::RegistryError, slice::SliceDescriptor};

/// Ack message for a successful registration.
pub const REGISTRATION_SUCCESSFUL: &str = "Registration Successful";

/// Ack message for an established PDU session.
pub const PDU_SESSION_ESTABLISHED: &str = "PDU Session Established";

/// Ack message for a successful deregistration.
pub const DEREGISTRATION_SUCCESSFUL: &str = "Deregistration Successful";

/// Subscriber registration state plus request handlers.
pub struct SessionRegistry<E>
where
    E: Environment,
{
    /// Currently registered subscribers
    registered: HashSet<SubscriberId>,
    /// Randomness for PDU session ids
    env: E,
}

impl<E> SessionRegistry<E>
where
    E: Environment,
{
    /// Create an empty registry.
    pub fn new(env: E) -> Self {
        Self { registered: HashSet::new(), env }
    }

    /// Check whether `id` is currently registered.
    pub fn is_registered(&self, id: SubscriberId) -> bool {
        self.registered.contains(&id)
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// True when no subscriber is registered.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Sorted snapshot of registered subscriber ids.
    pub fn subscribers(&self) -> Vec<SubscriberId> {
        let mut ids: Vec<_> = self.registered.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Dispatch any request to its handler.
    pub fn handle(&mut self, request: Request) -> Ack {
        match request {
            Request::Registration(req) => Ack::Registration(self.register(req.id)),
            Request::PduSession(req) => {
                Ack::PduSession(self.establish_pdu_session(req.id, req.sst, &req.sd))
            },
            Request::Deregistration(req) => Ack::Deregistration(self.deregister(req.id)),
        }
    }

    /// Register a subscriber.
    ///
    /// Succeeds (200) if `id` was not registered; otherwise 400 with state
    /// unchanged.
    pub fn register(&mut self, id: SubscriberId) -> RegistrationAck {
        match self.try_register(id) {
            Ok(()) => {
                tracing::info!(subscriber = id, "subscriber registered");
                RegistrationAck {
                    id,
                    status: StatusCode::Ok,
                    message: REGISTRATION_SUCCESSFUL.to_string(),
                }
            },
            Err(e) => {
                tracing::debug!(subscriber = id, reason = %e, "registration rejected");
                RegistrationAck { id, status: e.status(), message: e.to_string() }
            },
        }
    }

    /// Establish a PDU session for a registered subscriber.
    ///
    /// Checks run in order, first failure wins: sst range (400), sd format
    /// (400), registration (403). On success a fresh id in 1..=15 is drawn.
    /// Never mutates the registration set.
    pub fn establish_pdu_session(&self, id: SubscriberId, sst: i64, sd: &str) -> PduSessionAck {
        match self.try_establish_pdu_session(id, sst, sd) {
            Ok((slice, pdu_id)) => {
                tracing::info!(subscriber = id, pdu_id, %slice, "PDU session established");
                PduSessionAck {
                    id,
                    pdu_id: Some(pdu_id),
                    status: StatusCode::Ok,
                    message: PDU_SESSION_ESTABLISHED.to_string(),
                }
            },
            Err(e) => {
                tracing::debug!(subscriber = id, sst, sd, reason = %e, "PDU session rejected");
                PduSessionAck { id, pdu_id: None, status: e.status(), message: e.to_string() }
            },
        }
    }

    /// Deregister a subscriber.
    ///
    /// Succeeds (200) if `id` was registered; otherwise 400 with state
    /// unchanged.
    pub fn deregister(&mut self, id: SubscriberId) -> DeregistrationAck {
        match self.try_deregister(id) {
            Ok(()) => {
                tracing::info!(subscriber = id, "subscriber deregistered");
                DeregistrationAck {
                    id,
                    status: StatusCode::Ok,
                    message: DEREGISTRATION_SUCCESSFUL.to_string(),
                }
            },
            Err(e) => {
                tracing::debug!(subscriber = id, reason = %e, "deregistration rejected");
                DeregistrationAck { id, status: e.status(), message: e.to_string() }
            },
        }
    }

    fn try_register(&mut self, id: SubscriberId) -> Result<(), RegistryError> {
        if !self.registered.insert(id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        Ok(())
    }

    fn try_establish_pdu_session(
        &self,
        id: SubscriberId,
        sst: i64,
        sd: &str,
    ) -> Result<(SliceDescriptor, u8), RegistryError> {
        let slice = SliceDescriptor::parse(sst, sd)?;

        if !self.is_registered(id) {
            return Err(RegistryError::NotRegistered(id));
        }

        Ok((slice, self.env.random_pdu_id()))
    }

    fn try_deregister(&mut self, id: SubscriberId) -> Result<(), RegistryError> {
        if !self.registered.remove(&id) {
            return Err(RegistryError::NotFound(id));
        }
        Ok(())
    }
}

impl<E> std::fmt::Debug for SessionRegistry<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry").field("registered", &self.registered.len()).finish()
    }
}
