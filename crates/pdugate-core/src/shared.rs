//! Shared, lock-guarded registry handle.
//!
//! Every transport task holds a clone of the same [`SharedRegistry`]. Each
//! operation takes the single lock for its whole check-and-mutate step, so
//! concurrent requests observe a linearizable registration set.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pdugate_proto::{
    Ack, DeregistrationAck, PduSessionAck, RegistrationAck, Request, SubscriberId,
};

use crate::{env::Environment, registry::SessionRegistry};

/// Cloneable handle to one [`SessionRegistry`].
///
/// Uses a blocking `std::sync::Mutex`: no operation awaits or performs I/O
/// while holding it, and each completes in constant time.
pub struct SharedRegistry<E>
where
    E: Environment,
{
    inner: Arc<Mutex<SessionRegistry<E>>>,
}

impl<E> SharedRegistry<E>
where
    E: Environment,
{
    /// Create a handle around a fresh, empty registry.
    pub fn new(env: E) -> Self {
        Self::from_registry(SessionRegistry::new(env))
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: SessionRegistry<E>) -> Self {
        Self { inner: Arc::new(Mutex::new(registry)) }
    }

    /// Dispatch any request under the lock.
    pub fn handle(&self, request: Request) -> Ack {
        self.lock().handle(request)
    }

    /// See [`SessionRegistry::register`].
    pub fn register(&self, id: SubscriberId) -> RegistrationAck {
        self.lock().register(id)
    }

    /// See [`SessionRegistry::establish_pdu_session`].
    pub fn establish_pdu_session(&self, id: SubscriberId, sst: i64, sd: &str) -> PduSessionAck {
        self.lock().establish_pdu_session(id, sst, sd)
    }

    /// See [`SessionRegistry::deregister`].
    pub fn deregister(&self, id: SubscriberId) -> DeregistrationAck {
        self.lock().deregister(id)
    }

    /// See [`SessionRegistry::is_registered`].
    pub fn is_registered(&self, id: SubscriberId) -> bool {
        self.lock().is_registered(id)
    }

    /// See [`SessionRegistry::len`].
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// See [`SessionRegistry::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// See [`SessionRegistry::subscribers`].
    pub fn subscribers(&self) -> Vec<SubscriberId> {
        self.lock().subscribers()
    }

    // Each operation is a single check-and-mutate on a HashSet, so a panic
    // elsewhere cannot leave the set half-updated; recover from poisoning.
    fn lock(&self) -> MutexGuard<'_, SessionRegistry<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Clone for SharedRegistry<E>
where
    E: Environment,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E> std::fmt::Debug for SharedRegistry<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegistry").field("registered", &self.len()).finish()
    }
}
