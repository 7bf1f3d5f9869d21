//! Model registry - the reference implementation.
//!
//! A plain ordered set plus the validation rules written out directly. It is
//! the oracle the real `SessionRegistry` is checked against.

use std::collections::BTreeSet;

use super::operation::{ModelSubscriberId, Operation, OperationError, OperationResult, SmallSd};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Registered subscribers, ascending.
    pub registered: Vec<i64>,
}

/// Model registry.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    registered: BTreeSet<ModelSubscriberId>,
}

impl ModelRegistry {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `id` is registered.
    pub fn is_registered(&self, id: ModelSubscriberId) -> bool {
        self.registered.contains(&id)
    }

    /// Apply an operation and return the result.
    ///
    /// The result should match the real implementation's ack.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { id } => {
                if self.registered.insert(*id) {
                    OperationResult::Ok
                } else {
                    OperationResult::Error(OperationError::AlreadyRegistered)
                }
            },
            Operation::EstablishPduSession { id, sst, sd } => {
                if !(1..=255).contains(sst) {
                    OperationResult::Error(OperationError::InvalidSst)
                } else if !is_hex_sd(sd) {
                    OperationResult::Error(OperationError::InvalidSd)
                } else if !self.registered.contains(id) {
                    OperationResult::Error(OperationError::NotRegistered)
                } else {
                    OperationResult::Ok
                }
            },
            Operation::Deregister { id } => {
                if self.registered.remove(id) {
                    OperationResult::Ok
                } else {
                    OperationResult::Error(OperationError::NotFound)
                }
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState { registered: self.registered.iter().map(|id| i64::from(*id)).collect() }
    }
}

fn is_hex_sd(sd: &SmallSd) -> bool {
    let rendered = sd.render();
    rendered.len() == 4 && rendered.chars().all(|c| c.is_ascii_hexdigit())
}
