//! Reference model for model-based testing.
//!
//! The model captures subscriber registration with none of the transport or
//! locking machinery. It serves as the oracle against which the real registry
//! is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Deterministic: Same inputs produce same outputs
//! - PDU session ids are not modelled beyond "present on success"

pub mod operation;
mod registry;

pub use operation::{ModelSubscriberId, Operation, OperationError, OperationResult, SmallSd};
pub use registry::{ModelRegistry, ObservableState};
