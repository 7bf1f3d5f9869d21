//! Deterministic simulation harness for pdugate testing.
//!
//! Turmoil-backed helpers and a seeded `Environment` for deterministic,
//! reproducible testing of the binary transport.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and the real registry,
//! and their results and observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_env;
pub mod sim_server;

pub use model::{
    ModelRegistry, ModelSubscriberId, ObservableState, Operation, OperationError,
    OperationResult, SmallSd,
};
pub use sim_env::SimEnv;
pub use sim_server::{SIM_PORT, exchange, run_binary_host};
