//! Core subscriber session logic for pdugate.
//!
//! Pure state machine: given a request and the current registration set,
//! produce an acknowledgment and (for register/deregister) a state change.
//! No I/O and no async; transports own both.
//!
//! ## Architecture
//!
//! ```text
//! pdugate-core
//!   ├─ SessionRegistry   (registration set + Register / PDU session / Deregister)
//!   ├─ SharedRegistry    (single-lock handle shared by transport tasks)
//!   ├─ SliceDescriptor   (sst / sd validation)
//!   └─ Environment       (randomness seam for PDU session ids)
//! ```
//!
//! Per subscriber the registry is a two-state machine, `Unregistered`
//! (initial) and `Registered`. PDU session requests never change state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
mod error;
pub mod registry;
mod shared;
mod slice;

pub use env::Environment;
pub use error::RegistryError;
pub use registry::SessionRegistry;
pub use shared::SharedRegistry;
pub use slice::SliceDescriptor;
