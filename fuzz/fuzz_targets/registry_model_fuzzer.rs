//! Fuzz target for the session registry
//!
//! # Strategy
//!
//! - Arbitrary operation sequences over a small subscriber id space
//! - Each operation applied to the reference model and the real registry
//!
//! # Invariants
//!
//! - Every ack status and message matches the model
//! - `pdu_id` present iff the PDU session was accepted, and always in 1..=15
//! - Registered set matches the model after every operation

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdugate_core::SessionRegistry;
use pdugate_harness::{ModelRegistry, Operation, SimEnv};
use pdugate_proto::Ack;

fuzz_target!(|input: (u64, Vec<Operation>)| {
    let (seed, ops) = input;
    let mut model = ModelRegistry::new();
    let mut real = SessionRegistry::new(SimEnv::with_seed(seed));

    for op in &ops {
        let expected = model.apply(op);
        let ack = real.handle(op.to_request());

        assert_eq!(ack.status(), expected.status(), "status diverged on {op:?}");
        assert_eq!(ack.message(), expected.message(op), "message diverged on {op:?}");

        if let Ack::PduSession(pdu) = &ack {
            assert_eq!(pdu.pdu_id.is_some(), expected.is_ok());
            if let Some(pdu_id) = pdu.pdu_id {
                assert!((1..=15).contains(&pdu_id));
            }
        }

        assert_eq!(model.observable_state().registered, real.subscribers());
    }
});
