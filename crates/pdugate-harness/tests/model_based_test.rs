//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! registry behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!     ModelRegistry  SessionRegistry   Compare
//!      (reference)     (SimEnv)        Results
//! ```

use pdugate_core::{SessionRegistry, SharedRegistry};
use pdugate_harness::{
    ModelRegistry, ModelSubscriberId, ObservableState, Operation, OperationResult, SimEnv,
    SmallSd,
};
use pdugate_proto::{Ack, StatusCode};
use proptest::prelude::*;

/// Real system wrapper that mirrors `ModelRegistry`'s interface.
struct RealRegistry {
    registry: SessionRegistry<SimEnv>,
}

impl RealRegistry {
    fn new(seed: u64) -> Self {
        Self { registry: SessionRegistry::new(SimEnv::with_seed(seed)) }
    }

    fn apply(&mut self, op: &Operation) -> Ack {
        self.registry.handle(op.to_request())
    }

    fn observable_state(&self) -> ObservableState {
        ObservableState { registered: self.registry.subscribers() }
    }
}

/// Strategy for generating slice differentiators.
fn sd_strategy() -> impl Strategy<Value = SmallSd> {
    (any::<u8>(), any::<u16>()).prop_map(|(shape, value)| SmallSd { shape, value })
}

/// Strategy for generating operations over a small id space.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    let id = 0..8 as ModelSubscriberId;
    let sst = prop_oneof![4 => 1i16..=255, 1 => any::<i16>()];

    prop_oneof![
        3 => id.clone().prop_map(|id| Operation::Register { id }),
        4 => (id.clone(), sst, sd_strategy())
            .prop_map(|(id, sst, sd)| Operation::EstablishPduSession { id, sst, sd }),
        2 => id.prop_map(|id| Operation::Deregister { id }),
    ]
}

fn check_ack(op: &Operation, expected: &OperationResult, ack: &Ack) -> Result<(), TestCaseError> {
    prop_assert_eq!(ack.id(), op.subscriber());
    prop_assert_eq!(ack.status(), expected.status(), "op {:?}", op);
    prop_assert_eq!(ack.message(), expected.message(op), "op {:?}", op);

    if let Ack::PduSession(pdu) = ack {
        match pdu.pdu_id {
            Some(pdu_id) => {
                prop_assert!(expected.is_ok(), "pdu_id on rejected op {:?}", op);
                prop_assert!((1..=15).contains(&pdu_id), "pdu_id {} out of range", pdu_id);
            },
            None => prop_assert!(expected.is_err(), "no pdu_id on accepted op {:?}", op),
        }
    }
    Ok(())
}

proptest! {
    /// Verify that every ack and the final state match the model.
    #[test]
    fn prop_model_matches_real(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(), 0..100)
    ) {
        let mut model = ModelRegistry::new();
        let mut real = RealRegistry::new(seed);

        for (i, op) in ops.iter().enumerate() {
            let expected = model.apply(op);
            let ack = real.apply(op);

            check_ack(op, &expected, &ack)
                .map_err(|e| TestCaseError::fail(format!("divergence at operation {i}: {e}")))?;
            prop_assert_eq!(model.observable_state(), real.observable_state());
        }
    }

    /// The same operations through `SharedRegistry` give the same acks.
    #[test]
    fn prop_shared_handle_matches_model(
        ops in prop::collection::vec(operation_strategy(), 0..50)
    ) {
        let mut model = ModelRegistry::new();
        let shared = SharedRegistry::new(SimEnv::with_seed(3));

        for op in &ops {
            let expected = model.apply(op);
            let ack = shared.handle(op.to_request());
            check_ack(op, &expected, &ack)?;
        }

        prop_assert_eq!(model.observable_state().registered, shared.subscribers());
    }

    /// PDU session requests never change who is registered.
    #[test]
    fn prop_pdu_session_is_read_only(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(), 0..50),
        id in 0..8 as ModelSubscriberId,
        sst in any::<i16>(),
        sd in sd_strategy()
    ) {
        let mut model = ModelRegistry::new();
        let mut real = RealRegistry::new(seed);
        for op in &ops {
            model.apply(op);
            real.apply(op);
        }

        let before = real.observable_state();
        prop_assert_eq!(&before, &model.observable_state());

        let op = Operation::EstablishPduSession { id, sst, sd };
        model.apply(&op);
        real.apply(&op);
        prop_assert_eq!(real.observable_state(), before);
        prop_assert_eq!(model.observable_state(), real.observable_state());
    }

    /// Same seed, same ops: identical acks, pdu ids included.
    #[test]
    fn prop_same_seed_same_acks(
        seed in any::<u64>(),
        ops in prop::collection::vec(operation_strategy(), 0..50)
    ) {
        let run = |seed| {
            let mut real = RealRegistry::new(seed);
            ops.iter().map(|op| real.apply(op)).collect::<Vec<_>>()
        };

        prop_assert_eq!(run(seed), run(seed));
    }
}

#[test]
fn registered_subscriber_status_codes() {
    let mut real = RealRegistry::new(0);
    let sd = SmallSd { shape: 0, value: 0x00ab };

    let ack = real.apply(&Operation::EstablishPduSession { id: 1, sst: 1, sd });
    assert_eq!(ack.status(), StatusCode::Forbidden);

    real.apply(&Operation::Register { id: 1 });
    let ack = real.apply(&Operation::EstablishPduSession { id: 1, sst: 1, sd });
    assert_eq!(ack.status(), StatusCode::Ok);
}
