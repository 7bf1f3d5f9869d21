//! Environment abstraction for deterministic testing.
//!
//! The only system resource the session registry consumes is randomness (for
//! PDU session ids). Routing it through the `Environment` trait lets the
//! simulation harness replay a run exactly from a seed while production uses
//! OS entropy.
//!
//! # Invariants
//!
//! - Determinism: Given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Isolation: Implementations must not share global state

/// Smallest PDU session id handed out.
pub const PDU_ID_MIN: u8 = 1;

/// Largest PDU session id handed out.
pub const PDU_ID_MAX: u8 = 15;

/// Abstract environment providing randomness.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Determinism during simulations: Given the same RNG seed, this produces
    ///   the same sequence of bytes
    /// - Unpredictability in production: backed by OS entropy
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Draws a PDU session id uniformly from `PDU_ID_MIN..=PDU_ID_MAX`.
    ///
    /// Uses rejection sampling over single bytes: only the first `LIMIT`
    /// byte values (a multiple of the span) are accepted, the rest are
    /// redrawn.
    fn random_pdu_id(&self) -> u8 {
        const SPAN: u8 = PDU_ID_MAX - PDU_ID_MIN + 1;
        const LIMIT: u8 = u8::MAX - (u8::MAX % SPAN);

        loop {
            let mut byte = [0u8; 1];
            self.random_bytes(&mut byte);
            if byte[0] < LIMIT {
                return PDU_ID_MIN + byte[0] % SPAN;
            }
        }
    }
}
