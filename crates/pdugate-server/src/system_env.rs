//! Production Environment implementation using OS randomness.
//!
//! This module provides `SystemEnv`, the production implementation of the
//! `Environment` trait.

use pdugate_core::Environment;

/// Production environment backed by `getrandom`.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // NOTE: getrandom only fails on unsupported platforms. PDU session
            // ids are not secrets, so degrade to a fixed draw instead of
            // panicking inside a request handler.
            tracing::error!("getrandom failed: {}", e);
            buffer.fill(0);
        });
    }
}
