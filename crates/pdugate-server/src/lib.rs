//! pdugate production server.
//!
//! This crate provides the production server implementation using:
//! - Tokio for the async runtime and TCP sockets
//! - Axum for the JSON-over-HTTP transport
//! - OS randomness for PDU session ids
//!
//! ## Architecture
//!
//! ```text
//! pdugate-server
//!   ├─ SystemEnv       (production Environment impl)
//!   ├─ BinaryServer    (framed request/ack, one exchange per connection)
//!   ├─ HttpServer      (axum router over the same registry)
//!   └─ SharedRegistry  (from pdugate-core, shared by every connection task)
//! ```
//!
//! Both transports are thin: decode, call the registry, encode the ack.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binary;
mod error;
pub mod http;
mod system_env;

use std::{net::SocketAddr, time::Duration};

pub use binary::{BinaryServer, serve_connection};
pub use error::ServerError;
pub use http::{HttpServer, router};
use pdugate_core::SharedRegistry;
pub use system_env::SystemEnv;

/// Default listen address, shared by both transports.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8081";

/// Default number of runtime worker threads.
pub const DEFAULT_WORKERS: usize = 2;

/// Default deadline for a binary connection to deliver its request.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire transport the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TransportKind {
    /// Framed CBOR over TCP
    #[default]
    Binary,
    /// JSON over HTTP
    Http,
}

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "0.0.0.0:8081")
    pub bind_address: String,
    /// Which transport to serve
    pub transport: TransportKind,
    /// Runtime worker threads
    pub workers: usize,
    /// Binary transport: deadline for a connection's request frame
    pub read_timeout: Duration,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            transport: TransportKind::default(),
            workers: DEFAULT_WORKERS,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl ServerRuntimeConfig {
    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.workers == 0 {
            return Err(ServerError::Config("workers must be at least 1".to_string()));
        }
        if self.read_timeout.is_zero() {
            return Err(ServerError::Config("read timeout must be non-zero".to_string()));
        }
        if self.bind_address.is_empty() {
            return Err(ServerError::Config("bind address must not be empty".to_string()));
        }
        Ok(())
    }
}

enum Listener {
    Binary(BinaryServer<SystemEnv>),
    Http(HttpServer<SystemEnv>),
}

/// Production pdugate server.
///
/// Owns the registry and one bound transport.
pub struct Server {
    registry: SharedRegistry<SystemEnv>,
    listener: Listener,
}

impl Server {
    /// Create and bind a new server.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The configuration is invalid
    /// - Binding to the address fails
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        config.validate()?;

        let registry = SharedRegistry::new(SystemEnv::new());
        let listener = match config.transport {
            TransportKind::Binary => Listener::Binary(
                BinaryServer::bind(&config.bind_address, registry.clone())
                    .await?
                    .with_read_timeout(config.read_timeout),
            ),
            TransportKind::Http => {
                Listener::Http(HttpServer::bind(&config.bind_address, registry.clone()).await?)
            },
        };

        Ok(Self { registry, listener })
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        match &self.listener {
            Listener::Binary(server) => server.local_addr(),
            Listener::Http(server) => server.local_addr(),
        }
    }

    /// Handle to the registry this server mutates.
    pub fn registry(&self) -> SharedRegistry<SystemEnv> {
        self.registry.clone()
    }

    /// Run the server until it is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        match self.listener {
            Listener::Binary(server) => server.run().await,
            Listener::Http(server) => server.run().await,
        }
    }
}
