//! Binary socket transport.
//!
//! One request per connection: the client connects, sends a single frame,
//! receives a single ack frame, and the server closes the connection.
//!
//! Frames that fail to decode (bad magic, unknown opcode, an ack sent to the
//! server, undecodable payload) are logged and the connection is dropped
//! without a response. They never reach the registry.
//!
//! A peer that does not deliver a complete request frame within the read
//! timeout is dropped the same way.

use std::{net::SocketAddr, time::Duration};

use pdugate_core::{Environment, SharedRegistry};
use pdugate_proto::{Request, read_frame, write_frame};
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    net::TcpListener,
};

use crate::{DEFAULT_READ_TIMEOUT, error::ServerError};

/// Accept loop for the binary transport.
pub struct BinaryServer<E>
where
    E: Environment,
{
    listener: TcpListener,
    registry: SharedRegistry<E>,
    read_timeout: Duration,
}

impl<E> BinaryServer<E>
where
    E: Environment,
{
    /// Bind the listening socket.
    pub async fn bind(addr: &str, registry: SharedRegistry<E>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, registry, read_timeout: DEFAULT_READ_TIMEOUT })
    }

    /// Deadline for a connection to deliver its request frame.
    #[must_use]
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the task is cancelled.
    ///
    /// Each connection is served on its own task; the registry lock
    /// serializes the state change itself.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Binary transport listening on {}", self.local_addr()?);

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let registry = self.registry.clone();
                    let read_timeout = self.read_timeout;

                    tokio::spawn(async move {
                        tracing::debug!("New connection: {}", peer);
                        if let Err(e) = serve_connection(stream, &registry, read_timeout).await {
                            tracing::warn!("Connection {} dropped: {}", peer, e);
                        }
                    });
                },
                Err(e) => {
                    tracing::error!("Accept error: {}", e);
                },
            }
        }
    }
}

/// Serve a single request/ack exchange on an established stream.
///
/// Generic over the stream so simulated sockets and in-memory pipes can drive
/// it exactly like a TCP connection.
///
/// # Errors
///
/// - `ServerError::Protocol` if the incoming frame is malformed
/// - `ServerError::Timeout` if no complete frame arrives within `read_timeout`
///
/// In both cases nothing is written back and the registry is untouched.
pub async fn serve_connection<S, E>(
    mut stream: S,
    registry: &SharedRegistry<E>,
    read_timeout: Duration,
) -> Result<(), ServerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    E: Environment,
{
    let frame = tokio::time::timeout(read_timeout, read_frame(&mut stream))
        .await
        .map_err(|_| ServerError::Timeout(read_timeout))??;
    let request = Request::from_frame(&frame)?;

    tracing::debug!(subscriber = request.id(), opcode = ?frame.opcode(), "request received");

    let ack = registry.handle(request);
    write_frame(&mut stream, &ack.to_frame()?).await?;
    stream.shutdown().await?;

    Ok(())
}
