//! Binary transport over turmoil's simulated network.
//!
//! The host side runs the production `serve_connection` against simulated
//! sockets; only the listener differs from the real server.

use std::net::{Ipv4Addr, SocketAddr};

use pdugate_core::{Environment, SharedRegistry};
use pdugate_proto::{Ack, Request, read_frame, write_frame};
use pdugate_server::{DEFAULT_READ_TIMEOUT, serve_connection};
use turmoil::net::{TcpListener, TcpStream};

/// Port the simulated server listens on.
pub const SIM_PORT: u16 = 8081;

/// Accept connections forever, one exchange each, in arrival order.
///
/// Intended as the body of a `turmoil` host.
pub async fn run_binary_host<E>(registry: SharedRegistry<E>) -> turmoil::Result
where
    E: Environment,
{
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, SIM_PORT))).await?;

    loop {
        let (stream, peer) = listener.accept().await?;
        if let Err(e) = serve_connection(stream, &registry, DEFAULT_READ_TIMEOUT).await {
            tracing::warn!("Connection {} dropped: {}", peer, e);
        }
    }
}

/// Send one request to `host` and read its ack.
pub async fn exchange(host: &str, request: &Request) -> Result<Ack, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(format!("{host}:{SIM_PORT}")).await?;
    write_frame(&mut stream, &request.to_frame()?).await?;
    let frame = read_frame(&mut stream).await?;
    Ok(Ack::from_frame(&frame)?)
}
