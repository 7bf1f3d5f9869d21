//! pdugate server binary.
//!
//! # Usage
//!
//! ```bash
//! # Framed binary transport (default)
//! pdugate-server --bind 0.0.0.0:8081
//!
//! # JSON over HTTP
//! pdugate-server --bind 0.0.0.0:8081 --transport http
//! ```

use std::time::Duration;

use clap::Parser;
use pdugate_server::{
    DEFAULT_READ_TIMEOUT, DEFAULT_WORKERS, Server, ServerRuntimeConfig, TransportKind,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// pdugate subscriber server
#[derive(Parser, Debug)]
#[command(name = "pdugate-server")]
#[command(about = "Subscriber registration and PDU session server")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = pdugate_server::DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Wire transport to serve
    #[arg(short, long, value_enum, default_value_t = TransportKind::Binary)]
    transport: TransportKind,

    /// Runtime worker threads
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Seconds a binary connection may take to send its request
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT.as_secs())]
    read_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = ServerRuntimeConfig {
        bind_address: args.bind,
        transport: args.transport,
        workers: args.workers,
        read_timeout: Duration::from_secs(args.read_timeout_secs),
    };
    config.validate()?;

    tracing::info!("pdugate server starting");
    tracing::info!(
        "Binding to {} ({:?}, {} workers)",
        config.bind_address,
        config.transport,
        config.workers
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let server = Server::bind(config).await?;

        tracing::info!("Server listening on {}", server.local_addr()?);

        server.run().await
    })?;

    Ok(())
}
