//! pdugate client binary.
//!
//! # Usage
//!
//! ```bash
//! pdugate-client register --id 1
//! pdugate-client pdu-session --id 1 --sst 1 --sd 00ab
//! pdugate-client --transport http --port 8081 deregister --id 1
//! pdugate-client --transport http interactive
//! ```

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use pdugate_client::{BinaryTransport, Client, HttpTransport, render_ack, run_interactive};
use pdugate_proto::{DeregistrationRequest, PduSessionRequest, RegistrationRequest, Request};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// pdugate subscriber client
#[derive(Parser, Debug)]
#[command(name = "pdugate-client")]
#[command(about = "Send a subscriber request to a pdugate server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1", global = true)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 8081, global = true)]
    port: u16,

    /// Wire transport to use
    #[arg(short, long, value_enum, default_value_t = Transport::Binary, global = true)]
    transport: Transport,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    Binary,
    Http,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a subscriber
    Register {
        /// Subscriber id
        #[arg(long)]
        id: i64,
    },
    /// Establish a PDU session
    PduSession {
        /// Subscriber id
        #[arg(long)]
        id: i64,
        /// Slice/service type (1..=255)
        #[arg(long)]
        sst: i64,
        /// Slice differentiator (4 hex digits)
        #[arg(long)]
        sd: String,
    },
    /// Deregister a subscriber
    Deregister {
        /// Subscriber id
        #[arg(long)]
        id: i64,
    },
    /// Menu loop reading choices from stdin
    Interactive,
}

impl Command {
    fn into_request(self) -> Option<Request> {
        match self {
            Self::Register { id } => Some(RegistrationRequest { id }.into()),
            Self::PduSession { id, sst, sd } => Some(PduSessionRequest { id, sst, sd }.into()),
            Self::Deregister { id } => Some(DeregistrationRequest { id }.into()),
            Self::Interactive => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let client = match args.transport {
        Transport::Binary => {
            Client::new(BinaryTransport::new(format!("{}:{}", args.host, args.port)))
        },
        Transport::Http => {
            Client::new(HttpTransport::new(format!("http://{}:{}", args.host, args.port)))
        },
    };

    match args.command.into_request() {
        Some(request) => {
            let ack = client.send(request).await?;
            writeln!(std::io::stdout().lock(), "{}", render_ack(&ack))?;
        },
        None => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            run_interactive(&client, input, std::io::stdout().lock()).await?;
        },
    }

    Ok(())
}
