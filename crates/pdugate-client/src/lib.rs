//! pdugate client.
//!
//! Sends subscriber requests to a pdugate server over either transport and
//! returns the typed acknowledgments.
//!
//! ## Architecture
//!
//! ```text
//! pdugate-client
//!   ├─ Client           (typed register / PDU session / deregister calls)
//!   ├─ run_interactive  (menu loop over a Client)
//!   └─ AckTransport     (BinaryTransport over TCP, HttpTransport over reqwest)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod interactive;
mod transport;

pub use error::ClientError;
pub use interactive::{INVALID_CHOICE, INVALID_NUMBER, run_interactive};
use pdugate_proto::{
    Ack, DeregistrationAck, DeregistrationRequest, Opcode, PduSessionAck, PduSessionRequest,
    RegistrationAck, RegistrationRequest, Request, SubscriberId,
};
pub use transport::{AckTransport, BinaryTransport, HttpTransport};

/// Typed front end over any [`AckTransport`].
pub struct Client {
    transport: Box<dyn AckTransport>,
}

impl Client {
    /// Create a client that sends through `transport`.
    pub fn new(transport: impl AckTransport + 'static) -> Self {
        Self { transport: Box::new(transport) }
    }

    /// Send any request and verify the ack answers it.
    pub async fn send(&self, request: Request) -> Result<Ack, ClientError> {
        let expected = request.ack_opcode();
        let ack = self.transport.send(request).await?;

        if ack.opcode() != expected {
            return Err(unexpected(expected, &ack));
        }
        Ok(ack)
    }

    /// Register a subscriber.
    pub async fn register(&self, id: SubscriberId) -> Result<RegistrationAck, ClientError> {
        match self.transport.send(RegistrationRequest { id }.into()).await? {
            Ack::Registration(ack) => Ok(ack),
            other => Err(unexpected(Opcode::RegistrationAck, &other)),
        }
    }

    /// Request a PDU session on the slice `(sst, sd)`.
    pub async fn establish_pdu_session(
        &self,
        id: SubscriberId,
        sst: i64,
        sd: impl Into<String>,
    ) -> Result<PduSessionAck, ClientError> {
        match self.transport.send(PduSessionRequest { id, sst, sd: sd.into() }.into()).await? {
            Ack::PduSession(ack) => Ok(ack),
            other => Err(unexpected(Opcode::PduSessionAck, &other)),
        }
    }

    /// Deregister a subscriber.
    pub async fn deregister(&self, id: SubscriberId) -> Result<DeregistrationAck, ClientError> {
        match self.transport.send(DeregistrationRequest { id }.into()).await? {
            Ack::Deregistration(ack) => Ok(ack),
            other => Err(unexpected(Opcode::DeregistrationAck, &other)),
        }
    }
}

fn unexpected(expected: Opcode, ack: &Ack) -> ClientError {
    ClientError::UnexpectedAck { expected, actual: ack.opcode() }
}

/// One-line rendering of an ack, as printed by the command-line client.
///
/// PDU session acks print the allocated id (0 when none was allocated).
pub fn render_ack(ack: &Ack) -> String {
    match ack {
        Ack::Registration(ack) => format!("Server Response: {}", ack.message),
        Ack::PduSession(ack) => {
            format!("PDU Allocated: {} - {}", ack.pdu_id.unwrap_or(0), ack.message)
        },
        Ack::Deregistration(ack) => format!("Server Response: {}", ack.message),
    }
}
