//! Request/ack transports.
//!
//! Both transports carry the same `Request`/`Ack` values; they differ only in
//! how the bytes travel.

use async_trait::async_trait;
use pdugate_proto::{
    Ack, DeregistrationAck, PduSessionAck, RegistrationAck, Request, read_frame, write_frame,
};
use reqwest::{Method, StatusCode as HttpStatus};
use serde::{Serialize, de::DeserializeOwned};
use tokio::net::TcpStream;

use crate::error::ClientError;

/// Something that can deliver a request and return the server's ack.
#[async_trait]
pub trait AckTransport: Send + Sync {
    /// Send one request and wait for its ack.
    async fn send(&self, request: Request) -> Result<Ack, ClientError>;
}

/// Framed request/ack over TCP, one connection per request.
#[derive(Debug, Clone)]
pub struct BinaryTransport {
    addr: String,
}

impl BinaryTransport {
    /// Transport targeting `addr` (e.g. `"127.0.0.1:8081"`).
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl AckTransport for BinaryTransport {
    async fn send(&self, request: Request) -> Result<Ack, ClientError> {
        let mut stream = TcpStream::connect(&self.addr).await?;
        tracing::debug!("Connected to {}", self.addr);

        write_frame(&mut stream, &request.to_frame()?).await?;
        let frame = read_frame(&mut stream).await?;

        Ok(Ack::from_frame(&frame)?)
    }
}

/// JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport targeting `base_url` (e.g. `"http://127.0.0.1:8081"`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client: reqwest::Client::new() }
    }

    async fn call<B, A>(&self, method: Method, path: &str, body: &B) -> Result<A, ClientError>
    where
        B: Serialize + Sync,
        A: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let resp = self.client.request(method, url).json(body).send().await?;
        if resp.status() == HttpStatus::BAD_REQUEST {
            return Err(ClientError::Rejected { body: resp.text().await? });
        }

        Ok(resp.error_for_status()?.json().await?)
    }
}

#[async_trait]
impl AckTransport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Ack, ClientError> {
        match request {
            Request::Registration(req) => {
                let ack: RegistrationAck = self.call(Method::POST, "/register", &req).await?;
                Ok(Ack::Registration(ack))
            },
            Request::PduSession(req) => {
                let ack: PduSessionAck = self.call(Method::POST, "/pdu-session", &req).await?;
                Ok(Ack::PduSession(ack))
            },
            Request::Deregistration(req) => {
                let ack: DeregistrationAck =
                    self.call(Method::DELETE, "/deregister", &req).await?;
                Ok(Ack::Deregistration(ack))
            },
        }
    }
}
