//! JSON-over-HTTP transport.
//!
//! Thin translator between request bodies and the shared registry. Every
//! well-formed body gets HTTP 200 with the ack as JSON; the domain outcome
//! lives in the ack's `status` field. Bodies that fail to parse as the
//! expected request shape get HTTP 400 with a plain-text reason and never
//! reach the registry.
//!
//! | Method   | Path           | Body                  | Ack                 |
//! |----------|----------------|-----------------------|---------------------|
//! | `POST`   | `/register`    | `RegistrationRequest` | `RegistrationAck`   |
//! | `POST`   | `/pdu-session` | `PduSessionRequest`   | `PduSessionAck`     |
//! | `DELETE` | `/deregister`  | `DeregistrationRequest` | `DeregistrationAck` |
//! | `GET`    | `/health`      |                       | `OK`                |

use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use pdugate_core::{Environment, SharedRegistry};
use pdugate_proto::{
    DeregistrationAck, DeregistrationRequest, PduSessionAck, PduSessionRequest, RegistrationAck,
    RegistrationRequest,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;

/// Body of every HTTP 400 response.
pub const INVALID_JSON: &str = "Invalid JSON format";

/// Request-level failures of the HTTP adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not valid JSON or did not match the request shape
    #[error("{INVALID_JSON}: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidJson(e) => {
                tracing::warn!("Rejected HTTP body: {}", e);
                (HttpStatus::BAD_REQUEST, INVALID_JSON).into_response()
            },
        }
    }
}

/// Build the router with all routes.
pub fn router<E>(registry: SharedRegistry<E>) -> Router
where
    E: Environment,
{
    Router::new()
        .route("/register", post(register::<E>))
        .route("/pdu-session", post(pdu_session::<E>))
        .route("/deregister", delete(deregister::<E>))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

async fn register<E: Environment>(
    State(registry): State<SharedRegistry<E>>,
    body: Bytes,
) -> Result<Json<RegistrationAck>, ApiError> {
    let req: RegistrationRequest = parse_body(&body)?;
    Ok(Json(registry.register(req.id)))
}

async fn pdu_session<E: Environment>(
    State(registry): State<SharedRegistry<E>>,
    body: Bytes,
) -> Result<Json<PduSessionAck>, ApiError> {
    let req: PduSessionRequest = parse_body(&body)?;
    Ok(Json(registry.establish_pdu_session(req.id, req.sst, &req.sd)))
}

async fn deregister<E: Environment>(
    State(registry): State<SharedRegistry<E>>,
    body: Bytes,
) -> Result<Json<DeregistrationAck>, ApiError> {
    let req: DeregistrationRequest = parse_body(&body)?;
    Ok(Json(registry.deregister(req.id)))
}

/// HTTP listener bound to a registry.
pub struct HttpServer<E>
where
    E: Environment,
{
    listener: TcpListener,
    registry: SharedRegistry<E>,
}

impl<E> HttpServer<E>
where
    E: Environment,
{
    /// Bind the listening socket.
    pub async fn bind(addr: &str, registry: SharedRegistry<E>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, registry })
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests until the task is cancelled.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("HTTP transport listening on {}", self.local_addr()?);

        axum::serve(self.listener, router(self.registry)).await?;
        Ok(())
    }
}
