//! HTTP server: accept loop and per-connection task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections.
//! 3. Serving HTTP/1.1 on each connection with `hyper`, one Tokio task per
//!    connection.
//! 4. Reading each request body up to the configured limit (413 beyond it).
//! 5. Translating between hyper types and [`ApiRequest`] / [`ApiResponse`].
//! 6. Stopping when the `running` flag is cleared.
//!
//! Connections that are mid-request when shutdown begins are left to finish
//! on their own tasks.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::application::ConfigService;
use crate::domain::api::{ApiMethod, ApiRequest, ApiResponse, ADMIN_SECRET_HEADER};

/// A bound, not yet running, HTTP server.
///
/// Binding is separate from running so callers (and tests) can learn the
/// actual port when binding to port 0.
pub struct HttpServer {
    listener: TcpListener,
    max_body_bytes: usize,
}

impl HttpServer {
    /// Binds the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., the port is
    /// already in use or the process lacks permission to bind).
    pub async fn bind(addr: SocketAddr, max_body_bytes: usize) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
        Ok(Self {
            listener,
            max_body_bytes,
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read listener address")
    }

    /// Runs the accept loop until `running` is set to `false`.
    ///
    /// # Errors
    ///
    /// Currently always returns `Ok`; accept errors are logged and skipped.
    pub async fn run(self, service: Arc<ConfigService>, running: Arc<AtomicBool>) -> anyhow::Result<()> {
        if let Ok(addr) = self.listener.local_addr() {
            info!("portfolio API listening on http://{addr}");
        }

        loop {
            if !running.load(Ordering::Relaxed) {
                info!("shutdown flag set; stopping accept loop");
                break;
            }

            // Short timeout so the flag is re-checked even when idle.
            match timeout(Duration::from_millis(200), self.listener.accept()).await {
                Ok(Ok((stream, peer_addr))) => {
                    debug!("new connection from {peer_addr}");
                    let service = Arc::clone(&service);
                    let max_body_bytes = self.max_body_bytes;
                    tokio::spawn(async move {
                        serve_connection(stream, peer_addr, service, max_body_bytes).await;
                    });
                }
                Ok(Err(e)) => {
                    error!("accept error: {e}");
                }
                Err(_) => {}
            }
        }

        Ok(())
    }
}

// ── Per-connection handler ────────────────────────────────────────────────────

async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    service: Arc<ConfigService>,
    max_body_bytes: usize,
) {
    let handler = service_fn(move |request| {
        let service = Arc::clone(&service);
        async move { Ok::<_, Infallible>(handle_request(&service, request, max_body_bytes).await) }
    });

    if let Err(e) = http1::Builder::new()
        .serve_connection(TokioIo::new(stream), handler)
        .await
    {
        debug!("connection {peer_addr} closed with error: {e}");
    }
}

/// Translates one hyper request, runs it through the service, and translates
/// the answer back.
pub async fn handle_request<B>(
    service: &ConfigService,
    request: Request<B>,
    max_body_bytes: usize,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = request.into_parts();

    let body = match Limited::new(body, max_body_bytes).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit = max_body_bytes, "request body too large");
            return into_hyper_response(ApiResponse::payload_too_large(max_body_bytes));
        }
        Err(e) => {
            warn!("failed to read request body: {e}");
            return into_hyper_response(ApiResponse::error(400, "Failed to read request body"));
        }
    };

    let admin_secret = parts
        .headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let api_request = ApiRequest {
        method: ApiMethod::from_name(parts.method.as_str()),
        path: parts.uri.path().to_string(),
        admin_secret,
        body: body.to_vec(),
    };

    debug!(method = %parts.method, path = %api_request.path, "request");
    into_hyper_response(service.handle(api_request).await)
}

fn into_hyper_response(api: ApiResponse) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(&api.body).unwrap_or_else(|_| b"{}".to_vec());
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() =
        StatusCode::from_u16(api.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(allow) = api.allow {
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static(allow));
    }
    response
}

// ── Tests ─────────────────────────────────────────────────────────────────────
