//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all relay handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Graceful shutdown on the lifecycle signal

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::cookie::SessionCookie;
use crate::http::request::{
    cookie_header, make_request_span, propagate_request_id_layer, set_request_id_layer,
};
use crate::lifecycle::ShutdownSignal;
use crate::relay::{Downstream, HttpDownstream, InboundRequest, Relay};
use crate::session::{SessionResolver, SessionStore};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build downstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the relay for `config`, minting session ids prefixed with `host`.
pub fn build_relay<D: Downstream>(config: &RelayConfig, host: &str, downstream: D) -> Relay<D> {
    let cookie = SessionCookie::for_service(&config.service.name, config.session.secure_cookie);
    let resolver = SessionResolver::new(SessionStore::new(host), cookie);
    Relay::new(config.service.name.clone(), resolver, downstream)
}

/// HTTP server for one relay hop.
pub struct HttpServer<D: Downstream = HttpDownstream> {
    router: Router,
    config: RelayConfig,
    relay: Arc<Relay<D>>,
}

impl HttpServer<HttpDownstream> {
    /// Create a server talking to real downstream hops.
    pub fn new(config: RelayConfig, host: &str) -> Result<Self, ServerError> {
        let downstream = HttpDownstream::new(&config.downstream)?;
        let relay = build_relay(&config, host, downstream);
        Ok(Self::with_relay(config, relay))
    }
}

impl<D: Downstream> HttpServer<D> {
    /// Create a server around an already built relay.
    pub fn with_relay(config: RelayConfig, relay: Relay<D>) -> Self {
        let relay = Arc::new(relay);
        let router = build_router(&config, relay.clone());
        Self {
            router,
            config,
            relay,
        }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service_name = %self.config.service.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!(
            sessions = self.relay.resolver().store().len(),
            "HTTP server stopped"
        );
        Ok(())
    }

    /// The router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router<D: Downstream>(config: &RelayConfig, relay: Arc<Relay<D>>) -> Router {
    Router::new()
        .route("/", any(relay_handler::<D>))
        .route("/{*path}", any(relay_handler::<D>))
        .with_state(relay)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Relay handler for every path and method.
async fn relay_handler<D: Downstream>(
    State(relay): State<Arc<Relay<D>>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let cookie = cookie_header(&headers);
    let url = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let request = InboundRequest {
        url,
        cookie: cookie.as_deref(),
    };

    match relay.handle(request).await {
        Ok(reply) => reply.into_response(),
        Err(failure) => failure.into_response(),
    }
}
