//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Answer pre-flight requests locally
//! - Forward everything else to the upstream and relay the response

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::{HeaderConfig, ProxyConfig};
use crate::http::cors::preflight_response;
use crate::http::error::ProxyError;
use crate::http::request::translate;
use crate::http::response::relay;
use crate::net::{build_client, UpstreamClient};
use crate::resilience::{response_deadline, with_deadline};
use crate::routing::{TargetError, UpstreamTarget};

/// Application state injected into handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub target: Arc<UpstreamTarget>,
    pub client: UpstreamClient,
    pub headers: HeaderConfig,
    pub response_deadline: Option<Duration>,
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    target: Arc<UpstreamTarget>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, TargetError> {
        let target = Arc::new(UpstreamTarget::parse(&config.upstream.url)?);
        let client = build_client(&config);

        let state = AppState {
            target: target.clone(),
            client,
            headers: config.headers,
            response_deadline: response_deadline(&config.timeouts),
        };

        let router = Self::build_router(state);
        Ok(Self {
            router,
            config,
            target,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.target,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the proxy without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }
}

/// Main proxy handler: pre-flight short-circuit, otherwise forward.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "Answering pre-flight");
        return preflight_response();
    }

    match forward(&state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

/// Forward one request to the upstream and relay its response.
pub async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let request_id = Uuid::new_v4();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);

    let outbound = translate(request, &state.target, state.headers)?;

    tracing::info!(
        request_id = %request_id,
        peer = ?peer,
        "[{}] {}",
        outbound.method(),
        outbound.uri()
    );

    let upstream = with_deadline(state.response_deadline, state.client.request(outbound))
        .await
        .map_err(|_| ProxyError::Timeout(state.response_deadline.unwrap_or_default()))??;

    tracing::debug!(
        request_id = %request_id,
        status = %upstream.status(),
        "Upstream responded"
    );

    Ok(relay(upstream, state.headers))
}
