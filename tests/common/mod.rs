//! Shared utilities for integration tests: a recording mock upstream and a
//! proxy running on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use cors_proxy::config::ProxyConfig;
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::Shutdown;

/// Bytes of each request body kept for assertions; the rest is only counted.
const SAMPLE_LIMIT: usize = 64 * 1024;

pub const CHUNK_SIZE: usize = 64 * 1024;
static CHUNK: [u8; CHUNK_SIZE] = [b'x'; CHUNK_SIZE];

/// What the mock upstream saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body_len: usize,
    pub body_sample: Vec<u8>,
}

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<AtomicUsize>,
    cancelled: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    gate: Arc<Notify>,
    body_started: Arc<Notify>,
}

/// Counts handler futures dropped before they produced a response.
struct InFlight {
    cancelled: Arc<AtomicUsize>,
    finished: bool,
}

impl InFlight {
    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("upstream saw no request")
    }

    /// Handlers abandoned before answering, e.g. because the caller went away.
    pub fn cancelled(&self) -> usize {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Let a `/gated` response send the rest of its body.
    pub fn release(&self) {
        self.state.gate.notify_one();
    }

    /// Resolves once the first request body chunk has arrived.
    pub async fn body_started(&self) {
        self.state.body_started.notified().await;
    }
}

/// Start a mock upstream on an ephemeral port.
///
/// Paths:
/// - `/users/42`: `200 {"id":42}`
/// - `/cors`: sends its own CORS headers
/// - `/teapot`: `418`
/// - `/slow`: answers after 1.5s
/// - `/hang`: answers after 30s
/// - `/upload`: reports how many body bytes arrived
/// - `/download/{n}`: streams `n` chunks of [`CHUNK_SIZE`] bytes
/// - `/broken`: sends one chunk, then fails the body
/// - `/gated`: sends `first`, then `rest` once [`MockUpstream::release`] is called
/// - anything else: echoes method and path as JSON
pub async fn start_mock_upstream() -> MockUpstream {
    let state = MockState::default();
    let app = Router::new()
        .fallback(upstream_handler)
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, state }
}

async fn upstream_handler(State(state): State<MockState>, request: Request<Body>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let in_flight = InFlight {
        cancelled: state.cancelled.clone(),
        finished: false,
    };

    let (parts, body) = request.into_parts();
    let mut data = body.into_data_stream();
    let mut body_len = 0;
    let mut body_sample = Vec::new();
    while let Some(chunk) = data.next().await {
        let Ok(chunk) = chunk else { break };
        if body_len == 0 && !chunk.is_empty() {
            state.body_started.notify_one();
        }
        body_len += chunk.len();
        let room = SAMPLE_LIMIT.saturating_sub(body_sample.len());
        body_sample.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.clone(),
        path_and_query,
        headers: parts.headers.clone(),
        body_len,
        body_sample,
    });

    let path = parts.uri.path();
    let response = match path {
        "/users/42" => ([(header::CONTENT_TYPE, "application/json")], r#"{"id":42}"#).into_response(),
        "/cors" => (
            [
                ("access-control-allow-origin", "https://only.example"),
                ("access-control-allow-methods", "GET"),
                ("access-control-allow-headers", "X-Custom"),
                ("access-control-allow-credentials", "false"),
            ],
            "cors",
        )
            .into_response(),
        "/teapot" => (StatusCode::IM_A_TEAPOT, "short and stout").into_response(),
        "/slow" => {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            "slow".into_response()
        }
        "/hang" => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "too late".into_response()
        }
        "/upload" => Json(json!({ "received": body_len })).into_response(),
        "/gated" => {
            let gate = state.gate.clone();
            let first = stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(b"first")) });
            let rest = stream::once(async move {
                gate.notified().await;
                Ok::<_, std::io::Error>(Bytes::from_static(b"rest"))
            });
            Response::new(Body::from_stream(first.chain(rest)))
        }
        "/broken" => {
            let first = stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(&CHUNK)) });
            let failure = stream::once(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Err::<Bytes, _>(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "upstream died"))
            });
            Response::new(Body::from_stream(first.chain(failure)))
        }
        p if p.starts_with("/download/") => {
            let count: usize = p["/download/".len()..].parse().unwrap_or(0);
            let chunks = stream::iter(
                (0..count).map(|_| Ok::<_, std::io::Error>(Bytes::from_static(&CHUNK))),
            );
            Response::new(Body::from_stream(chunks))
        }
        _ => Json(json!({
            "method": parts.method.as_str(),
            "path": path,
        }))
        .into_response(),
    };

    in_flight.finish();
    response
}

/// Proxy configuration pointing at a local plain-HTTP upstream.
pub fn proxy_config(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = format!("http://{}", upstream);
    config.upstream.require_tls = false;
    config
}

/// A proxy serving on an ephemeral port. Shuts down when dropped.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Assert the four CORS headers are present exactly once with the fixed values.
pub fn assert_cors_headers(headers: &reqwest::header::HeaderMap) {
    let expected = [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
        ("access-control-allow-headers", "Content-Type, Authorization, Accept"),
        ("access-control-allow-credentials", "true"),
    ];
    for (name, value) in expected {
        let values: Vec<_> = headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec![value], "header {name}");
    }
}
