//! Pooled HTTP client for the upstream.
//!
//! # Responsibilities
//! - Own the connection pool to the single upstream
//! - Stream request bodies out and response bodies back without buffering
//!
//! # Design Decisions
//! - One client per process, cloned cheaply into every request
//! - The client sets `Host` from the target URI when the request carries none

use axum::body::Body;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::ProxyConfig;
use crate::net::tls::https_connector;

/// Client used for every outbound request.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the upstream client from configuration.
pub fn build_client(config: &ProxyConfig) -> UpstreamClient {
    let connector = https_connector(&config.upstream, &config.timeouts);

    Client::builder(TokioExecutor::new()).build(connector)
}
