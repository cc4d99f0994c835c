//! Request translation.
//!
//! # Responsibilities
//! - Map an inbound request onto the fixed upstream
//! - Copy method and body unchanged
//! - Build a fresh header set without `host` (and hop-by-hop headers)
//!
//! # Design Decisions
//! - The body is moved, never collected, so payloads stream through
//! - Protocol version is left to the upstream client to negotiate

use axum::body::Body;
use axum::http::Request;

use crate::config::HeaderConfig;
use crate::http::error::ProxyError;
use crate::http::headers::outbound_headers;
use crate::routing::UpstreamTarget;

/// Build the outbound request for `inbound`.
pub fn translate(
    inbound: Request<Body>,
    target: &UpstreamTarget,
    policy: HeaderConfig,
) -> Result<Request<Body>, ProxyError> {
    let (parts, body) = inbound.into_parts();
    let uri = target.resolve(&parts.uri)?;
    let headers = outbound_headers(&parts.headers, policy);

    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = uri;
    *outbound.headers_mut() = headers;
    Ok(outbound)
}
