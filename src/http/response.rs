//! Response relay.
//!
//! # Responsibilities
//! - Copy upstream status and headers onto the client response
//! - Overlay the proxy's CORS policy
//! - Stream the upstream body to the client as it arrives
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Hop-by-hop headers stripped unless configured otherwise
//! - A body error mid-stream aborts the client connection; it is only logged

use std::fmt::Display;

use axum::body::{Body, Bytes, HttpBody};
use axum::http::Response;
use axum::BoxError;
use http_body_util::BodyExt;

use crate::config::HeaderConfig;
use crate::http::cors::apply_cors_headers;
use crate::http::headers::relayed_headers;

/// Turn an upstream response into the response sent to the client.
pub fn relay<B>(upstream: Response<B>, policy: HeaderConfig) -> Response<Body>
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError> + Display,
{
    let (parts, body) = upstream.into_parts();

    let body = body.map_err(|e| {
        tracing::warn!(error = %e, "Upstream body failed mid-stream");
        e
    });

    let mut response = Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    *response.headers_mut() = relayed_headers(&parts.headers, policy);
    apply_cors_headers(response.headers_mut());
    response
}
