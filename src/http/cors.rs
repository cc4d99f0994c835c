//! CORS header injection and pre-flight handling.
//!
//! The proxy's policy is fixed and permissive. It is applied to every response
//! leaving the proxy and replaces whatever the upstream sent for the same names.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Response, StatusCode};

/// The CORS headers set on every response, in the order they are applied.
pub const CORS_HEADERS: [(header::HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "Content-Type, Authorization, Accept",
    ),
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
];

/// Insert the CORS headers, overwriting every existing value of the same name.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// Answer a pre-flight request without contacting the upstream.
pub fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    apply_cors_headers(response.headers_mut());
    response
}
