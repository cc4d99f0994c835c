//! Upstream failure responses.
//!
//! Every failure to obtain upstream response headers becomes a 500 with a JSON
//! body of the form `{ "error": ..., "details": ... }`, CORS headers applied and
//! the client connection marked for closing.

use std::error::Error as StdError;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::http::cors::apply_cors_headers;
use crate::routing::TargetError;

/// Errors that can occur while forwarding a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("could not build upstream request: {0}")]
    Target(#[from] TargetError),
}

/// JSON body sent with a 500 on upstream failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
}

impl ProxyError {
    /// Short, stable description for the `error` field.
    pub fn summary(&self) -> &'static str {
        match self {
            ProxyError::Upstream(_) => "Proxy error",
            ProxyError::Timeout(_) => "Upstream timed out",
            ProxyError::Target(_) => "Invalid upstream request",
        }
    }

    /// The underlying failure message, including its chain of causes.
    pub fn details(&self) -> String {
        let mut details = match self {
            ProxyError::Upstream(e) => e.to_string(),
            ProxyError::Timeout(limit) => format!("no response headers after {:?}", limit),
            ProxyError::Target(e) => e.to_string(),
        };

        let mut source = match self {
            ProxyError::Upstream(e) => e.source(),
            _ => None,
        };
        while let Some(cause) = source {
            details.push_str(": ");
            details.push_str(&cause.to_string());
            source = cause.source();
        }
        details
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response<Body> {
        let body = ErrorBody {
            error: self.summary(),
            details: self.details(),
        };

        tracing::error!(error = body.error, details = %body.details, "Upstream error");

        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        apply_cors_headers(headers);
        response
    }
}
