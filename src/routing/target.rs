//! The fixed upstream target.
//!
//! # Responsibilities
//! - Parse the configured base URL once at startup
//! - Map an inbound request URI onto the upstream by concatenation
//!
//! # Design Decisions
//! - Inbound path and query are appended verbatim, never normalized
//! - A trailing slash on the base URL is dropped so `base + "/x"` has one slash
//! - The target is immutable and shared behind an `Arc`

use std::fmt;

use axum::http::uri::{Authority, InvalidUri, Scheme};
use axum::http::Uri;
use thiserror::Error;

/// Error type for upstream target parsing and resolution.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid upstream url: {0}")]
    InvalidUri(#[from] InvalidUri),

    #[error("upstream url `{0}` needs a scheme and a host")]
    MissingOrigin(String),

    #[error("could not build upstream uri: {0}")]
    Build(#[from] axum::http::Error),
}

/// Immutable upstream origin every request is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl UpstreamTarget {
    /// Parse a base URL such as `https://api.example.com` or `https://host:8443/v1`.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let uri: Uri = raw.trim().parse()?;
        let parts = uri.into_parts();

        let (scheme, authority) = match (parts.scheme, parts.authority) {
            (Some(s), Some(a)) => (s, a),
            _ => return Err(TargetError::MissingOrigin(raw.to_string())),
        };

        let base_path = parts
            .path_and_query
            .map(|pq| pq.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            scheme,
            authority,
            base_path,
        })
    }

    /// Build the outbound URI: base URL followed by the inbound path and query.
    pub fn resolve(&self, inbound: &Uri) -> Result<Uri, TargetError> {
        let path_and_query = inbound
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(format!("{}{}", self.base_path, path_and_query))
            .build()?;

        Ok(uri)
    }

    /// Whether connections to this target are TLS-protected.
    pub fn is_tls(&self) -> bool {
        self.scheme == Scheme::HTTPS
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.base_path)
    }
}
