//! Header filtering between the inbound and outbound legs.
//!
//! # Responsibilities
//! - Produce the outbound header set from the inbound one (copy, then filter)
//! - Drop `host` so the client derives it from the upstream URI
//! - Strip hop-by-hop headers, including those named by `Connection`
//!
//! # Design Decisions
//! - Never mutates the source map; always returns a fresh `HeaderMap`
//! - Header names compare case-insensitively (`HeaderName` is lowercase)

use axum::http::header::{self, HeaderMap, HeaderName};

use crate::config::HeaderConfig;

/// Headers that describe a single connection and are not forwarded.
pub const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Returns true for the fixed hop-by-hop header names.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Header names listed as tokens in the `Connection` header(s).
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

fn filtered(source: &HeaderMap, policy: HeaderConfig, drop_host: bool) -> HeaderMap {
    let listed = if policy.strip_hop_by_hop {
        connection_tokens(source)
    } else {
        Vec::new()
    };

    let mut out = HeaderMap::with_capacity(source.len());
    for (name, value) in source.iter() {
        if drop_host && *name == header::HOST {
            continue;
        }
        if policy.strip_hop_by_hop && (is_hop_by_hop(name) || listed.contains(name)) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Headers to send upstream for an inbound request.
pub fn outbound_headers(inbound: &HeaderMap, policy: HeaderConfig) -> HeaderMap {
    filtered(inbound, policy, true)
}

/// Headers to send back to the client for an upstream response.
pub fn relayed_headers(upstream: &HeaderMap, policy: HeaderConfig) -> HeaderMap {
    filtered(upstream, policy, false)
}
