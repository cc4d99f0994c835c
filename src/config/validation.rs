//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream URL is a usable origin
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing::Level;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.url must be set")]
    MissingUpstream,

    #[error("upstream.url `{url}` is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("upstream.url `{0}` must use https (set upstream.require_tls = false for plain http)")]
    PlainUpstream(String),

    #[error("timeouts.connect_secs must be greater than zero")]
    ConnectTimeout,

    #[error("observability.log_level `{0}` is not a log level")]
    LogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(e) = validate_upstream(&config.upstream.url, config.upstream.require_tls) {
        errors.push(e);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ConnectTimeout);
    }

    if config.observability.log_level.parse::<Level>().is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(raw: &str, require_tls: bool) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingUpstream);
    }

    let invalid = |reason: &str| ValidationError::UpstreamUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

    match url.scheme() {
        "https" => {}
        "http" if !require_tls => {}
        "http" => return Err(ValidationError::PlainUpstream(raw.to_string())),
        _ => return Err(invalid("scheme must be http or https")),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("credentials are not supported"));
    }
    if url.query().is_some() {
        return Err(invalid("query strings are not supported"));
    }
    if url.fragment().is_some() {
        return Err(invalid("fragments are not supported"));
    }

    Ok(())
}
