//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound the wait for upstream response headers
//! - Cancel the upstream exchange cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Body streaming is not bounded by a total deadline
//! - A zero-second setting disables the limit

use std::future::Future;
use std::time::Duration;

use tokio::time::error::Elapsed;

use crate::config::TimeoutConfig;

/// The response-header deadline configured for upstream exchanges.
pub fn response_deadline(config: &TimeoutConfig) -> Option<Duration> {
    match config.response_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

/// Await `fut`, giving up after `limit` when one is set.
///
/// Dropping the inner future on timeout aborts whatever it was waiting on.
pub async fn with_deadline<F, T>(limit: Option<Duration>, fut: F) -> Result<T, Elapsed>
where
    F: Future<Output = T>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await,
        None => Ok(fut.await),
    }
}
