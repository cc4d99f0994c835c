//! Startup error type.

use thiserror::Error;

use crate::net::ListenerError;
use crate::routing::TargetError;

/// Errors that stop the proxy from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
