//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → connector connect timeout (net::tls)
//!     → timeouts.rs (deadline for response headers)
//!     → On failure: 500 JSON to the caller, no retry
//! ```
//!
//! # Design Decisions
//! - No retries; callers retry at the application layer
//! - A hung upstream never holds a request forever unless explicitly configured

pub mod timeouts;

pub use timeouts::{response_deadline, with_deadline};
