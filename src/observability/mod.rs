//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → TraceLayer spans (method, uri, status, latency)
//!     → "[METHOD] target" line per forwarded request, tagged with a request id
//!     → error line per upstream failure
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for machine parsing)
//! ```

pub mod logging;
