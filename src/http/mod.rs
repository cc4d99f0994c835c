//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per connection)
//!     → OPTIONS? ──yes──▶ cors.rs (200, CORS headers, empty body)
//!     → request.rs (rewrite URI onto upstream, filter headers via headers.rs)
//!     → upstream client
//!     → response.rs (copy status/headers, overlay CORS, stream body)
//!     → Send to client
//!
//! Upstream failure before headers:
//!     → error.rs (500, JSON body, CORS headers, Connection: close)
//! ```

pub mod cors;
pub mod error;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use cors::{apply_cors_headers, preflight_response, CORS_HEADERS};
pub use error::ProxyError;
pub use server::{AppState, HttpServer};
