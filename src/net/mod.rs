//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound:
//!     listener.rs (bind) → axum::serve (one task per connection)
//!
//! Outbound:
//!     client.rs (pooled hyper client)
//!     → tls.rs (rustls connector, https-only unless opted out)
//!     → upstream origin
//! ```
//!
//! # Design Decisions
//! - Inbound transport is plain HTTP, local and dev-facing
//! - TLS to the upstream is mandatory by default

pub mod client;
pub mod listener;
pub mod tls;

pub use client::{build_client, UpstreamClient};
pub use listener::ListenerError;
