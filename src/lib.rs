//! Local CORS proxy library.
//!
//! Forwards every request to one fixed upstream origin and overlays permissive
//! CORS headers on the way back, so browser and mobile clients can reach an
//! origin that does not serve CORS itself.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use error::Error;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
