//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            CLI flags
//!     → loader.rs (parse)           │
//!     → merged ProxyConfig ◀────────┘
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via AppState with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the upstream never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{
    HeaderConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, TimeoutConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
