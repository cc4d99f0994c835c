//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound URI (path + query)
//!     → target.rs (append onto the fixed upstream base URL)
//!     → Outbound URI
//! ```
//!
//! # Design Decisions
//! - Exactly one upstream; there is no route table to match against
//! - Target is parsed once at startup and never mutated

pub mod target;

pub use target::{TargetError, UpstreamTarget};
