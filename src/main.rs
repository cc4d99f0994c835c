//! Local CORS proxy (v0.1)
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 CORS PROXY                   │
//!   Client Request   │  ┌─────────┐    ┌─────────┐   OPTIONS?       │
//!   ─────────────────┼─▶│   net   │───▶│  http   │───────────┐      │
//!                    │  │listener │    │ server  │           ▼      │
//!                    │  └─────────┘    └────┬────┘    ┌──────────┐  │
//!                    │                      │         │ preflight│  │
//!                    │                      ▼         └──────────┘  │
//!                    │               ┌────────────┐                 │
//!                    │               │  request   │  routing:       │
//!                    │               │ translator │  base + path    │
//!                    │               └─────┬──────┘                 │
//!                    │                     ▼                        │
//!   Client Response  │  ┌─────────┐   ┌──────────┐                  │
//!   ◀────────────────┼──│response │◀──│ upstream │◀─── TLS ─────────┼──── Upstream
//!                    │  │ + CORS  │   │  client  │                  │     Origin
//!                    │  └─────────┘   └──────────┘                  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use cors_proxy::cli::Cli;
use cors_proxy::lifecycle::startup;
use cors_proxy::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cors-proxy: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!("cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Proxy failed");
            ExitCode::FAILURE
        }
    }
}
