//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server from a validated configuration
//! - Bind the listener and announce readiness
//! - Serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use crate::config::ProxyConfig;
use crate::error::Error;
use crate::http::HttpServer;
use crate::lifecycle::{signals::wait_for_signal, Shutdown};
use crate::net::listener;

/// Start the proxy and block until it has shut down.
pub async fn run(config: ProxyConfig) -> Result<(), Error> {
    let server = HttpServer::new(config)?;
    let listener = listener::bind(&server.config().listener).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        listen = %format!("http://{}", local_addr),
        upstream = %server.target(),
        tls = server.target().is_tls(),
        "CORS proxy ready"
    );
    tracing::info!(
        "Point the client at http://{}/<path> instead of {}/<path>",
        local_addr,
        server.target()
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
