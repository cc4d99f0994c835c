//! TLS connector for upstream connections.

use std::sync::Once;
use std::time::Duration;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;

use crate::config::{TimeoutConfig, UpstreamConfig};

static CRYPTO_PROVIDER: Once = Once::new();

/// Install the ring crypto provider for rustls once per process.
///
/// Another component may already have installed a provider; that one is kept.
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            tracing::debug!("rustls crypto provider already installed");
        }
    });
}

/// Build the connector used for upstream connections.
///
/// With `require_tls` the connector refuses plain `http://` URIs, so a
/// misconfigured target fails at connect time instead of leaking traffic.
pub fn https_connector(
    upstream: &UpstreamConfig,
    timeouts: &TimeoutConfig,
) -> HttpsConnector<HttpConnector> {
    install_crypto_provider();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_nodelay(true);
    http.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

    let builder = HttpsConnectorBuilder::new().with_webpki_roots();
    let builder = if upstream.require_tls {
        builder.https_only()
    } else {
        builder.https_or_http()
    };

    builder
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}
