//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{read_config, validate_config, ConfigError, LogFormat, ProxyConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cors-proxy")]
#[command(about = "Local HTTP proxy that forwards to one upstream and adds permissive CORS headers", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Upstream base URL, e.g. https://api.example.com
    #[arg(short, long)]
    pub upstream: Option<String>,

    /// Port to listen on (all interfaces).
    #[arg(short, long, conflicts_with = "bind")]
    pub port: Option<u16>,

    /// Full listen address, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Allow a plain http:// upstream.
    #[arg(long)]
    pub allow_plain_upstream: bool,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,

    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load the config file (if any), apply flag overrides and validate the result.
    pub fn resolve_config(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut ProxyConfig) {
        if let Some(upstream) = &self.upstream {
            config.upstream.url = upstream.clone();
        }
        if let Some(port) = self.port {
            config.listener.bind_address = format!("0.0.0.0:{port}");
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if self.allow_plain_upstream {
            config.upstream.require_tls = false;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format.into();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}
