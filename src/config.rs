//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::Level;
use url::Url;

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STATUS_TTL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint `{value}`: {source}")]
    Endpoint {
        value: String,
        source: url::ParseError,
    },
    #[error("endpoint must use http or https, got `{0}`")]
    Scheme(String),
    #[error("invalid log level `{0}`")]
    LogLevel(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Parser)]
#[command(name = "clip-format", version, about)]
pub struct Cli {
    /// URL of the formatting endpoint.
    #[arg(long, env = "CLIP_FORMAT_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[arg(
        long,
        env = "CLIP_FORMAT_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(),
        global = true
    )]
    pub timeout_secs: u64,

    /// How long status messages stay visible, in milliseconds.
    #[arg(
        long,
        env = "CLIP_FORMAT_STATUS_TTL_MS",
        default_value_t = DEFAULT_STATUS_TTL.as_millis() as u64,
        global = true
    )]
    pub status_ttl_ms: u64,

    /// Do not copy formatted output to the clipboard automatically.
    #[arg(long, global = true)]
    pub no_copy: bool,

    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, env = "CLIP_FORMAT_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (the default).
    Tui,
    /// Format text from a file or stdin and print the result.
    Format {
        /// Read from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Format the current clipboard text and print the result.
    Paste,
}

/// Validated settings shared by every mode.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub request_timeout: Duration,
    pub status_ttl: Duration,
    pub auto_copy: bool,
    pub log_level: Level,
    pub log_file: Option<PathBuf>,
    pub command: Command,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let endpoint = Url::parse(&cli.endpoint).map_err(|source| ConfigError::Endpoint {
            value: cli.endpoint.clone(),
            source,
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(endpoint.scheme().to_string()));
        }
        if cli.timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout"));
        }
        if cli.status_ttl_ms == 0 {
            return Err(ConfigError::Zero("status ttl"));
        }
        let log_level = cli
            .log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;

        Ok(Self {
            endpoint,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            status_ttl: Duration::from_millis(cli.status_ttl_ms),
            auto_copy: !cli.no_copy,
            log_level,
            log_file: cli.log_file,
            command: cli.command.unwrap_or(Command::Tui),
        })
    }
}
