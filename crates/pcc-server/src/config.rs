//! Server configuration: CLI arguments with an optional TOML file.
//!
//! CLI values take precedence over config-file values.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

/// Command-line arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "pcc-server")]
#[command(about = "Count printable bytes per connection and report lifetime statistics")]
pub struct CliArgs {
    /// Port to listen on
    pub port: u16,

    /// Address to bind (defaults to 0.0.0.0)
    #[arg(short, long)]
    pub bind: Option<IpAddr>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Address to bind
    #[serde(default = "default_bind")]
    pub bind: IpAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: IpAddr,
    pub log_level: String,
}

impl ServerConfig {
    /// Loads configuration from CLI arguments and the optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(CliArgs::parse())
    }

    /// Merges parsed CLI arguments with the config file, CLI winning.
    pub fn resolve(cli: CliArgs) -> Result<Self, ConfigError> {
        let file = if let Some(ref path) = cli.config {
            let contents =
                std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
                    path: path.clone(),
                    source,
                })?;
            toml::from_str(&contents).map_err(|source| ConfigError::FileParse {
                path: path.clone(),
                source,
            })?
        } else {
            TomlConfig::default()
        };

        Ok(Self {
            port: cli.port,
            bind: cli.bind.unwrap_or(file.server.bind),
            log_level: cli.log_level.unwrap_or(file.logging.level),
        })
    }

    /// The socket address to listen on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
