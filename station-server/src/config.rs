//! Server configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

/// Default interval between background refreshes (24 hours).
const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but couldn't be parsed
    #[error("invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where station data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// The built-in network, no remote calls.
    Builtin,
    /// A remote station API.
    Remote {
        base_url: String,
        api_key: Option<String>,
    },
}

/// Configuration for the station server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Station data source.
    pub source: SourceConfig,
    /// How often to refresh the station list in the background.
    /// `None` disables background refresh.
    pub refresh_interval: Option<Duration>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `STATION_API_URL`: remote API base URL (built-in data if unset)
    /// - `STATION_API_KEY`: API key for the remote API
    /// - `BIND_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `STATION_REFRESH_SECS`: background refresh interval, `0` to disable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Treat empty values as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let source = match get("STATION_API_URL") {
            Some(base_url) => SourceConfig::Remote {
                base_url,
                api_key: get("STATION_API_KEY"),
            },
            None => SourceConfig::Builtin,
        };

        let refresh_secs = match get("STATION_REFRESH_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "STATION_REFRESH_SECS",
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_REFRESH_SECS,
        };
        let refresh_interval = (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs));

        Ok(Self {
            bind_addr,
            source,
            refresh_interval,
        })
    }
}
