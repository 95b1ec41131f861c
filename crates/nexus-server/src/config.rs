//! Gateway configuration read from environment variables.
//!
//! `main` loads a local `.env` file with `dotenvy` first, so every variable
//! may come from either place:
//! - `NEXUS_HOST`: listen address (default: "0.0.0.0")
//! - `NEXUS_PORT`: listen port (default: "5001")
//! - `NEXUS_ALLOWED_ORIGINS`: comma-separated CORS origins
//!   (default: "http://localhost:3000,http://localhost:5000")
//! - `NEXUS_AGENT_CAPACITY`: concurrent calls at which an agent reports full
//!   load (default: "10")
//! - `NEXUS_INTENT_UPSTREAM_URL`: optional remote intent service; local
//!   keyword extraction is used when unset or unreachable
//! - `NEXUS_INTENT_UPSTREAM_TIMEOUT_MS`: upstream request timeout
//!   (default: "5000")

use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

/// Origins allowed when `NEXUS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5000"];

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime settings for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub agent_capacity: usize,
    pub intent_upstream_url: Option<String>,
    pub intent_upstream_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            host: "0.0.0.0".to_string(),
            port: 5001,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
            agent_capacity: nexus_core::roster::DEFAULT_CAPACITY,
            intent_upstream_url: None,
            intent_upstream_timeout: Duration::from_millis(5000),
        }
    }
}

impl GatewayConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset or blank variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = GatewayConfig::default();

        if let Some(host) = get("NEXUS_HOST") {
            config.host = host;
        }

        if let Some(port) = get("NEXUS_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "NEXUS_PORT",
                value: port.clone(),
                expected: "a port number",
            })?;
        }

        if let Some(origins) = get("NEXUS_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(|o| {
                    HeaderValue::from_str(o).map_err(|_| ConfigError::Invalid {
                        key: "NEXUS_ALLOWED_ORIGINS",
                        value: o.to_string(),
                        expected: "a list of origins",
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(capacity) = get("NEXUS_AGENT_CAPACITY") {
            config.agent_capacity = capacity
                .parse()
                .ok()
                .filter(|c: &usize| *c > 0)
                .ok_or(ConfigError::Invalid {
                    key: "NEXUS_AGENT_CAPACITY",
                    value: capacity.clone(),
                    expected: "a positive integer",
                })?;
        }

        config.intent_upstream_url = get("NEXUS_INTENT_UPSTREAM_URL");

        if let Some(timeout) = get("NEXUS_INTENT_UPSTREAM_TIMEOUT_MS") {
            let millis: u64 = timeout.parse().map_err(|_| ConfigError::Invalid {
                key: "NEXUS_INTENT_UPSTREAM_TIMEOUT_MS",
                value: timeout.clone(),
                expected: "a number of milliseconds",
            })?;
            config.intent_upstream_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
