//! Application configuration loaded from environment variables.

use std::time::Duration;

use thiserror::Error;

/// Raised when a mandatory environment variable is absent. The process
/// refuses to start without its secrets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing mandatory environment variable: {0}")]
    MissingVar(&'static str),
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `WEBHOOK_TOKEN` — shared webhook secret (mandatory)
/// - `PROVIDER_API_URL` — provisioning API endpoint (mandatory)
/// - `PROVIDER_API_KEY` — provisioning API key (mandatory)
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `PROVIDER_TIMEOUT_SECS` — per-call fulfillment deadline (default: `30`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub webhook_token: String,
    pub provider_api_url: String,
    pub provider_api_key: String,
    pub provider_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Fails when any mandatory secret is missing; optional values fall back
    /// to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            webhook_token: require("WEBHOOK_TOKEN")?,
            provider_api_url: require("PROVIDER_API_URL")?,
            provider_api_key: require("PROVIDER_API_KEY")?,
            provider_timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            webhook_token: "secret".to_string(),
            provider_api_url: "https://provider.example/api".to_string(),
            provider_api_key: "key".to_string(),
            provider_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_addr_formatting() {
        assert_eq!(config().addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_var_error_names_the_variable() {
        let err = ConfigError::MissingVar("WEBHOOK_TOKEN");
        assert!(err.to_string().contains("WEBHOOK_TOKEN"));
    }
}
