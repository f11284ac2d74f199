//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SOUQ_HOST` - Bind address (default: 127.0.0.1)
//! - `SOUQ_PORT` - Listen port (default: 3000)
//! - `SOUQ_BASE_URL` - Public URL (default: <http://localhost:3000>); session
//!   cookies are marked `Secure` when it is https
//! - `SOUQ_ORDER_DELAY_MS` - Simulated order gateway delay (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)
//!
//! Admin and Claude variables are documented in [`souq_admin::config`].

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use souq_admin::AdminConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_ORDER_DELAY_MS: &str = "1500";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(transparent)]
    Admin(#[from] souq_admin::config::ConfigError),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// How long the simulated order gateway takes to accept an order
    pub order_delay: Duration,
    /// Admin password and Claude configuration
    pub admin: AdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or the admin
    /// configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host = parse(&get("SOUQ_HOST", DEFAULT_HOST), "SOUQ_HOST")?;
        let port = parse(&get("SOUQ_PORT", DEFAULT_PORT), "SOUQ_PORT")?;
        let base_url = get("SOUQ_BASE_URL", DEFAULT_BASE_URL);
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_BASE_URL".to_string(), e.to_string()))?;
        let order_delay_ms: u64 = parse(
            &get("SOUQ_ORDER_DELAY_MS", DEFAULT_ORDER_DELAY_MS),
            "SOUQ_ORDER_DELAY_MS",
        )?;

        let admin = AdminConfig::from_vars(&var)?;

        let sentry_dsn = var("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = var("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = var("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = var("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            base_url,
            order_delay: Duration::from_millis(order_delay_ms),
            admin,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn parse<T>(value: &str, key: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_vars(vars(&[])).unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert_eq!(config.order_delay, Duration::from_millis(1500));
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
        assert!(config.admin.password_is_default);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_vars(vars(&[
            ("SOUQ_HOST", "0.0.0.0"),
            ("SOUQ_PORT", "8080"),
            ("SOUQ_BASE_URL", "https://souq.example.dz"),
            ("SOUQ_ORDER_DELAY_MS", "0"),
            ("SENTRY_SAMPLE_RATE", "0.5"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().port(), 8080);
        assert!(config.is_secure());
        assert_eq!(config.order_delay, Duration::ZERO);
        assert!((config.sentry_sample_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("SOUQ_HOST", "localhost"),
            ("SOUQ_PORT", "70000"),
            ("SOUQ_BASE_URL", "not a url"),
            ("SOUQ_ORDER_DELAY_MS", "-1"),
        ] {
            let result = StorefrontConfig::from_vars(vars(&[(key, value)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidEnvVar(ref k, _)) if k == key),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_admin_errors_propagate() {
        let result =
            StorefrontConfig::from_vars(vars(&[("ANTHROPIC_API_KEY", "changeme-please")]));
        assert!(matches!(result, Err(ConfigError::Admin(_))));
    }
}
