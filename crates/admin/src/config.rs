//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SOUQ_ADMIN_PASSWORD` - Shared admin password (default: built-in demo
//!   password, logged as a warning at startup)
//! - `ANTHROPIC_API_KEY` - Anthropic API key; AI copywriting is disabled
//!   without it
//! - `CLAUDE_MODEL` - Claude model ID (default: claude-sonnet-4-20250514)
//! - `CLAUDE_API_URL` - Messages endpoint (default: Anthropic's public API)
//! - `CLAUDE_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_CLAUDE_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Shared admin password
    pub password: SecretString,
    /// Whether `password` is the built-in default
    pub password_is_default: bool,
    /// Claude configuration, `None` when no API key is set
    pub claude: Option<ClaudeConfig>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"[REDACTED]")
            .field("password_is_default", &self.password_is_default)
            .field("claude", &self.claude)
            .finish()
    }
}

/// Claude AI API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClaudeConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514)
    pub model: String,
    /// Messages API endpoint
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AdminConfig {
    /// Load admin configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is invalid or the API key fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load admin configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// See [`AdminConfig::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let (password, password_is_default) = match non_empty(var("SOUQ_ADMIN_PASSWORD")) {
            Some(password) => (password, false),
            None => (DEFAULT_ADMIN_PASSWORD.to_string(), true),
        };

        Ok(Self {
            password: SecretString::from(password),
            password_is_default,
            claude: ClaudeConfig::from_vars(&var)?,
        })
    }

    /// Returns a reference to the Claude configuration (if configured).
    #[must_use]
    pub const fn claude(&self) -> Option<&ClaudeConfig> {
        self.claude.as_ref()
    }
}

impl ClaudeConfig {
    fn from_vars(var: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = non_empty(var("ANTHROPIC_API_KEY")) else {
            return Ok(None);
        };
        validate_secret_strength(&api_key, "ANTHROPIC_API_KEY")?;

        let timeout_secs = match non_empty(var("CLAUDE_TIMEOUT_SECS")) {
            Some(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("CLAUDE_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_CLAUDE_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CLAUDE_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: non_empty(var("CLAUDE_MODEL")).unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string()),
            api_url: non_empty(var("CLAUDE_API_URL"))
                .unwrap_or_else(|| DEFAULT_CLAUDE_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
