//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults give a working simulated deployment.
//!
//! ## Server
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_LOCALE` - Visitor-facing language, `es` or `en` (default: es)
//! - `SITE_OWNER_NAME` - Owner's first name used in prompts (default: Alonso)
//! - `SITE_STATIC_DIR` - Static files directory (default: crates/site/static)
//!
//! ## Contact delivery
//! - `CONTACT_BACKEND` - `simulated`, `email` or `generative` (default: simulated)
//! - `CONTACT_SIMULATED_DELAY_MS` - Simulated latency (default: 1000)
//! - `CONTACT_EMAIL_FROM` - Fixed sender identity
//! - `CONTACT_EMAIL_TO` - Site owner's inbox
//! - `RESEND_API_KEY` - Mail provider credential (absence is not fatal)
//! - `RESEND_API_URL` - Mail provider base URL
//!
//! ## Generative text
//! - `CLAUDE_API_KEY` - Anthropic API key (required for `CONTACT_BACKEND=generative`)
//! - `CLAUDE_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//! - `CLAUDE_API_URL` - API base URL
//!
//! ## Error tracking
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`,
//!   `SENTRY_TRACES_SAMPLE_RATE`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use portfolio_core::Locale;
use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_CLAUDE_API_URL: &str = "https://api.anthropic.com";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_EMAIL_FROM: &str = "Portfolio <onboarding@resend.dev>";
const DEFAULT_EMAIL_TO: &str = "owner@example.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
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
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which delivery backend handles contact submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactBackend {
    /// Log the submission and report success.
    #[default]
    Simulated,
    /// Send a transactional email to the site owner.
    Email,
    /// Let the generative-text service compose the confirmation.
    Generative,
}

impl ContactBackend {
    /// Name used in logs and the readiness endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Email => "email",
            Self::Generative => "generative",
        }
    }
}

impl FromStr for ContactBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "simulate" | "log" => Ok(Self::Simulated),
            "email" | "resend" => Ok(Self::Email),
            "generative" | "ai" => Ok(Self::Generative),
            other => Err(format!(
                "unknown backend '{other}' (expected simulated, email or generative)"
            )),
        }
    }
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Language of visitor-facing text
    pub locale: Locale,
    /// Owner's name, used in generative prompts
    pub owner_name: String,
    /// Directory served as static files
    pub static_dir: PathBuf,
    /// Contact delivery configuration
    pub contact: ContactConfig,
    /// Mail provider configuration (None if `RESEND_API_KEY` is unset)
    pub resend: Option<ResendConfig>,
    /// Generative-text configuration (None if `CLAUDE_API_KEY` is unset)
    pub claude: Option<ClaudeConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Contact form delivery configuration.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Active delivery backend
    pub backend: ContactBackend,
    /// Artificial latency of the simulated backend
    pub simulated_delay: Duration,
    /// Fixed sender identity for outgoing mail
    pub email_from: String,
    /// Site owner's inbox
    pub email_to: String,
}

/// Resend mail API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ResendConfig {
    /// Resend API key
    pub api_key: SecretString,
    /// API base URL
    pub api_url: String,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Claude API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClaudeConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514)
    pub model: String,
    /// API base URL
    pub api_url: String,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, if a
    /// secret fails validation, or if the generative backend is selected
    /// without a Claude API key.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SITE_HOST", "127.0.0.1")?;
        let port = parse_env("SITE_PORT", "3000")?;
        let locale = parse_env("SITE_LOCALE", "es")?;
        let owner_name = get_env_or_default("SITE_OWNER_NAME", "Alonso");
        let static_dir = PathBuf::from(get_env_or_default("SITE_STATIC_DIR", "crates/site/static"));

        let contact = ContactConfig::from_env()?;
        let resend = ResendConfig::from_env()?;
        let claude = ClaudeConfig::from_env()?;

        if contact.backend == ContactBackend::Generative && claude.is_none() {
            return Err(ConfigError::MissingEnvVar("CLAUDE_API_KEY".to_string()));
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            locale,
            owner_name,
            static_dir,
            contact,
            resend,
            claude,
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
}

impl Default for SiteConfig {
    /// The configuration of an environment with nothing set.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            locale: Locale::default(),
            owner_name: "Alonso".to_string(),
            static_dir: PathBuf::from("crates/site/static"),
            contact: ContactConfig::default(),
            resend: None,
            claude: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            backend: ContactBackend::default(),
            simulated_delay: Duration::from_secs(1),
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            email_to: DEFAULT_EMAIL_TO.to_string(),
        }
    }
}

impl ContactConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = parse_env("CONTACT_BACKEND", "simulated")?;
        let delay_ms: u64 = parse_env("CONTACT_SIMULATED_DELAY_MS", "1000")?;

        Ok(Self {
            backend,
            simulated_delay: Duration::from_millis(delay_ms),
            email_from: get_env_or_default("CONTACT_EMAIL_FROM", DEFAULT_EMAIL_FROM),
            email_to: get_env_or_default("CONTACT_EMAIL_TO", DEFAULT_EMAIL_TO),
        })
    }
}

impl ResendConfig {
    /// Returns `None` if `RESEND_API_KEY` is not set. A missing credential is
    /// reported per request by the email backend rather than at startup.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        get_optional_env("RESEND_API_KEY")
            .map(|key| {
                validate_secret_strength(&key, "RESEND_API_KEY")?;
                Ok(Self {
                    api_key: SecretString::from(key),
                    api_url: get_env_or_default("RESEND_API_URL", DEFAULT_RESEND_API_URL),
                })
            })
            .transpose()
    }
}

impl ClaudeConfig {
    /// Returns `None` if `CLAUDE_API_KEY` is not set (personalization disabled).
    fn from_env() -> Result<Option<Self>, ConfigError> {
        get_optional_env("CLAUDE_API_KEY")
            .map(|key| {
                validate_secret_strength(&key, "CLAUDE_API_KEY")?;
                Ok(Self {
                    api_key: SecretString::from(key),
                    model: get_env_or_default("CLAUDE_MODEL", DEFAULT_CLAUDE_MODEL),
                    api_url: get_env_or_default("CLAUDE_API_URL", DEFAULT_CLAUDE_API_URL),
                })
            })
            .transpose()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
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

    // Real API keys are random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the provider."
            ),
        ));
    }

    Ok(())
}
