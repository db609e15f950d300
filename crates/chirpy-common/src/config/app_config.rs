//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use chrono::Duration;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub webhook: WebhookConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev")]
    Development,
    Staging,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue("PLATFORM", s.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Token signing and lifetime configuration
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Longest accepted token lifetime, in seconds (ten years)
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 3600;

impl JwtConfig {
    /// Out-of-range values are rejected by `AppConfig::from_lookup`; a
    /// hand-built config with one gets a zero lifetime, which never validates.
    #[must_use]
    pub fn access_token_ttl(&self) -> Duration {
        Duration::try_seconds(self.access_token_expiry).unwrap_or_else(Duration::zero)
    }

    #[must_use]
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::try_seconds(self.refresh_token_expiry).unwrap_or_else(Duration::zero)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

/// Payment provider webhook configuration
#[derive(Clone, Default, Deserialize)]
pub struct WebhookConfig {
    /// Key the provider presents as `Authorization: ApiKey <key>`
    #[serde(default)]
    pub polka_key: Option<String>,
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("polka_key", &self.polka_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// Default value functions
fn default_app_name() -> String {
    "chirpy".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> i64 {
    60 * 24 * 3600 // 60 days
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    /// Returns an error if required keys are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env: get("PLATFORM")
                    .map(|s| s.parse::<Environment>())
                    .transpose()?
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: get("API_HOST").unwrap_or_else(default_host),
                port: parse_or("API_PORT", get("API_PORT"), default_port)?,
            },
            database: DatabaseConfig {
                url: get("DB_URL").ok_or(ConfigError::MissingVar("DB_URL"))?,
                max_connections: parse_or(
                    "DB_MAX_CONNECTIONS",
                    get("DB_MAX_CONNECTIONS"),
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    "DB_MIN_CONNECTIONS",
                    get("DB_MIN_CONNECTIONS"),
                    default_min_connections,
                )?,
            },
            jwt: JwtConfig {
                secret: get("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_ttl(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    get("JWT_ACCESS_TOKEN_EXPIRY"),
                    default_access_token_expiry,
                )?,
                refresh_token_expiry: parse_ttl(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    get("JWT_REFRESH_TOKEN_EXPIRY"),
                    default_refresh_token_expiry,
                )?,
            },
            webhook: WebhookConfig {
                polka_key: get("POLKA_KEY"),
            },
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidValue(key, raw)),
        },
        None => Ok(default()),
    }
}

/// Token lifetime in seconds, within `1..=MAX_TOKEN_TTL_SECS`
fn parse_ttl(
    key: &'static str,
    value: Option<String>,
    default: fn() -> i64,
) -> Result<i64, ConfigError> {
    let raw = value.clone();
    let secs = parse_or(key, value, default)?;
    if (1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(ConfigError::InvalidValue(key, raw.unwrap_or_default()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
