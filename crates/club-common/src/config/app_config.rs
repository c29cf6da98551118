//! Application configuration structs
//!
//! Loads configuration from environment variables, reading a `.env` file
//! first when one is present.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub invites: InviteConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
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
    Development,
    Staging,
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

    /// Environment named by `APP_ENV` (after loading `.env`), for use before
    /// the full configuration is read
    #[must_use]
    pub fn current() -> Self {
        let _ = dotenvy::dotenv();
        env::var("APP_ENV")
            .ok()
            .and_then(|s| Self::parse_lenient(&s))
            .unwrap_or_default()
    }

    fn parse_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server bind configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
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

/// Identity provider configuration
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth REST API, e.g. `https://project.supabase.co/auth/v1`
    pub url: String,
    pub service_role_key: String,
    /// HS256 secret that signs session tokens
    pub jwt_secret: String,
    #[serde(default = "default_auth_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Who may send invites to a club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvitePolicy {
    #[default]
    OwnerOnly,
    OwnerOrActiveMember,
}

impl FromStr for InvitePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner_only" | "owner" => Ok(Self::OwnerOnly),
            "owner_or_active_member" | "member" => Ok(Self::OwnerOrActiveMember),
            other => Err(ConfigError::InvalidValue("INVITE_POLICY", other.to_string())),
        }
    }
}

/// Invitation settings
#[derive(Debug, Clone, Deserialize)]
pub struct InviteConfig {
    /// Base URL of the member portal; join links are `{frontend_url}/join/{token}`
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_invite_ttl_days")]
    pub ttl_days: i64,
    #[serde(default)]
    pub policy: InvitePolicy,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            frontend_url: default_frontend_url(),
            ttl_days: default_invite_ttl_days(),
            policy: InvitePolicy::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "club-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_auth_timeout() -> u64 {
    10
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_invite_ttl_days() -> i64 {
    club_core::INVITE_TTL_DAYS
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse_lenient(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
            },
            auth: AuthConfig {
                url: required("AUTH_URL")?.trim_end_matches('/').to_string(),
                service_role_key: required("AUTH_SERVICE_ROLE_KEY")?,
                jwt_secret: required("AUTH_JWT_SECRET")?,
                request_timeout_secs: parse_var(&lookup, "AUTH_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(default_auth_timeout),
            },
            invites: InviteConfig {
                frontend_url: lookup("FRONTEND_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_frontend_url),
                ttl_days: parse_var(&lookup, "INVITE_TTL_DAYS").unwrap_or_else(default_invite_ttl_days),
                policy: lookup("INVITE_POLICY")
                    .map(|s| s.parse::<InvitePolicy>())
                    .transpose()?
                    .unwrap_or_default(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(&lookup, "RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var(&lookup, "RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
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
