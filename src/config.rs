//! Configuration management for the voting service
//!
//! Loads settings from environment variables (and a `.env` file if present)
//! with validation.

use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cooldown::DEFAULT_COOLDOWN_MS;
use crate::{Result, config_error};

/// Which counter store backs the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-process counters, lost on restart
    Memory,

    /// PostgreSQL through sqlx
    Postgres {
        database_url: String,
        max_connections: u32,
        run_migrations: bool,
    },

    /// Supabase (PostgREST) over HTTP
    Supabase { url: String, anon_key: String },
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,

    /// Mark the cooldown cookie `Secure` (production only)
    pub secure_cookies: bool,

    /// Allowed CORS origin, if cross-origin clients are expected
    pub cors_origin: Option<String>,
}

/// Voting rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Cooldown between accepted votes from one client
    pub cooldown_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub voting: VotingConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = parse_or(&lookup, "SERVER_ADDR", "0.0.0.0:3000")?;

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let secure_cookies = app_env == "production";

        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.is_empty());

        let cooldown_seconds: u64 =
            parse_or(&lookup, "VOTE_COOLDOWN_SECONDS", &(DEFAULT_COOLDOWN_MS / 1000).to_string())?;
        if cooldown_seconds == 0 {
            return Err(config_error!("VOTE_COOLDOWN_SECONDS must be greater than zero"));
        }
        let cooldown_ms = cooldown_seconds
            .checked_mul(1000)
            .ok_or_else(|| config_error!("Invalid VOTE_COOLDOWN_SECONDS"))?;

        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreConfig::Memory,
            "postgres" => StoreConfig::Postgres {
                database_url: required(&lookup, "DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", "5")?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", "false")?,
            },
            "supabase" => StoreConfig::Supabase {
                url: required(&lookup, "SUPABASE_URL")?,
                anon_key: required(&lookup, "SUPABASE_ANON_KEY")?,
            },
            other => {
                return Err(config_error!(
                    "Invalid STORE_BACKEND '{}' (expected memory, postgres or supabase)",
                    other
                ));
            }
        };

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        };
        if !matches!(logging.format.as_str(), "pretty" | "json") {
            return Err(config_error!("Invalid LOG_FORMAT '{}'", logging.format));
        }

        Ok(Self {
            server: ServerConfig {
                addr,
                secure_cookies,
                cors_origin,
            },
            voting: VotingConfig { cooldown_ms },
            store,
            logging,
        })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                addr: SocketAddr::from(([127, 0, 0, 1], 0)),
                secure_cookies: false,
                cors_origin: None,
            },
            voting: VotingConfig {
                cooldown_ms: DEFAULT_COOLDOWN_MS,
            },
            store: StoreConfig::Memory,
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| config_error!("{} environment variable required", key))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .map_err(|_| config_error!("Invalid {}", key))
}
