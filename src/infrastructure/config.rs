//! Application configuration.
//!
//! Configuration is read once at startup from environment variables, with
//! fixed fallback defaults for every database setting.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory`
//! - `DATABASE_URL`: full connection URL; overrides the `DB_*` settings
//! - `DB_HOST` (default `localhost`), `DB_PORT` (default `5432`)
//! - `DB_USER` (default `postgres`), `DB_PASSWORD` (default `todolist@123`)
//! - `DB_NAME` (default `todolist`)
//! - `DB_MAX_CONNECTIONS` (default `10`)
//! - `HOST` (default `0.0.0.0`), `PORT` (default `3000`)

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default listen port for the HTTP server.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// Configuration Types
// =============================================================================

/// Backend used to persist tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// `PostgreSQL` storage.
    #[default]
    Postgres,
    /// Process-local storage; contents are lost on restart.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full connection URL. Takes precedence over the discrete fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "todolist@123".to_string(),
            name: "todolist".to_string(),
            max_connections: 10,
        }
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage_mode: StorageMode,
    pub database: DatabaseSettings,
    /// HTTP server host address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database: DatabaseSettings::default(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Creates a new configuration builder starting from the defaults.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable is set to an unparsable
    /// value. Unset variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        let database_defaults = defaults.database;

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let database = DatabaseSettings {
            url: read("DATABASE_URL"),
            host: read("DB_HOST").unwrap_or(database_defaults.host),
            port: parse_or("DB_PORT", read("DB_PORT"), database_defaults.port)?,
            user: read("DB_USER").unwrap_or(database_defaults.user),
            password: read("DB_PASSWORD").unwrap_or(database_defaults.password),
            name: read("DB_NAME").unwrap_or(database_defaults.name),
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                read("DB_MAX_CONNECTIONS"),
                database_defaults.max_connections,
            )?,
        };

        if database.max_connections == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "DB_MAX_CONNECTIONS".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            storage_mode,
            database,
            host: read("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", read("PORT"), defaults.port)?,
        })
    }

    /// Returns the `host:port` string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.parse().map_err(|error: T::Err| ConfigurationError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}': {error}"),
        })
    })
}

/// Builder for `AppConfig`.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::builder()
///     .storage_mode(StorageMode::InMemory)
///     .port(8080)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.config.storage_mode = mode;
        self
    }

    /// Sets a full database URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = Some(url.into());
        self
    }

    /// Sets the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the server port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'postgres' or 'in_memory'")]
    InvalidStorageMode(String),

    /// A variable is set but could not be parsed.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// Tests
// =============================================================================
