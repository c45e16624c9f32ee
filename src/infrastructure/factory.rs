//! Store factory for runtime backend selection.
//!
//! Builds the single store handle that is injected into every request
//! handler, based on [`AppConfig`].
//!
//! # Example
//!
//! ```ignore
//! let config = AppConfig::from_env()?;
//! let store = StoreFactory::new(config).create().await?;
//! let state = AppState::new(store);
//! ```

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use super::config::{AppConfig, DatabaseSettings, StorageMode};
use super::{InMemoryTaskStore, PostgresTaskStore, StoreError, TaskStore};

/// Errors that can occur during store initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The configured connection URL could not be parsed.
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// The `todos` table could not be created.
    #[error("Schema bootstrap failed: {0}")]
    Schema(#[from] StoreError),
}

/// Factory for creating the task store described by the configuration.
#[derive(Debug, Clone)]
pub struct StoreFactory {
    config: AppConfig,
}

impl StoreFactory {
    /// Creates a new factory with the given configuration.
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Creates the configured store.
    ///
    /// For `PostgreSQL` this opens the connection pool and makes sure the
    /// `todos` table exists.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database URL is malformed, the pool
    /// cannot connect, or the schema bootstrap statement fails.
    pub async fn create(&self) -> Result<Arc<dyn TaskStore>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Arc::new(InMemoryTaskStore::new())),
            StorageMode::Postgres => {
                let store = self.create_postgres_store().await?;
                store.ensure_schema().await?;
                Ok(Arc::new(store))
            }
        }
    }

    async fn create_postgres_store(&self) -> Result<PostgresTaskStore, FactoryError> {
        let settings = &self.config.database;
        let options = connect_options(settings)?;

        tracing::info!(
            host = %settings.host,
            database = %settings.name,
            max_connections = settings.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))?;

        Ok(PostgresTaskStore::new(pool))
    }
}

/// Translates database settings into `sqlx` connect options.
///
/// Discrete settings are passed through the typed builder, so passwords
/// containing URL-reserved characters need no escaping.
///
/// # Errors
///
/// Returns `FactoryError::InvalidDatabaseUrl` if `url` is set but malformed.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, FactoryError> {
    if let Some(url) = &settings.url {
        return PgConnectOptions::from_str(url)
            .map_err(|error| FactoryError::InvalidDatabaseUrl(error.to_string()));
    }

    Ok(PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name))
}

// =============================================================================
// Tests
// =============================================================================
