//! Infrastructure module for external services.
//!
//! This module contains configuration loading, the task store trait and its
//! `PostgreSQL` and in-memory implementations.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod store;

pub use config::{AppConfig, AppConfigBuilder, ConfigurationError, DatabaseSettings, StorageMode};
pub use factory::{FactoryError, StoreFactory};
pub use in_memory::InMemoryTaskStore;
pub use postgres::PostgresTaskStore;
pub use store::{StoreError, StoreFuture, TaskStore};
