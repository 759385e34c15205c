//! CLI command implementations.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use shopping_list_api::config::{ApiConfig, ConfigError, StorageConfig};
use shopping_list_api::db::{self, RepositoryError};

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("This command needs PostgreSQL storage (SHOPPING_STORAGE=postgres)")]
    NotPostgres,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    SeedFile(#[from] serde_yaml::Error),
}

/// Connect to the database named by the API configuration.
async fn connect() -> Result<PgPool, CommandError> {
    let config = ApiConfig::from_env()?;
    let StorageConfig::Postgres {
        database_url,
        max_connections,
    } = config.storage
    else {
        return Err(CommandError::NotPostgres);
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url, max_connections).await?;
    Ok(pool)
}
