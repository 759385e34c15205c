//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{ApiConfig, StorageConfig};
use crate::db::{self, DynShoppingRepository, MemoryShoppingRepository, PgShoppingRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configured shopping repository.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: DynShoppingRepository,
}

impl AppState {
    /// Create application state around an existing repository.
    #[must_use]
    pub fn new(repository: DynShoppingRepository) -> Self {
        Self {
            inner: Arc::new(AppStateInner { repository }),
        }
    }

    /// Create application state backed by an empty in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryShoppingRepository::new()))
    }

    /// Build the repository described by the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the `PostgreSQL` pool cannot be created.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, sqlx::Error> {
        match &config.storage {
            StorageConfig::Postgres {
                database_url,
                max_connections,
            } => {
                let pool = db::create_pool(database_url, *max_connections).await?;
                tracing::info!("Database pool created");
                Ok(Self::new(Arc::new(PgShoppingRepository::new(pool))))
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Get a reference to the shopping repository.
    #[must_use]
    pub fn repository(&self) -> &DynShoppingRepository {
        &self.inner.repository
    }
}
