//! Seed the database with shopping lists from a YAML file.
//!
//! # File Format
//!
//! ```yaml
//! shopping_lists:
//!   - name: Groceries
//!     items:
//!       - name: Milk
//!         purchased: false
//!       - name: Eggs
//!   - name: Hardware
//! ```
//!
//! Names follow the same rules as the API: surrounding whitespace is trimmed
//! and blank names are rejected. `purchased` defaults to `false`.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use shopping_list_api::db::{PgShoppingRepository, RepositoryError, ShoppingRepository};
use shopping_list_api::models::NewShoppingItem;
use shopping_list_core::Name;

use super::{CommandError, connect};

/// Top-level structure of a seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub shopping_lists: Vec<SeedList>,
}

/// A list to create, with its items.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedList {
    pub name: Name,
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

/// An item to create on its list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedItem {
    pub name: Name,
    #[serde(default)]
    pub purchased: bool,
}

/// Counts reported after seeding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub lists_removed: usize,
    pub lists_created: usize,
    pub items_created: usize,
}

/// Seed lists and items from a YAML file.
///
/// The file is parsed and validated before connecting to the database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, configuration is
/// missing, or a database operation fails.
pub async fn run(path: &Path, clear_existing: bool) -> Result<(), CommandError> {
    info!(path = %path.display(), "Loading seed file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(lists = seed.shopping_lists.len(), "Parsed seed file");

    let pool = connect().await?;
    let repository = PgShoppingRepository::new(pool);

    info!(clear_existing, "Starting seeding process");
    let summary = seed_lists(&repository, seed, clear_existing).await?;

    info!("Seeding complete!");
    info!("  Lists removed: {}", summary.lists_removed);
    info!("  Lists created: {}", summary.lists_created);
    info!("  Items created: {}", summary.items_created);

    Ok(())
}

/// Insert the seed file's lists and items through a repository.
///
/// # Errors
///
/// Returns the first repository error encountered. Lists created before the
/// error are kept.
pub async fn seed_lists(
    repository: &dyn ShoppingRepository,
    seed: SeedFile,
    clear_existing: bool,
) -> Result<SeedSummary, RepositoryError> {
    let mut summary = SeedSummary::default();

    if clear_existing {
        for list in repository.list_shopping_lists().await? {
            repository.delete_shopping_list(list.id).await?;
            summary.lists_removed += 1;
        }
    }

    for seed_list in seed.shopping_lists {
        let list = repository.create_shopping_list(seed_list.name).await?;
        summary.lists_created += 1;

        for seed_item in seed_list.items {
            let item = NewShoppingItem {
                name: seed_item.name,
                purchased: seed_item.purchased,
            };
            repository.create_shopping_item(list.id, item).await?;
            summary.items_created += 1;
        }
    }

    Ok(summary)
}
