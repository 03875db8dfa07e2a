//! Persistence for saved choropleth maps.
//!
//! A [`MapStore`] assigns each submitted configuration a fresh id and creation
//! time, and hands it back by id. Three interchangeable backends exist; a
//! process picks one at startup with [`open_store`].
//!
//! # Example
//!
//! ```no_run
//! use map_store::{MapStore, MemoryStore, NewMap};
//! use state_data::StateRecord;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!
//!     let map = NewMap::with_records(vec![StateRecord::new("NY", "New York", Some(75.0))]);
//!     let saved = store.create(map).await?;
//!
//!     let fetched = store.get(&saved.id).await?;
//!     assert_eq!(fetched, saved);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod models;
pub mod sqlite;
pub mod validation;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::{MemoryStore, DEMO_MAP_ID};
pub use models::{embed_path, MapConfiguration, MapSummary, NewMap};
pub use sqlite::SqliteStore;
pub use validation::{validate_map_id, validate_new_map, ValidationError};

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

/// Storage for saved maps.
///
/// `get` and `delete` reject malformed ids with [`StoreError::InvalidId`]
/// before looking anything up; unknown ids give [`StoreError::NotFound`].
#[async_trait]
pub trait MapStore: Send + Sync {
    /// Validate and save a new map, returning it with its id and timestamp.
    async fn create(&self, map: NewMap) -> Result<MapConfiguration>;

    /// Fetch a saved map.
    async fn get(&self, id: &str) -> Result<MapConfiguration>;

    /// Summaries of all maps, most recently created first.
    async fn list(&self) -> Result<Vec<MapSummary>>;

    /// Remove a saved map.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Short name of the backend, for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Which backend to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSON files in a directory.
    File(PathBuf),
    /// In-process table seeded with the demo map.
    Memory,
    /// SQLite database URL.
    Sqlite(String),
}

/// Open the configured backend.
pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn MapStore>> {
    let store: Arc<dyn MapStore> = match backend {
        StoreBackend::File(dir) => Arc::new(FileStore::new(dir.clone())),
        StoreBackend::Memory => Arc::new(MemoryStore::with_demo()),
        StoreBackend::Sqlite(url) => {
            let store = SqliteStore::connect(url).await?;
            store.migrate().await?;
            Arc::new(store)
        }
    };

    tracing::info!(backend = store.backend_name(), "Opened map store");
    Ok(store)
}

pub(crate) fn new_map_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn prepare(mut map: NewMap) -> Result<NewMap> {
    validate_new_map(&mut map)?;
    Ok(map)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use state_data::{ColorScheme, StateRecord};
    use std::time::Duration;

    fn sample_map(title: &str) -> NewMap {
        let mut record = StateRecord::new("NY", "New York", Some(75.0));
        record.info = Some("Empire State".to_string());
        let mut map = NewMap::with_records(vec![record, StateRecord::new("TX", "Texas", None)]);
        map.title = title.to_string();
        map.color_scheme = ColorScheme::Multi;
        map.custom_colors.insert("TX".to_string(), "#ff0000".to_string());
        map
    }

    /// Behavior every backend must share.
    pub(crate) async fn exercise_store(store: &dyn MapStore) {
        // Round trip: everything but id/createdAt comes back unchanged.
        let input = sample_map("First");
        let saved = store.create(input.clone()).await.unwrap();
        assert!(validate_map_id(&saved.id).is_ok());
        let fetched = store.get(&saved.id).await.unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(fetched.map, input);

        // Listing is newest first.
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.create(sample_map("Second")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let third = store.create(sample_map("Third")).await.unwrap();

        let list = store.list().await.unwrap();
        let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), saved.id.as_str()]);
        assert_eq!(list[0].title, "Third");
        assert_eq!(list[0].embed_url, format!("/embed/{}", third.id));

        // Delete then get is not found; a second delete is not found too.
        store.delete(&second.id).await.unwrap();
        assert!(matches!(
            store.get(&second.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(&second.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.list().await.unwrap().len(), 2);

        // Malformed ids are rejected before lookup.
        assert!(matches!(
            store.get("bad/id").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.delete("bad id").await,
            Err(StoreError::InvalidId(_))
        ));

        // Unknown well-formed id.
        assert!(matches!(
            store.get("does-not-exist").await,
            Err(StoreError::NotFound(_))
        ));

        // Invalid configurations are refused.
        let bad = NewMap::with_records(vec![StateRecord::new("ZZ", "", None)]);
        assert!(matches!(
            store.create(bad).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&StoreBackend::Memory).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert!(store.get(DEMO_MAP_ID).await.is_ok());
    }

    #[tokio::test]
    async fn test_open_sqlite_store() {
        let store = open_store(&StoreBackend::Sqlite("sqlite::memory:".to_string()))
            .await
            .unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(store.list().await.unwrap().is_empty());
    }
}
