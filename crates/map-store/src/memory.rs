//! Process-lifetime map store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use state_data::{ColorScheme, StateRecord};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::{sort_newest_first, MapConfiguration, MapSummary, NewMap};
use crate::validation::validate_map_id;
use crate::{new_map_id, prepare, MapStore};

/// Id of the map seeded by [`MemoryStore::with_demo`].
pub const DEMO_MAP_ID: &str = "demo";

/// Keeps maps in a hash table. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: RwLock<HashMap<String, MapConfiguration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one demo map under [`DEMO_MAP_ID`].
    pub fn with_demo() -> Self {
        let demo = demo_map().into_saved(DEMO_MAP_ID.to_string(), Utc::now());
        let mut maps = HashMap::new();
        maps.insert(demo.id.clone(), demo);
        Self {
            maps: RwLock::new(maps),
        }
    }
}

fn demo_map() -> NewMap {
    let mut map = NewMap::with_records(vec![
        StateRecord::new("NY", "New York", Some(75.0)),
        StateRecord::new("CA", "California", Some(50.0)),
        StateRecord::new("TX", "Texas", Some(25.0)),
    ]);
    map.title = "Demo US Map".to_string();
    map.color_scheme = ColorScheme::GreenToRed;
    map
}

#[async_trait]
impl MapStore for MemoryStore {
    async fn create(&self, map: NewMap) -> Result<MapConfiguration> {
        let saved = prepare(map)?.into_saved(new_map_id(), Utc::now());
        self.maps
            .write()
            .await
            .insert(saved.id.clone(), saved.clone());

        info!(id = %saved.id, "Stored map in memory");
        Ok(saved)
    }

    async fn get(&self, id: &str) -> Result<MapConfiguration> {
        validate_map_id(id)?;
        self.maps
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<MapSummary>> {
        let mut summaries: Vec<MapSummary> = self
            .maps
            .read()
            .await
            .values()
            .map(MapConfiguration::summary)
            .collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_map_id(id)?;
        self.maps
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        info!(id = %id, "Removed map from memory");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::exercise_store;

    #[tokio::test]
    async fn test_memory_store_contract() {
        exercise_store(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_demo_map_seeded() {
        let store = MemoryStore::with_demo();
        let demo = store.get(DEMO_MAP_ID).await.unwrap();
        assert_eq!(demo.map.title, "Demo US Map");
        assert_eq!(demo.map.state_data.len(), 3);
        assert_eq!(store.list().await.unwrap().len(), 1);

        assert!(MemoryStore::new().list().await.unwrap().is_empty());
    }
}
