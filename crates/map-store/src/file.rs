//! One-JSON-file-per-map store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{sort_newest_first, MapConfiguration, MapSummary, NewMap};
use crate::validation::validate_map_id;
use crate::{new_map_id, prepare, MapStore};

/// Stores each map as `<dir>/<id>.json`.
///
/// There is no locking. Creates never collide because every id is fresh; a
/// delete racing a get on the same id can make the get report not found.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_map(path: &Path) -> Result<MapConfiguration> {
        let contents = fs::read(path).await?;
        Ok(serde_json::from_slice(&contents)?)
    }
}

fn not_found_or(id: &str, err: std::io::Error) -> StoreError {
    if err.kind() == ErrorKind::NotFound {
        StoreError::NotFound(id.to_string())
    } else {
        StoreError::Io(err)
    }
}

#[async_trait]
impl MapStore for FileStore {
    async fn create(&self, map: NewMap) -> Result<MapConfiguration> {
        let saved = prepare(map)?.into_saved(new_map_id(), Utc::now());

        fs::create_dir_all(&self.dir).await?;
        let body = serde_json::to_vec_pretty(&saved)?;
        fs::write(self.path_for(&saved.id), body).await?;

        info!(id = %saved.id, dir = %self.dir.display(), "Saved map file");
        Ok(saved)
    }

    async fn get(&self, id: &str) -> Result<MapConfiguration> {
        validate_map_id(id)?;
        let contents = fs::read(self.path_for(id))
            .await
            .map_err(|e| not_found_or(id, e))?;
        Ok(serde_json::from_slice(&contents)?)
    }

    async fn list(&self) -> Result<Vec<MapSummary>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_map(&path).await {
                Ok(map) => summaries.push(map.summary()),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable map file");
                }
            }
        }

        sort_newest_first(&mut summaries);
        debug!(count = summaries.len(), "Listed map files");
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_map_id(id)?;
        fs::remove_file(self.path_for(id))
            .await
            .map_err(|e| not_found_or(id, e))?;
        info!(id = %id, "Deleted map file");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
