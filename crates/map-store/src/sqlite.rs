//! SQLite-backed map store.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::{Result, StoreError};
use crate::models::{embed_path, sort_newest_first, MapConfiguration, MapSummary, NewMap};
use crate::validation::validate_map_id;
use crate::{new_map_id, prepare, MapStore};

/// Map store on a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/maps.db?mode=rwc`.
    /// `sqlite::memory:` gives a throwaway database shared by the pool.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to map database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running map database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Sqlx(sqlx::Error::Decode(Box::new(e))))
}

#[async_trait]
impl MapStore for SqliteStore {
    async fn create(&self, map: NewMap) -> Result<MapConfiguration> {
        let saved = prepare(map)?.into_saved(new_map_id(), Utc::now());
        let body = serde_json::to_string(&saved)?;

        sqlx::query(
            r#"
            INSERT INTO maps (id, title, created_at, body)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&saved.id)
        .bind(&saved.map.title)
        .bind(timestamp(&saved.created_at))
        .bind(body)
        .execute(&self.pool)
        .await?;

        tracing::info!(id = %saved.id, "Inserted map row");
        Ok(saved)
    }

    async fn get(&self, id: &str) -> Result<MapConfiguration> {
        validate_map_id(id)?;

        let body = sqlx::query_scalar::<_, String>(
            r#"
            SELECT body
            FROM maps
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn list(&self) -> Result<Vec<MapSummary>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, title, created_at
            FROM maps
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut summaries = rows
            .into_iter()
            .map(|(id, title, created_at)| {
                Ok(MapSummary {
                    embed_url: embed_path(&id),
                    created_at: parse_timestamp(&created_at)?,
                    id,
                    title,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_map_id(id)?;

        let result = sqlx::query(
            r#"
            DELETE FROM maps
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::info!(id = %id, "Deleted map row");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
