//! JSON API for saved maps.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use map_store::{embed_path, MapConfiguration, MapSummary, NewMap};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Reply to a successful create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMap {
    pub id: String,
    pub embed_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub success: bool,
}

/// Unwrap a JSON body, turning extractor rejections into a 400.
pub(crate) fn map_body(payload: std::result::Result<Json<NewMap>, JsonRejection>) -> Result<NewMap> {
    payload
        .map(|Json(map)| map)
        .map_err(|rejection| AppError::BadRequest(format!("Invalid map data: {}", rejection.body_text())))
}

/// Save a new map.
pub async fn create_map(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewMap>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedMap>)> {
    let map = map_body(payload)?;
    let saved = state.store.create(map).await?;
    info!(id = %saved.id, states = saved.map.state_data.len(), "Created map");

    Ok((
        StatusCode::CREATED,
        Json(CreatedMap {
            embed_url: embed_path(&saved.id),
            id: saved.id,
            created_at: saved.created_at,
        }),
    ))
}

/// List saved maps, newest first.
pub async fn list_maps(State(state): State<AppState>) -> Result<Json<Vec<MapSummary>>> {
    Ok(Json(state.store.list().await?))
}

/// Fetch one saved map.
pub async fn get_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MapConfiguration>> {
    Ok(Json(state.store.get(&id).await?))
}

/// Delete one saved map.
pub async fn delete_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    state.store.delete(&id).await?;
    info!(id = %id, "Deleted map");
    Ok(Json(Deleted { success: true }))
}
