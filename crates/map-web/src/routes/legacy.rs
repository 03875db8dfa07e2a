//! Legacy endpoints kept for embeds and editors hosted on other origins.
//!
//! These answer any origin and reply 200 to a bare `OPTIONS`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use map_store::{MapConfiguration, NewMap};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::maps::map_body;
use super::method_not_allowed;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetMapParams {
    pub id: Option<String>,
}

/// Reply to a legacy save, with absolute URLs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMap {
    pub success: bool,
    pub map_id: String,
    pub embed_url: String,
    pub embed_code: String,
}

/// Routes under the permissive CORS policy.
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/get-map",
            get(get_map).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/save-map",
            post(save_map).options(preflight).fallback(method_not_allowed),
        )
        .layer(cors)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/get-map?id=...`
pub async fn get_map(
    State(state): State<AppState>,
    Query(params): Query<GetMapParams>,
) -> Result<Json<MapConfiguration>> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("No map ID provided".to_string()))?;

    Ok(Json(state.store.get(&id).await?))
}

/// `POST /api/save-map`
pub async fn save_map(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewMap>, JsonRejection>,
) -> Result<Json<SavedMap>> {
    let map = map_body(payload)?;
    let saved = state.store.create(map).await?;
    info!(id = %saved.id, "Saved map via legacy endpoint");

    Ok(Json(SavedMap {
        success: true,
        embed_url: state.config.embed_url(&saved.id),
        embed_code: state.config.embed_code(&saved.id),
        map_id: saved.id,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use map_store::{MemoryStore, DEMO_MAP_ID};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_then_get() {
        let app = app(Arc::new(MemoryStore::new()));

        let body = json!({ "stateData": [{ "stateCode": "TX", "stateName": "Texas", "value": 25 }] });
        let (status, saved) = send_json(&app, json_request("POST", "/api/save-map", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["success"], true);
        let id = saved["mapId"].as_str().unwrap();
        assert_eq!(saved["embedUrl"], format!("{}/embed/{}", PUBLIC_URL, id));
        assert_eq!(
            saved["embedCode"],
            format!(
                r#"<iframe src="{}/embed/{}" width="100%" height="500" frameborder="0"></iframe>"#,
                PUBLIC_URL, id
            )
        );

        let (status, map) =
            send_json(&app, empty_request("GET", &format!("/api/get-map?id={}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(map["stateData"][0]["stateCode"], "TX");
        assert_eq!(map["title"], "US Map");
    }

    #[tokio::test]
    async fn test_get_map_errors() {
        let app = app(Arc::new(MemoryStore::with_demo()));

        let (status, json) = send_json(&app, empty_request("GET", "/api/get-map")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No map ID provided");

        let (status, _) = send_json(&app, empty_request("GET", "/api/get-map?id=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send_json(&app, empty_request("GET", "/api/get-map?id=..%2Fetc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid map ID");

        let (status, _) = send_json(&app, empty_request("GET", "/api/get-map?id=missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, map) = send_json(
            &app,
            empty_request("GET", &format!("/api/get-map?id={}", DEMO_MAP_ID)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(map["title"], "Demo US Map");
    }

    #[tokio::test]
    async fn test_cors_and_options() {
        let app = app(Arc::new(MemoryStore::with_demo()));

        let (status, body) = send(&app, empty_request("OPTIONS", "/api/save-map")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let request = Request::builder()
            .uri("/api/get-map?id=demo")
            .header("origin", "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );

        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/save-map")
            .header("origin", "https://elsewhere.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app, preflight).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
