//! Route handlers for the map server.

pub mod embed;
pub mod health;
pub mod index;
pub mod legacy;
pub mod maps;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        // HTML pages
        .route("/", get(index::index_page))
        .route("/embed/:id", get(embed::embed_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route(
            "/api/maps",
            get(maps::list_maps)
                .post(maps::create_map)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/maps/:id",
            get(maps::get_map)
                .delete(maps::delete_map)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/upload",
            post(upload::upload)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Legacy endpoints used by embeds on other sites
        .merge(legacy::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;
    use map_store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        let app = app(Arc::new(MemoryStore::new()));

        for (method, uri) in [
            ("PUT", "/api/maps"),
            ("PATCH", "/api/maps/abc"),
            ("GET", "/api/upload"),
            ("DELETE", "/api/save-map"),
        ] {
            let (status, json) = send_json(&app, empty_request(method, uri)).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
            assert_eq!(json["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, json) = send_json(&app, empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["store"], "memory");
    }
}
