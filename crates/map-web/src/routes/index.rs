//! Index page listing saved maps.

use askama::Template;
use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// A saved map as shown on the index page.
pub struct MapEntry {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub embed_url: String,
    pub embed_code: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub maps: Vec<MapEntry>,
}

/// Render the index page.
pub async fn index_page(State(state): State<AppState>) -> Result<IndexTemplate> {
    let maps = state
        .store
        .list()
        .await?
        .into_iter()
        .map(|summary| MapEntry {
            created_at: summary.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            embed_code: state.config.embed_code(&summary.id),
            id: summary.id,
            title: summary.title,
            embed_url: summary.embed_url,
        })
        .collect();

    Ok(IndexTemplate { maps })
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::http::StatusCode;
    use map_store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_index_lists_maps() {
        let app = app(Arc::new(MemoryStore::with_demo()));
        let (status, html) = send(&app, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Demo US Map"));
        assert!(html.contains(r#"href="/embed/demo""#));
        assert!(html.contains("https://maps.example.org/embed/demo"));
    }

    #[tokio::test]
    async fn test_index_empty() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, html) = send(&app, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No maps saved yet"));
    }
}
