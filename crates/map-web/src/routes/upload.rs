//! Spreadsheet upload and ingest.

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use state_data::IngestOutput;
use tracing::{info, warn};

use crate::error::{AppError, Result};

/// Normalized upload plus a message for the editor.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub output: IngestOutput,
    pub message: String,
}

/// `POST /api/upload` with a multipart `file` field (CSV or Excel).
pub async fn upload(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart =
        multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        warn!("Multipart read failed: {}", err);
        AppError::BadRequest(err.body_text())
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|err| {
            warn!("Upload body read failed: {}", err);
            AppError::BadRequest(err.body_text())
        })?;
        file = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    info!(file = %file_name, size = bytes.len(), "Processing upload");

    let name = file_name.clone();
    let output = tokio::task::spawn_blocking(move || state_data::ingest_file(&name, &bytes))
        .await
        .map_err(|err| AppError::Internal(format!("ingest task failed: {}", err)))??;

    let message = output.summary_message();
    info!(file = %file_name, states = output.state_data.len(), "Upload ingested");

    Ok(Json(UploadResponse { output, message }))
}
