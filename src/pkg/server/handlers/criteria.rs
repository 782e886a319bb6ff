use axum::body::Bytes;
use axum::{
    extract::{Multipart, State},
    Json,
};
use reqwest::StatusCode;
use serde::Serialize;
use standard_error::{Interpolate, StandardError, Status};

use super::MAX_UPLOAD_BYTES;
use crate::pkg::internal::ai::rank::RankOps;
use crate::pkg::internal::ai::read::{self, extract_document};
use crate::pkg::server::state::AppState;
use crate::prelude::Result;

#[derive(Serialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<String>,
}

/// Derive ranking criteria from an uploaded job description (PDF/DOCX).
pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CriteriaResponse>> {
    let mut document: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        StandardError::new("ERR-MULTIPART-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })? {
        match field.name().unwrap_or("") {
            "file" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !read::supported(&content_type) {
                    return Err(
                        StandardError::new("ERR-FILE-001").code(StatusCode::BAD_REQUEST)
                    );
                }
                let data = field.bytes().await.map_err(|e| {
                    StandardError::new("ERR-MULTIPART-001")
                        .interpolate_err(e.to_string())
                        .code(StatusCode::BAD_REQUEST)
                })?;
                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(
                        StandardError::new("ERR-FILE-002").code(StatusCode::BAD_REQUEST)
                    );
                }
                document = Some((content_type, data));
            }
            _ => {
                let _ = field.bytes().await.map_err(|e| {
                    StandardError::new("ERR-MULTIPART-001")
                        .interpolate_err(e.to_string())
                        .code(StatusCode::BAD_REQUEST)
                })?;
            }
        }
    }

    let (content_type, data) =
        document.ok_or_else(|| StandardError::new("ERR-FILE-003").code(StatusCode::BAD_REQUEST))?;
    let text = extract_document(data.to_vec(), &content_type)?;
    tracing::info!("extracted {} chars from job description", text.len());

    let criteria = state.ai_client.derive_criteria(&text).await?;
    tracing::info!("derived {} ranking criteria", criteria.len());
    Ok(Json(CriteriaResponse { criteria }))
}
