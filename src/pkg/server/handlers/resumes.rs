use axum::body::Bytes;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use standard_error::{Interpolate, StandardError, Status};

use super::MAX_UPLOAD_BYTES;
use crate::pkg::internal::ai::rank::RankOps;
use crate::pkg::internal::ai::read::{self, extract_document};
use crate::pkg::internal::report;
use crate::pkg::server::state::AppState;
use crate::prelude::Result;

/// Score uploaded resumes against the supplied criteria and return the
/// aggregate as a spreadsheet download. Resumes are scored one at a time in
/// upload order; a resume the model fails on degrades to the default record
/// instead of failing the batch.
pub async fn score(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut criteria_raw = String::new();
    let mut resume_files: Vec<(String, String, Bytes)> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        StandardError::new("ERR-MULTIPART-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })? {
        match field.name().unwrap_or("") {
            "criteria" => {
                criteria_raw = field.text().await.map_err(|e| {
                    StandardError::new("ERR-MULTIPART-001")
                        .interpolate_err(e.to_string())
                        .code(StatusCode::BAD_REQUEST)
                })?;
            }
            "files" => {
                let file_name = field.file_name().unwrap_or("unknown").to_string();
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
                resume_files.push((file_name, content_type, data));
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

    let criteria: Vec<String> = serde_json::from_str(&criteria_raw).map_err(|e| {
        StandardError::new("ERR-CRITERIA-002")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    tracing::info!("parsed {} ranking criteria", criteria.len());

    let mut records = Vec::with_capacity(resume_files.len());
    for (file_name, content_type, data) in resume_files {
        let text = extract_document(data.to_vec(), &content_type)?;
        tracing::debug!("extracted {} chars from {}", text.len(), file_name);
        let evaluation = state.ai_client.score_resume(&text, &criteria).await;
        tracing::info!("scored {} as {}", file_name, evaluation.candidate_name);
        records.push(evaluation);
    }

    let table = report::to_table(&records);
    let body = report::write_csv(&table)?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report::REPORT_FILENAME),
            ),
        ],
        body,
    ))
}
