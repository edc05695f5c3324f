//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::jobs::{spawn_analysis, AnalysisJob, AnalysisView};
use crate::analysis::models::AnalysisResult;
use crate::analysis::upload::{dedup_files, UploadedFile, MAX_FILES};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub job_id: Uuid,
    pub files_accepted: usize,
    pub duplicates_dropped: usize,
    pub backend: &'static str,
}

/// POST /api/v1/analyses
///
/// Accepts one or more contract files as multipart parts (any field name),
/// drops byte-identical duplicates and starts a background analysis job.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let file_name = field
            .file_name()
            .map(String::from)
            .unwrap_or_else(|| format!("upload-{}", files.len() + 1));
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;

        files.push(UploadedFile::new(file_name, content_type.as_deref(), bytes)?);
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one contract file (PNG, JPG or PDF)".to_string(),
        ));
    }

    let (files, duplicates_dropped) = dedup_files(files);
    if files.len() > MAX_FILES {
        return Err(AppError::Validation(format!(
            "At most {MAX_FILES} files can be analyzed at once"
        )));
    }

    let files_accepted = files.len();
    let job_id = spawn_analysis(&state.jobs, state.analyzer.clone(), files).await;
    info!(
        "Started analysis job {job_id} for {files_accepted} file(s) ({} tracked)",
        state.jobs.len().await
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            job_id,
            files_accepted,
            duplicates_dropped,
            backend: state.analyzer.backend(),
        }),
    ))
}

/// GET /api/v1/analyses/:id
///
/// Poll target. Includes the annotated document once the job has completed.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisJob>, AppError> {
    state
        .jobs
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// DELETE /api/v1/analyses/:id
///
/// "Analyze another contract": forgets the job and its result.
pub async fn handle_discard_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.jobs.discard(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Analysis {id} not found")))
    }
}

/// POST /api/v1/highlight
///
/// Runs the overlay engine on an analysis produced elsewhere.
pub async fn handle_highlight(
    Json(analysis): Json<AnalysisResult>,
) -> Result<Json<AnalysisView>, AppError> {
    let view = AnalysisView::build(analysis)?;
    Ok(Json(view))
}
