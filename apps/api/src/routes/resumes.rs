use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/resumes/:filename
/// Serves a stored resume PDF. Filenames are opaque UUID-prefixed names
/// produced at upload time; anything path-like is rejected.
pub async fn serve_resume(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::Validation("Invalid resume filename".to_string()));
    }

    let path = std::path::Path::new(&state.config.upload_dir).join(&filename);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound("Resume not found".to_string()))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, data).into_response())
}
