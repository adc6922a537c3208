use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::match_score;
use crate::models::application::{
    is_valid_application_status, ApplicationRow, CandidateApplicationRow, RecruiterApplicationRow,
};
use crate::models::job::{JobRow, DEFAULT_COMPANY, DEFAULT_LOCATION};
use crate::models::user::{ROLE_CANDIDATE, ROLE_RECRUITER};
use crate::resume_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecruiterApplicationOut {
    pub id: Uuid,
    pub job_title: String,
    pub candidate_name: String,
    pub resume: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status: String,
    pub message: Option<String>,
    /// Recomputed on every read, never persisted.
    pub match_score: u32,
}

/// GET /api/recruiter/applications
/// Applications to the recruiter's jobs, newest 50, each with a freshly
/// computed match score. The candidate join is inner, so applications whose
/// candidate was deleted disappear from the list.
pub async fn recruiter_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<RecruiterApplicationOut>>, AppError> {
    user.require_role(ROLE_RECRUITER)?;

    let rows: Vec<RecruiterApplicationRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.status, a.message, a.applied_at,
               j.title AS job_title, j.description AS job_description,
               j.company AS job_company,
               u.name AS candidate_name, u.role AS candidate_role,
               u.username AS candidate_username, u.resume AS candidate_resume
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        JOIN users u ON u.id = a.candidate_id
        WHERE j.recruiter_id = $1
        ORDER BY a.applied_at DESC
        LIMIT 50
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let job_text = format!(
            "{} {} {}",
            row.job_title,
            row.job_description,
            row.job_company.as_deref().unwrap_or("")
        );

        let mut candidate_text = String::new();
        if let Some(filename) = &row.candidate_resume {
            let path = FsPath::new(&state.config.upload_dir).join(filename);
            match resume_text::extract_pdf_text(path).await {
                Ok(text) => candidate_text = text,
                Err(e) => {
                    warn!(application = %row.id, "Resume text extraction failed: {e:#}");
                }
            }
        }
        if candidate_text.is_empty() {
            candidate_text = resume_text::fallback_text(
                &row.candidate_name,
                &row.candidate_role,
                &row.candidate_username,
            );
        }

        out.push(RecruiterApplicationOut {
            id: row.id,
            job_title: row.job_title,
            candidate_name: row.candidate_name,
            resume: row.candidate_resume,
            applied_at: row.applied_at,
            status: row.status,
            message: row.message,
            match_score: match_score(&job_text, &candidate_text),
        });
    }

    Ok(Json(out))
}

#[derive(Debug, Deserialize)]
pub struct ApplicationUpdate {
    pub status: String,
    pub message: Option<String>,
}

/// PATCH /api/applications/:app_id/status
/// Recruiter only, and only for applications to their own jobs.
pub async fn update_application_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(app_id): Path<Uuid>,
    Json(payload): Json<ApplicationUpdate>,
) -> Result<Json<Value>, AppError> {
    user.require_role(ROLE_RECRUITER)?;

    let app: Option<ApplicationRow> = sqlx::query_as("SELECT * FROM applications WHERE id = $1")
        .bind(app_id)
        .fetch_optional(&state.db)
        .await?;
    let app = app.ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(app.job_id)
        .fetch_optional(&state.db)
        .await?;
    match job {
        Some(j) if j.recruiter_id == user.id => {}
        _ => return Err(AppError::Forbidden),
    }

    if !is_valid_application_status(&payload.status) {
        return Err(AppError::Validation("Invalid status".to_string()));
    }

    sqlx::query(
        "UPDATE applications SET status = $1, message = COALESCE($2, message) WHERE id = $3",
    )
    .bind(&payload.status)
    .bind(&payload.message)
    .bind(app_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Application updated" })))
}

#[derive(Debug, Serialize)]
pub struct CandidateApplicationOut {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// GET /api/candidate/applications
pub async fn candidate_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CandidateApplicationOut>>, AppError> {
    user.require_role(ROLE_CANDIDATE)?;

    let rows: Vec<CandidateApplicationRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.status, a.message, a.applied_at,
               j.title AS job_title, j.company, j.location
        FROM applications a
        LEFT JOIN jobs j ON j.id = a.job_id
        WHERE a.candidate_id = $1
        ORDER BY a.applied_at DESC
        LIMIT 50
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let out = rows
        .into_iter()
        .map(|row| CandidateApplicationOut {
            id: row.id,
            job_title: row.job_title.unwrap_or_else(|| "Unknown".to_string()),
            company: row.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            location: row.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            status: row.status,
            message: row.message,
            applied_at: row.applied_at,
        })
        .collect();

    Ok(Json(out))
}
