use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::alerts::process_alerts;
use crate::models::job::{JobCreate, JobOut, JobRow, STATUS_APPROVED};
use crate::models::user::{ROLE_CANDIDATE, ROLE_RECRUITER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobFilter {
    pub keyword: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

/// GET /api/jobs
/// Public listing. Approved jobs only, newest first, optional keyword,
/// location, and type filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobOut>>, AppError> {
    let job_type = filter.job_type.filter(|t| t != "all");

    let jobs: Vec<JobRow> = sqlx::query_as(
        r#"
        SELECT * FROM jobs
        WHERE status = $1
          AND ($2::text IS NULL
               OR title ILIKE '%' || $2 || '%'
               OR company ILIKE '%' || $2 || '%'
               OR description ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR location ILIKE '%' || $3 || '%')
          AND ($4::text IS NULL OR job_type = $4)
        ORDER BY created_at DESC
        LIMIT 50
        "#,
    )
    .bind(STATUS_APPROVED)
    .bind(&filter.keyword)
    .bind(&filter.location)
    .bind(&job_type)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs.into_iter().map(JobOut::from).collect()))
}

/// POST /api/jobs
/// Recruiter only. New jobs are forced to pending status; the alert scan
/// runs inline before the response so notifications go out immediately.
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<JobCreate>,
) -> Result<Json<JobOut>, AppError> {
    user.require_role(ROLE_RECRUITER)?;

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs (recruiter_id, title, description, company, location, job_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.company)
    .bind(&payload.location)
    .bind(&payload.job_type)
    .fetch_one(&state.db)
    .await?;

    // The job is already persisted; a failure while scanning alerts must not
    // fail the request.
    if let Err(e) = process_alerts(&state.db, state.mailer.as_ref(), &job).await {
        warn!(job = %job.id, "Alert scan failed: {e}");
    }

    Ok(Json(JobOut::from(job)))
}

/// POST /api/jobs/:job_id/apply
/// Candidate only. One application per candidate per job.
pub async fn apply_to_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require_role(ROLE_CANDIDATE)?;

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    if job.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE job_id = $1 AND candidate_id = $2")
            .bind(job_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Already applied".to_string()));
    }

    sqlx::query("INSERT INTO applications (job_id, candidate_id, resume) VALUES ($1, $2, $3)")
        .bind(job_id)
        .bind(user.id)
        .bind(&user.resume)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Application submitted" })))
}

/// POST /api/jobs/:job_id/view
/// Public view counter used by recruiter analytics.
pub async fn view_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = $1")
        .bind(job_id)
        .execute(&state.db)
        .await?;
    Ok(Json(json!({ "status": "viewed" })))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct JobAnalytics {
    pub title: String,
    pub views: i32,
    pub applications: i64,
}

/// GET /api/recruiter/analytics
/// Per-job views and application counts for the recruiter's own postings.
pub async fn recruiter_analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<JobAnalytics>>, AppError> {
    user.require_role(ROLE_RECRUITER)?;

    let analytics: Vec<JobAnalytics> = sqlx::query_as(
        r#"
        SELECT j.title, j.views, COUNT(a.id) AS applications
        FROM jobs j
        LEFT JOIN applications a ON a.job_id = j.id
        WHERE j.recruiter_id = $1
        GROUP BY j.id, j.title, j.views
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(analytics))
}
