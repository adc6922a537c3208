use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::AdminApplicationRow;
use crate::models::job::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use crate::models::user::{ROLE_ADMIN, ROLE_CANDIDATE, ROLE_RECRUITER};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminSummary {
    pub recruiters: i64,
    pub candidates: i64,
    pub jobs: i64,
    pub pending_jobs: i64,
    pub applications: i64,
}

/// GET /api/admin/summary
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AdminSummary>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    let recruiters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(ROLE_RECRUITER)
        .fetch_one(&state.db)
        .await?;
    let candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(ROLE_CANDIDATE)
        .fetch_one(&state.db)
        .await?;
    let jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&state.db)
        .await?;
    let pending_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = $1")
        .bind(STATUS_PENDING)
        .fetch_one(&state.db)
        .await?;
    let applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(AdminSummary {
        recruiters,
        candidates,
        jobs,
        pending_jobs,
        applications,
    }))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AdminUserOut {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AdminUsersResponse {
    pub recruiters: Vec<AdminUserOut>,
    pub candidates: Vec<AdminUserOut>,
}

/// GET /api/admin/users
/// Latest 20 recruiters and candidates.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AdminUsersResponse>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    let recruiters: Vec<AdminUserOut> = sqlx::query_as(
        "SELECT id, name, email, created_at FROM users WHERE role = $1 ORDER BY created_at DESC LIMIT 20",
    )
    .bind(ROLE_RECRUITER)
    .fetch_all(&state.db)
    .await?;

    let candidates: Vec<AdminUserOut> = sqlx::query_as(
        "SELECT id, name, email, created_at FROM users WHERE role = $1 ORDER BY created_at DESC LIMIT 20",
    )
    .bind(ROLE_CANDIDATE)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(AdminUsersResponse {
        recruiters,
        candidates,
    }))
}

/// DELETE /api/admin/users/:user_id
/// Cascade: a candidate takes their applications with them; a recruiter
/// takes their jobs and those jobs' applications.
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    let mut tx = state.db.begin().await?;

    let target: Option<(String, String)> =
        sqlx::query_as("SELECT name, role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (name, role) = target.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    match role.as_str() {
        ROLE_CANDIDATE => {
            sqlx::query("DELETE FROM applications WHERE candidate_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        ROLE_RECRUITER => {
            sqlx::query(
                "DELETE FROM applications WHERE job_id IN (SELECT id FROM jobs WHERE recruiter_id = $1)",
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
            sqlx::query("DELETE FROM jobs WHERE recruiter_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        _ => {}
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(json!({
        "message": format!("User {name} deleted successfully (Cascade)")
    })))
}

#[derive(Debug, Deserialize)]
pub struct JobStatusFilter {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AdminJobOut {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub recruiter_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

/// GET /api/admin/jobs?status=pending|approved|rejected|all
/// Defaults to pending, the moderation queue.
pub async fn list_jobs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<JobStatusFilter>,
) -> Result<Json<Vec<AdminJobOut>>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    let status = filter
        .status
        .unwrap_or_else(|| STATUS_PENDING.to_string());
    let status = (status != "all").then_some(status);

    let jobs: Vec<AdminJobOut> = sqlx::query_as(
        r#"
        SELECT j.id, j.title, j.company, u.name AS recruiter_name, j.created_at, j.status
        FROM jobs j
        LEFT JOIN users u ON u.id = j.recruiter_id
        WHERE ($1::text IS NULL OR j.status = $1)
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(&status)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

#[derive(Debug, Deserialize)]
pub struct JobStatusUpdate {
    pub status: String,
}

/// PATCH /api/admin/jobs/:job_id/status
pub async fn update_job_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<JobStatusUpdate>,
) -> Result<Json<Value>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    if !matches!(
        payload.status.as_str(),
        STATUS_APPROVED | STATUS_REJECTED | STATUS_PENDING
    ) {
        return Err(AppError::Validation("Invalid status".to_string()));
    }

    let updated = sqlx::query("UPDATE jobs SET status = $1 WHERE id = $2")
        .bind(&payload.status)
        .bind(job_id)
        .execute(&state.db)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    Ok(Json(json!({ "message": format!("Job {}", payload.status) })))
}

#[derive(Debug, Serialize)]
pub struct AdminApplicationOut {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub recruiter_name: String,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// GET /api/admin/applications
/// Latest 100 applications joined across jobs, candidates, and recruiters.
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AdminApplicationOut>>, AppError> {
    user.require_role(ROLE_ADMIN)?;

    let rows: Vec<AdminApplicationRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.status, a.message, a.applied_at,
               j.title AS job_title, j.company,
               cu.name AS candidate_name, cu.email AS candidate_email,
               ru.name AS recruiter_name
        FROM applications a
        LEFT JOIN jobs j ON j.id = a.job_id
        LEFT JOIN users cu ON cu.id = a.candidate_id
        LEFT JOIN users ru ON ru.id = j.recruiter_id
        ORDER BY a.applied_at DESC
        LIMIT 100
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let out = rows
        .into_iter()
        .map(|row| AdminApplicationOut {
            id: row.id,
            job_title: row.job_title.unwrap_or_else(|| "Unknown".to_string()),
            company: row.company.unwrap_or_else(|| "Unknown".to_string()),
            candidate_name: row.candidate_name.unwrap_or_else(|| "Unknown".to_string()),
            candidate_email: row.candidate_email,
            recruiter_name: row.recruiter_name.unwrap_or_else(|| "Unknown".to_string()),
            status: row.status,
            message: row.message,
            applied_at: row.applied_at,
        })
        .collect();

    Ok(Json(out))
}
