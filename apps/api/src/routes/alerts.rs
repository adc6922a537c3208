use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::{AuthUser, ADMIN_USER_ID};
use crate::errors::AppError;
use crate::models::alert::AlertCreate;
use crate::state::AppState;

/// POST /api/alerts
/// Registers a job alert. The email defaults to the caller's account email;
/// supplying neither is a validation error.
pub async fn create_alert(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AlertCreate>,
) -> Result<Json<Value>, AppError> {
    let email = payload
        .email
        .filter(|e| !e.is_empty())
        .or_else(|| user.email.clone())
        .ok_or_else(|| AppError::Validation("Email required".to_string()))?;

    // The static admin has no users row; its alerts carry no owner.
    let owner = (user.id != ADMIN_USER_ID).then_some(user.id);

    sqlx::query("INSERT INTO alerts (user_id, email, keyword) VALUES ($1, $2, $3)")
        .bind(owner)
        .bind(&email)
        .bind(&payload.keyword)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": format!("Alert set for '{}'", payload.keyword)
    })))
}
