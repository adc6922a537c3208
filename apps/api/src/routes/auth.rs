use axum::{
    extract::{Multipart, State},
    Form, Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::{create_access_token, hash_password, verify_password, ADMIN_USER_ID};
use crate::errors::AppError;
use crate::models::user::{is_valid_role, UserRow, UserSummary, ROLE_ADMIN, ROLE_CANDIDATE};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

struct RegisterForm {
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    resume: Option<(String, Bytes)>,
}

async fn read_register_form(mut multipart: Multipart) -> Result<RegisterForm, AppError> {
    let mut form = RegisterForm {
        name: None,
        username: None,
        email: None,
        password: None,
        role: None,
        resume: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "resume.pdf".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                form.resume = Some((filename, data));
            }
            name => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                match name {
                    "name" => form.name = Some(value),
                    "username" => form.username = Some(value),
                    "email" => form.email = Some(value),
                    "password" => form.password = Some(value),
                    "role" => form.role = Some(value),
                    _ => {} // unknown fields ignored
                }
            }
        }
    }

    Ok(form)
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Field '{field}' is required")))
}

/// POST /api/auth/register
/// Multipart form: name, username, email, password, role, optional resume PDF.
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AuthResponse>, AppError> {
    let form = read_register_form(multipart).await?;

    let name = required(form.name, "name")?;
    let username = required(form.username, "username")?;
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;
    let role = required(form.role, "role")?;

    if !is_valid_role(&role) {
        return Err(AppError::Validation("Invalid role".to_string()));
    }

    let username_taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(&username)
            .fetch_optional(&state.db)
            .await?;
    if username_taken.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let email_taken: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    // Candidates may attach a resume PDF; the stored name is prefixed with a
    // fresh UUID so uploads never collide.
    let mut resume_filename = None;
    if role == ROLE_CANDIDATE {
        if let Some((original_name, data)) = form.resume {
            let filename = format!("{}_{}", Uuid::new_v4(), sanitize_filename(&original_name));
            let path = std::path::Path::new(&state.config.upload_dir).join(&filename);
            tokio::fs::write(&path, &data)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to store resume: {e}")))?;
            resume_filename = Some(filename);
        }
    }

    let user: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (name, username, email, password, role, resume)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&name)
    .bind(&username)
    .bind(&email)
    .bind(hash_password(&password))
    .bind(&role)
    .bind(&resume_filename)
    .fetch_one(&state.db)
    .await?;

    // Welcome email is fire-and-forget; delivery failure never blocks signup.
    let mailer = state.mailer.clone();
    let (welcome_to, welcome_name) = (email.clone(), name.clone());
    tokio::spawn(async move {
        if let Err(e) = mailer.send_welcome(&welcome_to, &welcome_name).await {
            warn!("Failed to send welcome email to {welcome_to}: {e}");
        }
    });

    let token = create_access_token(&state.config.jwt_secret, user.id, &user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: UserSummary {
            id: user.id,
            name: user.name,
            username: user.username,
            role: user.role,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AuthResponse>, AppError> {
    // Hardcoded single admin, never stored in the database.
    if form.username == "admin" && form.password == state.config.admin_password {
        let token = create_access_token(&state.config.jwt_secret, ADMIN_USER_ID, ROLE_ADMIN)?;
        return Ok(Json(AuthResponse {
            token,
            user: UserSummary {
                id: ADMIN_USER_ID,
                name: "Platform Admin".to_string(),
                username: "admin".to_string(),
                role: ROLE_ADMIN.to_string(),
            },
        }));
    }

    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(&form.username)
        .fetch_optional(&state.db)
        .await?;

    let user = match user {
        Some(u) if verify_password(&form.password, &u.password) => u,
        _ => return Err(AppError::Validation("Invalid credentials".to_string())),
    };

    let token = create_access_token(&state.config.jwt_secret, user.id, &user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: UserSummary {
            id: user.id,
            name: user.name,
            username: user.username,
            role: user.role,
        },
    }))
}

/// Keeps only the final path component and strips characters that could
/// escape the uploads directory.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "resume.pdf".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_filename("my-cv_2024.pdf"), "my-cv_2024.pdf");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\x\\cv.pdf"), "cv.pdf");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dot_names() {
        assert_eq!(sanitize_filename(""), "resume.pdf");
        assert_eq!(sanitize_filename("...."), "resume.pdf");
        assert_eq!(sanitize_filename("///"), "resume.pdf");
    }
}
