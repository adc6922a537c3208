use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_CANDIDATE: &str = "candidate";
pub const ROLE_RECRUITER: &str = "recruiter";
pub const ROLE_ADMIN: &str = "admin";

pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_CANDIDATE | ROLE_RECRUITER | ROLE_ADMIN)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Salted digest, never the plaintext.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    /// Stored resume filename under the uploads directory, candidates only.
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The user shape returned from register/login responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub role: String,
}
