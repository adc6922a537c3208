use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored (email, keyword) pair. New matching jobs trigger one
/// notification per alert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub keyword: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AlertCreate {
    /// Defaults to the authenticated user's email when omitted.
    pub email: Option<String>,
    pub keyword: String,
}
