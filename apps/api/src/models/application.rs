use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const APP_STATUS_PENDING: &str = "pending";
pub const APP_STATUS_SELECTED: &str = "selected";
pub const APP_STATUS_REJECTED: &str = "rejected";

pub fn is_valid_application_status(status: &str) -> bool {
    matches!(
        status,
        APP_STATUS_PENDING | APP_STATUS_SELECTED | APP_STATUS_REJECTED
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    /// Resume filename snapshot taken at apply time.
    pub resume: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// One application to a recruiter's job, joined with the job and the
/// candidate. The inner joins drop orphaned applications whose candidate
/// no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct RecruiterApplicationRow {
    pub id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub job_description: String,
    pub job_company: Option<String>,
    pub candidate_name: String,
    pub candidate_role: String,
    pub candidate_username: String,
    pub candidate_resume: Option<String>,
}

/// A candidate's own application joined with its job.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateApplicationRow {
    pub id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

/// Moderation view: application joined with job, candidate, and recruiter.
#[derive(Debug, Clone, FromRow)]
pub struct AdminApplicationRow {
    pub id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub recruiter_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_application_statuses() {
        assert!(is_valid_application_status("pending"));
        assert!(is_valid_application_status("selected"));
        assert!(is_valid_application_status("rejected"));
    }

    #[test]
    fn test_invalid_application_statuses() {
        assert!(!is_valid_application_status("approved"));
        assert!(!is_valid_application_status(""));
    }
}
