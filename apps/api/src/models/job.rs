use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Placeholder shown when a recruiter leaves the company field blank.
pub const DEFAULT_COMPANY: &str = "Confidential";
/// Placeholder shown when a job carries no location.
pub const DEFAULT_LOCATION: &str = "Remote";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub description: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: String,
    pub status: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default = "default_job_type")]
    pub job_type: String,
}

fn default_job_type() -> String {
    "full-time".to_string()
}

/// Public job shape with display defaults applied.
#[derive(Debug, Clone, Serialize)]
pub struct JobOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub status: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for JobOut {
    fn from(row: JobRow) -> Self {
        JobOut {
            id: row.id,
            title: row.title,
            description: row.description,
            company: row.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            location: row.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            job_type: row.job_type,
            status: row.status,
            views: row.views,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_row(company: Option<&str>, location: Option<&str>) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            company: company.map(str::to_string),
            location: location.map(str::to_string),
            job_type: "full-time".to_string(),
            status: STATUS_PENDING.to_string(),
            views: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_out_applies_display_defaults() {
        let out = JobOut::from(job_row(None, None));
        assert_eq!(out.company, "Confidential");
        assert_eq!(out.location, "Remote");
    }

    #[test]
    fn test_job_out_keeps_provided_fields() {
        let out = JobOut::from(job_row(Some("Acme"), Some("Berlin")));
        assert_eq!(out.company, "Acme");
        assert_eq!(out.location, "Berlin");
    }

    #[test]
    fn test_job_create_defaults_type() {
        let job: JobCreate =
            serde_json::from_str(r#"{"title": "T", "description": "D"}"#).unwrap();
        assert_eq!(job.job_type, "full-time");
        assert!(job.company.is_none());
    }
}
