pub mod admin;
pub mod alerts;
pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod resumes;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Jobs
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:job_id/apply", post(jobs::apply_to_job))
        .route("/api/jobs/:job_id/view", post(jobs::view_job))
        // Recruiter
        .route(
            "/api/recruiter/applications",
            get(applications::recruiter_applications),
        )
        .route("/api/recruiter/analytics", get(jobs::recruiter_analytics))
        .route(
            "/api/applications/:app_id/status",
            patch(applications::update_application_status),
        )
        // Candidate
        .route(
            "/api/candidate/applications",
            get(applications::candidate_applications),
        )
        // Alerts
        .route("/api/alerts", post(alerts::create_alert))
        // Resume files
        .route("/api/resumes/:filename", get(resumes::serve_resume))
        // Admin
        .route("/api/admin/summary", get(admin::summary))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/:user_id", delete(admin::delete_user))
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route(
            "/api/admin/jobs/:job_id/status",
            patch(admin::update_job_status),
        )
        .route("/api/admin/applications", get(admin::list_applications))
        .with_state(state)
}
