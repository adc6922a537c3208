use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum
/// extractors. Collaborators live here as explicit handles so handlers and
/// the alert scan stay testable with doubles.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
}
