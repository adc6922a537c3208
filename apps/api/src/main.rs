mod auth;
mod config;
mod db;
mod errors;
mod mailer;
mod matching;
mod models;
mod resume_text;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::mailer::RelayMailer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hired API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and run pending migrations
    let db = create_pool(&config.database_url).await?;

    // Resume uploads live on local disk
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("Upload directory ready at {}", config.upload_dir);

    // Initialize the mail relay client
    let mailer = Arc::new(RelayMailer::new(
        config.mail_relay_url.clone(),
        config.mail_relay_token.clone(),
        config.mail_from.clone(),
        config.public_url.clone(),
    ));
    info!("Mail relay client initialized");

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        mailer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
