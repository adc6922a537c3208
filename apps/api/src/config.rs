use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with context if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Password for the hardcoded single platform admin.
    pub admin_password: String,
    pub mail_relay_url: String,
    pub mail_relay_token: String,
    pub mail_from: String,
    /// Base URL used in email links.
    pub public_url: String,
    /// Directory where uploaded resume PDFs are stored.
    pub upload_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            admin_password: require_env("ADMIN_PASSWORD")?,
            mail_relay_url: require_env("MAIL_RELAY_URL")?,
            mail_relay_token: require_env("MAIL_RELAY_TOKEN")?,
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "alerts@hired.io".to_string()),
            public_url: std::env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads/resumes".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
