//! Outbound email. All delivery goes through the `Mailer` trait so handlers
//! and the alert scan can run against a recording double in tests.
//!
//! Delivery failures are surfaced as explicit errors; call sites decide to
//! log and move on. Nothing in this module aborts a request.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod templates;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay error (status {status}): {message}")]
    Relay { status: u16, message: String },
}

/// The email delivery collaborator. Carried in `AppState` as `Arc<dyn Mailer>`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_welcome(&self, to: &str, username: &str) -> Result<(), MailError>;

    async fn send_job_alert(
        &self,
        to: &str,
        keyword: &str,
        title: &str,
        company: &str,
        location: &str,
    ) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Production mailer. Posts JSON messages to an HTTP mail relay.
pub struct RelayMailer {
    client: Client,
    relay_url: String,
    relay_token: String,
    from: String,
    base_url: String,
}

impl RelayMailer {
    pub fn new(relay_url: String, relay_token: String, from: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            relay_url,
            relay_token,
            from,
            base_url,
        }
    }

    async fn deliver(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(&self.relay_token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Relay {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Mail relay accepted message to {to}: {subject}");
        Ok(())
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send_welcome(&self, to: &str, username: &str) -> Result<(), MailError> {
        let html = templates::welcome_body(&self.base_url, username);
        self.deliver(to, "Welcome to Hired.io!", &html).await
    }

    async fn send_job_alert(
        &self,
        to: &str,
        keyword: &str,
        title: &str,
        company: &str,
        location: &str,
    ) -> Result<(), MailError> {
        let html = templates::job_alert_body(&self.base_url, keyword, title, company, location);
        let subject = format!("New Job Alert: {title}");
        self.deliver(to, &subject, &html).await
    }
}
