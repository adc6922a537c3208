use sqlx::PgPool;
use tracing::{info, warn};

use crate::mailer::Mailer;
use crate::models::alert::AlertRow;
use crate::models::job::{JobRow, DEFAULT_COMPANY, DEFAULT_LOCATION};

/// Case-insensitive substring containment of the alert keyword against the
/// job title or description.
///
/// Intentionally NOT keyword-set intersection: alerts use a cheaper, rawer
/// test than match scoring, and the two must stay separate.
pub fn alert_matches(keyword: &str, title: &str, description: &str) -> bool {
    let keyword = keyword.to_lowercase();
    title.to_lowercase().contains(&keyword) || description.to_lowercase().contains(&keyword)
}

/// Sends one job-alert email per matching alert. Returns the number of
/// successful deliveries.
///
/// Failures are logged per alert and never stop the scan; duplicate emails
/// across alerts each get their own notification. No ordering guarantee.
pub async fn notify_matching_alerts(
    alerts: &[AlertRow],
    job: &JobRow,
    mailer: &dyn Mailer,
) -> usize {
    let mut sent = 0;
    for alert in alerts {
        if !alert_matches(&alert.keyword, &job.title, &job.description) {
            continue;
        }

        let keyword = alert.keyword.to_lowercase();
        let company = job.company.as_deref().unwrap_or(DEFAULT_COMPANY);
        let location = job.location.as_deref().unwrap_or(DEFAULT_LOCATION);

        match mailer
            .send_job_alert(&alert.email, &keyword, &job.title, company, location)
            .await
        {
            Ok(()) => {
                info!(job = %job.id, email = %alert.email, keyword = %keyword, "Job alert sent");
                sent += 1;
            }
            Err(e) => {
                warn!(job = %job.id, email = %alert.email, "Failed to send job alert: {e}");
            }
        }
    }
    sent
}

/// Scans all stored alerts against a freshly created job and notifies
/// matches. Runs inline in the create-job request, before the response.
pub async fn process_alerts(
    pool: &PgPool,
    mailer: &dyn Mailer,
    job: &JobRow,
) -> Result<usize, sqlx::Error> {
    let alerts: Vec<AlertRow> =
        sqlx::query_as("SELECT * FROM alerts").fetch_all(pool).await?;
    Ok(notify_matching_alerts(&alerts, job, mailer).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MailError;
    use crate::models::job::STATUS_PENDING;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct SentAlert {
        to: String,
        keyword: String,
        title: String,
        company: String,
        location: String,
    }

    /// Records job alerts; optionally fails delivery to listed addresses.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<SentAlert>>,
        fail_for: Vec<String>,
        attempts: Mutex<usize>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_welcome(&self, _to: &str, _username: &str) -> Result<(), MailError> {
            Ok(())
        }

        async fn send_job_alert(
            &self,
            to: &str,
            keyword: &str,
            title: &str,
            company: &str,
            location: &str,
        ) -> Result<(), MailError> {
            *self.attempts.lock().unwrap() += 1;
            if self.fail_for.iter().any(|f| f == to) {
                return Err(MailError::Relay {
                    status: 502,
                    message: "upstream unavailable".to_string(),
                });
            }
            self.sent.lock().unwrap().push(SentAlert {
                to: to.to_string(),
                keyword: keyword.to_string(),
                title: title.to_string(),
                company: company.to_string(),
                location: location.to_string(),
            });
            Ok(())
        }
    }

    fn alert(email: &str, keyword: &str) -> AlertRow {
        AlertRow {
            id: Uuid::new_v4(),
            user_id: None,
            email: email.to_string(),
            keyword: keyword.to_string(),
            created_at: Utc::now(),
        }
    }

    fn job(title: &str, description: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            company: None,
            location: None,
            job_type: "full-time".to_string(),
            status: STATUS_PENDING.to_string(),
            views: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_keyword_matches_title_case_insensitive() {
        assert!(alert_matches("python", "Senior Python Engineer", "..."));
        assert!(alert_matches("PYTHON", "senior python engineer", "..."));
    }

    #[test]
    fn test_keyword_matches_description() {
        assert!(alert_matches("rust", "Backend Engineer", "We use Rust daily"));
    }

    #[test]
    fn test_no_match_anywhere() {
        assert!(!alert_matches("rust", "Senior Python Engineer", "no crabs here"));
    }

    #[test]
    fn test_substring_not_whole_word() {
        // Raw containment: "go" matches inside "Django".
        assert!(alert_matches("go", "Django Developer", ""));
    }

    #[tokio::test]
    async fn test_notify_sends_one_email_per_matching_alert() {
        let mailer = RecordingMailer::default();
        let alerts = vec![
            alert("a@example.com", "rust"),
            alert("a@example.com", "engineer"),
            alert("b@example.com", "haskell"),
        ];
        let job = job("Rust Engineer", "systems work");

        let sent = notify_matching_alerts(&alerts, &job, &mailer).await;

        // Same address registered under two matching keywords gets two
        // notifications; the non-matching alert gets none.
        assert_eq!(sent, 2);
        let recorded = mailer.sent.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.iter().all(|s| s.to == "a@example.com"));
    }

    #[tokio::test]
    async fn test_notify_lowercases_keyword_and_applies_defaults() {
        let mailer = RecordingMailer::default();
        let alerts = vec![alert("c@example.com", "RuSt")];
        let job = job("Rust Engineer", "");

        notify_matching_alerts(&alerts, &job, &mailer).await;

        let recorded = mailer.sent.lock().unwrap();
        assert_eq!(recorded[0].keyword, "rust");
        assert_eq!(recorded[0].company, "Confidential");
        assert_eq!(recorded[0].location, "Remote");
    }

    #[tokio::test]
    async fn test_failed_delivery_does_not_stop_scan() {
        let mailer = RecordingMailer {
            fail_for: vec!["broken@example.com".to_string()],
            ..Default::default()
        };
        let alerts = vec![
            alert("broken@example.com", "rust"),
            alert("ok@example.com", "rust"),
        ];
        let job = job("Rust Engineer", "");

        let sent = notify_matching_alerts(&alerts, &job, &mailer).await;

        assert_eq!(sent, 1);
        assert_eq!(*mailer.attempts.lock().unwrap(), 2);
        assert_eq!(mailer.sent.lock().unwrap()[0].to, "ok@example.com");
    }
}
