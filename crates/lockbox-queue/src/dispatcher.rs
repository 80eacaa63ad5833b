//! Notification dispatch seam.
//!
//! The worker turns each [`QueueJob`] into a recipient plus
//! [`TemplateParams`] and hands them to a [`NotificationDispatcher`].
//! Rendering and transport live behind the trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use lockbox_core::config::NotificationConfig;
use serde::Serialize;
use tracing::info;

use crate::error::DispatchError;
use crate::job::QueueJob;

/// Which message a notification renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    VerifyEmail,
    SecretCreated,
}

/// Everything a transport needs to render one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub template: Template,
    pub subject: String,
    pub sender: Option<String>,
    pub values: BTreeMap<String, String>,
}

impl TemplateParams {
    /// Build the recipient and parameters for `job`.
    pub fn for_job(job: &QueueJob, config: &NotificationConfig) -> (String, Self) {
        let mut values = BTreeMap::new();
        let (template, subject) = match job {
            QueueJob::VerifyEmail { token, .. } => {
                values.insert("verify_url".to_string(), verification_url(config, token));
                (Template::VerifyEmail, "Verify Your Email")
            }
            QueueJob::SecretCreated {
                owner_id,
                website_name,
                ..
            } => {
                values.insert("owner_id".to_string(), owner_id.clone());
                values.insert("website_name".to_string(), website_name.clone());
                (Template::SecretCreated, "New password saved")
            }
        };

        let params = Self {
            template,
            subject: subject.to_string(),
            sender: config.sender.clone(),
            values,
        };
        (job.recipient().to_string(), params)
    }
}

/// `<frontend_url>/verified-email?token=<token>`
fn verification_url(config: &NotificationConfig, token: &str) -> String {
    format!(
        "{}/verified-email?token={}",
        config.frontend_url.trim_end_matches('/'),
        token
    )
}

/// Delivers rendered notifications. Called once per dequeued job.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, recipient: &str, params: &TemplateParams) -> Result<(), DispatchError>;
}

/// Dispatcher that only records notifications in the log.
#[derive(Debug, Default)]
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn send(&self, recipient: &str, params: &TemplateParams) -> Result<(), DispatchError> {
        if !recipient.contains('@') {
            return Err(DispatchError::Rejected(format!(
                "{recipient:?} is not an email address"
            )));
        }
        let keys: Vec<&str> = params.values.keys().map(String::as_str).collect();
        info!(
            recipient,
            template = ?params.template,
            subject = %params.subject,
            params = ?keys,
            "notification dispatched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotificationConfig {
        NotificationConfig {
            frontend_url: "https://app.example.com/".to_string(),
            sender: Some("noreply@example.com".to_string()),
        }
    }

    #[test]
    fn test_verify_email_params() {
        let job = QueueJob::VerifyEmail {
            email: "a@example.com".to_string(),
            token: "abc123".to_string(),
        };
        let (recipient, params) = TemplateParams::for_job(&job, &config());

        assert_eq!(recipient, "a@example.com");
        assert_eq!(params.template, Template::VerifyEmail);
        assert_eq!(params.subject, "Verify Your Email");
        assert_eq!(params.sender.as_deref(), Some("noreply@example.com"));
        assert_eq!(
            params.values["verify_url"],
            "https://app.example.com/verified-email?token=abc123"
        );
    }

    #[test]
    fn test_secret_created_params() {
        let job = QueueJob::SecretCreated {
            owner_id: "u1".to_string(),
            email: "a@example.com".to_string(),
            website_name: "GitHub".to_string(),
        };
        let (_, params) = TemplateParams::for_job(&job, &config());
        assert_eq!(params.template, Template::SecretCreated);
        assert_eq!(params.values["website_name"], "GitHub");
        assert_eq!(params.values["owner_id"], "u1");
    }

    #[tokio::test]
    async fn test_log_dispatcher_rejects_non_email() {
        let params = TemplateParams {
            template: Template::VerifyEmail,
            subject: "s".to_string(),
            sender: None,
            values: BTreeMap::new(),
        };
        assert!(LogDispatcher.send("a@example.com", &params).await.is_ok());
        assert!(matches!(
            LogDispatcher.send("nobody", &params).await,
            Err(DispatchError::Rejected(_))
        ));
    }
}
