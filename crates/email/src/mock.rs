//! Mock Email Service Implementation
//!
//! Provides in-memory email capture for testing without external
//! dependencies. Tests assert on captured subjects and bodies to verify
//! the account flows sent what they should.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailConfig, EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    default_from: String,
    app_base_url: String,
    fail_sends: bool,
}

impl MockEmailService {
    /// Create a new mock email service with default addressing
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            default_from: "accounts@huddle.app".to_string(),
            app_base_url: "https://huddle.app".to_string(),
            fail_sends: false,
        }
    }

    /// Create a mock service honoring the addressing in `config`
    pub fn with_config(config: EmailConfig) -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            default_from: config.default_from,
            app_base_url: config.app_base_url,
            fail_sends: false,
        }
    }

    /// Create a mock service whose sends always fail.
    ///
    /// Used to exercise the no-rollback behavior of handlers that persist
    /// before dispatching mail.
    pub fn new_failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::new()
        }
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        self.emails.lock().unwrap().clone()
    }

    /// Get emails sent to a specific recipient
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        self.email_by_recipient
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }

    /// Count captured emails with an exact subject
    pub fn count_with_subject(&self, subject: &str) -> usize {
        self.emails
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message.subject == subject)
            .count()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        self.emails.lock().unwrap().clear();
        self.email_by_recipient.lock().unwrap().clear();
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if self.fail_sends {
            return Err(EmailError::AwsSes(
                "mock transport configured to fail".to_string(),
            ));
        }

        tracing::info!("Mock email service capturing email to: {}", message.to);

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        self.emails.lock().unwrap().push(captured.clone());

        self.email_by_recipient
            .lock()
            .unwrap()
            .entry(message.to)
            .or_default()
            .push(captured);

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        self.default_from.clone()
    }

    fn app_base_url(&self) -> &str {
        &self.app_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_email_service_captures() {
        let service = MockEmailService::new();

        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "sender@huddle.app".to_string(),
            "Test Subject".to_string(),
            "Test body".to_string(),
        );

        let receipt = service.send_email(message).await.unwrap();

        assert!(receipt.message_id.starts_with("mock-"));
        assert_eq!(receipt.provider, "mock");
        assert_eq!(service.email_count(), 1);

        let emails = service.get_emails_for_recipient("test@example.com");
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].message.subject, "Test Subject");
    }

    #[tokio::test]
    async fn test_count_with_subject() {
        let service = MockEmailService::new();

        for recipient in ["a@example.com", "b@example.com"] {
            service
                .send_confirmation_email(recipient, "dWlk", "tok-abc")
                .await
                .unwrap();
        }
        service
            .send_new_password_email("a@example.com", "pw")
            .await
            .unwrap();

        assert_eq!(service.count_with_subject("Confirm your email"), 2);
        assert_eq!(service.count_with_subject("New password"), 1);
        assert_eq!(service.count_with_subject("Forgot password"), 0);
    }

    #[tokio::test]
    async fn test_failing_mock_service() {
        let service = MockEmailService::new_failing();

        let message = EmailMessage::new(
            "test@example.com".to_string(),
            "sender@huddle.app".to_string(),
            "Test Subject".to_string(),
            "Test body".to_string(),
        );

        let result = service.send_email(message).await;
        assert!(result.is_err());
        assert_eq!(service.email_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_resets_capture() {
        let service = MockEmailService::new();
        service
            .send_new_password_email("user@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(service.email_count(), 1);

        service.clear();
        assert_eq!(service.email_count(), 0);
        assert!(service.get_emails_for_recipient("user@example.com").is_empty());
    }
}
