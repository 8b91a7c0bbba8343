//! Huddle Email Service
//!
//! Provides transactional email for the account flows with support for:
//! - AWS SES integration for production email delivery
//! - Mock email service for testing and development
//! - Shared templates for confirmation, password-reset, and invite mail
//!
//! Dispatch is synchronous: handlers send inline with the request and a
//! transport failure surfaces as a request error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

pub mod aws_ses;
pub mod content;
pub mod mock;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email configuration error: {0}")]
    Configuration(String),

    #[error("Email validation error: {0}")]
    Validation(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),
}

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body_text: String,
    pub metadata: HashMap<String, String>,
}

impl EmailMessage {
    /// Create a new email message
    pub fn new(to: String, from: String, subject: String, body_text: String) -> Self {
        Self {
            to,
            from,
            subject,
            body_text,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata for tracking
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Email delivery receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
    pub provider: String,
    pub metadata: HashMap<String, String>,
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email service provider (ses, mock)
    pub provider: String,
    /// AWS region for SES
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Default from address
    pub default_from: String,
    /// Base URL for the application (used in confirmation links)
    pub app_base_url: String,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let aws_region = std::env::var("AWS_REGION").ok();
        let aws_endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();

        let default_from =
            std::env::var("FROM_EMAIL").unwrap_or_else(|_| "accounts@huddle.app".to_string());

        let app_base_url =
            std::env::var("APP_BASE_URL").unwrap_or_else(|_| "https://huddle.app".to_string());

        Ok(Self {
            provider,
            aws_region,
            aws_endpoint_url,
            default_from,
            app_base_url,
        })
    }
}

/// Strip the scheme from a base URL, leaving the bare site domain.
pub fn site_domain(app_base_url: &str) -> &str {
    app_base_url
        .strip_prefix("https://")
        .or_else(|| app_base_url.strip_prefix("http://"))
        .unwrap_or(app_base_url)
        .trim_end_matches('/')
}

/// Email service trait for different implementations
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email message
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError>;

    /// Return the default "from" address for outgoing emails
    fn default_from(&self) -> String;

    /// Return the application base URL for building links
    fn app_base_url(&self) -> &str;

    /// Send the registration confirmation email.
    ///
    /// The link embeds the base64 user id and the registration token.
    async fn send_confirmation_email(
        &self,
        recipient_email: &str,
        uidb64: &str,
        token: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let confirm_url = format!("{}/{}/{}/confirm/", self.app_base_url(), uidb64, token);
        let site = site_domain(self.app_base_url());

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            "Confirm your email".to_string(),
            content::confirmation_text(site, &confirm_url),
        )
        .with_metadata("email_type".to_string(), "confirmation".to_string())
        .with_metadata("uid".to_string(), uidb64.to_string());

        self.send_email(message).await
    }

    /// Send the forgot-password email with a reset link.
    async fn send_password_reset_email(
        &self,
        recipient_email: &str,
        uidb64: &str,
        token: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let reset_url = format!(
            "{}/{}/{}/forgot_password_accept/",
            self.app_base_url(),
            uidb64,
            token
        );
        let site = site_domain(self.app_base_url());

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            "Forgot password".to_string(),
            content::password_reset_text(site, &reset_url),
        )
        .with_metadata("email_type".to_string(), "password_reset".to_string())
        .with_metadata("uid".to_string(), uidb64.to_string());

        self.send_email(message).await
    }

    /// Send the freshly generated password after a reset link is visited.
    async fn send_new_password_email(
        &self,
        recipient_email: &str,
        new_password: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            "New password".to_string(),
            content::new_password_text(new_password),
        )
        .with_metadata("email_type".to_string(), "new_password".to_string());

        self.send_email(message).await
    }

    /// Send a team invite.
    ///
    /// The invite carries no token; the invitee joins by registering with
    /// the team name as a query parameter.
    async fn send_team_invite_email(
        &self,
        recipient_email: &str,
        inviter_name: &str,
        team_name: &str,
    ) -> Result<EmailReceipt, EmailError> {
        let site = site_domain(self.app_base_url());
        let encoded_team: String = form_urlencoded::byte_serialize(team_name.as_bytes()).collect();
        let register_url = format!("{}/register/?team={}", self.app_base_url(), encoded_team);

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            format!("Invite to {}", site),
            content::team_invite_text(site, inviter_name, team_name, &register_url),
        )
        .with_metadata("email_type".to_string(), "team_invite".to_string())
        .with_metadata("team".to_string(), team_name.to_string());

        self.send_email(message).await
    }
}

/// Email service factory
pub struct EmailServiceFactory;

impl EmailServiceFactory {
    /// Create email service based on configuration
    pub async fn create(config: EmailConfig) -> Result<Box<dyn EmailService>, EmailError> {
        match config.provider.as_str() {
            "ses" | "aws-ses" => {
                tracing::info!("Creating AWS SES email service");
                let ses_service = aws_ses::SesEmailService::new(config).await?;
                Ok(Box::new(ses_service))
            }
            "mock" => {
                tracing::info!("Creating mock email service");
                Ok(Box::new(mock::MockEmailService::with_config(config)))
            }
            provider => Err(EmailError::Configuration(format!(
                "Unknown email provider: {}. Supported providers: ses, mock",
                provider
            ))),
        }
    }
}
