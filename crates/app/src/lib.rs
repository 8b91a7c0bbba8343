//! Huddle application composition root
//!
//! Composes the accounts domain router with shared infrastructure routes.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use huddle_accounts::{AccountsRepositories, AccountsState, TokenGenerator, TokenPurpose};
use huddle_auth::AuthBackend;
use huddle_common::Config;
use huddle_email::{EmailConfig, EmailServiceFactory};

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let repos = AccountsRepositories::new(pool.clone());
    let auth = AuthBackend::new(pool, config.session_ttl_secs);

    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;

    let accounts_state = AccountsState {
        repos,
        auth,
        email: Arc::from(email_service),
        registration_tokens: TokenGenerator::new(&config.secret_key, TokenPurpose::Registration),
        reset_tokens: TokenGenerator::new(&config.secret_key, TokenPurpose::PasswordReset),
    };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Huddle API v0.1.0" }),
        )
        .merge(huddle_accounts::routes().with_state(accounts_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
