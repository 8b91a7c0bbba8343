//! Forgot-password and set-password flows

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use huddle_common::crypto::{generate_random_password, hash_password, verify_password};
use huddle_common::{Error, Result, ValidatedJson};

use crate::api::middleware::{AccountsState, AuthUser, Guest};
use crate::domain::tokens::{uid_decode, uid_encode};

/// Length of the generated replacement password
const GENERATED_PASSWORD_LEN: usize = 12;

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

// No length rule on the new password; only registration enforces one.
#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// POST /forgot_password/
///
/// Emails a reset link. Unlike login, an unknown email is reported as a
/// field error rather than hidden.
pub async fn forgot_password(
    _guest: Guest,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::field("email", "Email does not exist"))?;

    let token = state.reset_tokens.mint(&user);
    state
        .email
        .send_password_reset_email(&user.email, &uid_encode(user.id), &token)
        .await
        .map_err(|e| Error::Email(e.to_string()))?;

    tracing::info!(user_id = %user.id, "Password reset email sent");

    Ok(Json(json!({ "data": "Check your email" })))
}

/// GET /{uidb64}/{token}/forgot_password_accept/
///
/// Visiting a valid reset link replaces the password with a freshly
/// generated one and emails it to the account address. The link does not
/// log the user in.
pub async fn forgot_password_accept(
    State(state): State<AccountsState>,
    Path((uidb64, token)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user_id = uid_decode(&uidb64).ok_or(Error::InvalidUser)?;

    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !state.reset_tokens.check(&user, &token) {
        return Err(Error::InvalidUser);
    }

    let new_password = generate_random_password(GENERATED_PASSWORD_LEN);
    let password_hash = hash_password(&new_password)?;
    state
        .repos
        .users
        .set_password_hash(user.id, &password_hash)
        .await?;

    state
        .email
        .send_new_password_email(&user.email, &new_password)
        .await
        .map_err(|e| Error::Email(e.to_string()))?;

    tracing::info!(user_id = %user.id, "Password reset completed");

    Ok(Json(json!({ "url": "/login/" })))
}

/// PUT /set_password/
///
/// Authenticated password change; the old password must verify.
pub async fn set_password(
    AuthUser(context): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<SetPasswordRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .repos
        .users
        .get_by_id(context.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !verify_password(&request.old_password, &user.password_hash) {
        return Err(Error::field("old_password", "Invalid password"));
    }

    let password_hash = hash_password(&request.new_password)?;
    state
        .repos
        .users
        .set_password_hash(user.id, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forgot_password_request_validation() {
        let valid = ForgotPasswordRequest {
            email: "user@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ForgotPasswordRequest {
            email: "not-an-email".to_string(),
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_set_password_request_has_no_length_rule() {
        let short = SetPasswordRequest {
            old_password: "old".to_string(),
            new_password: "x".to_string(),
        };
        assert!(short.validate().is_ok());
    }
}
