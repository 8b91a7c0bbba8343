//! Login and logout

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use huddle_auth::{expired_session_cookie, session_cookie};
use huddle_common::crypto::verify_password;
use huddle_common::{Error, Result, ValidatedJson};

use crate::api::middleware::{AccountsState, AuthUser, Guest};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// POST /login/
///
/// Unknown email, wrong password, and inactive account all produce the
/// same "Invalid user" response.
pub async fn login(
    _guest: Guest,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state.repos.users.find_by_email(&request.email).await?;

    let user = match user {
        Some(user)
            if user.is_active && verify_password(&request.password, &user.password_hash) =>
        {
            user
        }
        _ => return Err(Error::InvalidUser),
    };

    let token = state.auth.create_session(user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Json(json!({ "url": "/register/" })),
    ))
}

/// GET /logout/
///
/// Deletes the session row and clears the cookie.
pub async fn logout(
    AuthUser(context): AuthUser,
    State(state): State<AccountsState>,
) -> Result<impl IntoResponse> {
    state.auth.delete_session(context.session_id).await?;

    tracing::info!(user_id = %context.user.id, "User logged out");

    Ok(([(SET_COOKIE, expired_session_cookie())], Json(json!({}))))
}
