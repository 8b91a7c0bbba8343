//! Registration and email confirmation

use axum::extract::{Path, Query, State};
use axum::http::{header::SET_COOKIE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use huddle_auth::session_cookie;
use huddle_common::crypto::hash_password;
use huddle_common::{Error, Result, ValidatedJson};

use crate::api::middleware::{AccountsState, Guest};
use crate::domain::entities::User;
use crate::domain::tokens::{uid_decode, uid_encode};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterQuery {
    /// Team name from an invite link; joins the user straight into the team
    pub team: Option<String>,
}

/// POST /register/
///
/// Two paths:
/// - plain registration creates an inactive account and emails a
///   confirmation link; the caller is told to check their inbox.
/// - invite-driven registration (`?team=<name>` naming an existing team)
///   creates an active account, joins the team, and logs the user in.
///
/// The user row is not rolled back if the confirmation email fails to
/// send; the account stays inactive and unusable until confirmed.
pub async fn register_user(
    _guest: Guest,
    State(state): State<AccountsState>,
    Query(query): Query<RegisterQuery>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Response> {
    if state.repos.users.email_exists(&request.email).await? {
        return Err(Error::field("email", "Email already exists"));
    }

    let invited_team = match query.team.as_deref() {
        Some(name) => state.repos.teams.find_by_name(name).await?,
        None => None,
    };

    let password_hash = hash_password(&request.password)?;
    let user = User::new(
        request.email,
        password_hash,
        request.first_name,
        request.last_name,
        invited_team.is_some(),
    );
    let user = state.repos.users.create(&user).await?;

    if let Some(team) = invited_team {
        state.repos.teams.add_member(team.id, user.id).await?;
        let token = state.auth.create_session(user.id).await?;

        tracing::info!(user_id = %user.id, team_id = %team.id, "Invited user registered");

        return Ok((
            StatusCode::CREATED,
            [(SET_COOKIE, session_cookie(&token))],
            Json(json!({ "url": "/create_team/" })),
        )
            .into_response());
    }

    let token = state.registration_tokens.mint(&user);
    state
        .email
        .send_confirmation_email(&user.email, &uid_encode(user.id), &token)
        .await
        .map_err(|e| Error::Email(e.to_string()))?;

    tracing::info!(user_id = %user.id, "Registration confirmation sent");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": "Check your email" })),
    )
        .into_response())
}

/// GET /{uidb64}/{token}/confirm/
///
/// Activates the account named by the link and logs the user in. A reused
/// link fails the token check because activation changed the MAC input.
pub async fn confirm(
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

    if !state.registration_tokens.check(&user, &token) {
        return Err(Error::InvalidUser);
    }

    state.repos.users.activate(user.id).await?;
    let session = state.auth.create_session(user.id).await?;

    tracing::info!(user_id = %user.id, "Email confirmed");

    Ok((
        [(SET_COOKIE, session_cookie(&session))],
        Json(json!({ "url": "/create_team/" })),
    ))
}
