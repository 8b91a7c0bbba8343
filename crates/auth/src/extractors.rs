//! Axum extractors for authentication and capability gates
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.
//!
//! Session tokens are accepted either as `Authorization: Bearer <token>`
//! or a `session=<token>` cookie; browser clients get the cookie via
//! `Set-Cookie` on login/confirm.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Session cookie name
pub const SESSION_COOKIE: &str = "session";

/// Build a `Set-Cookie` value establishing the session cookie.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// Build a `Set-Cookie` value that clears the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Pull the raw session token out of request headers, if any.
///
/// `Authorization: Bearer` takes precedence over the cookie.
fn extract_session_token(parts: &Parts) -> Result<Option<String>, AuthError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let header_str = header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;
        let token = header_str
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthorizationFormat)?;
        return Ok(Some(token.to_string()));
    }

    if let Some(header) = parts.headers.get(COOKIE) {
        let header_str = header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;
        for pair in header_str.split(';') {
            let pair = pair.trim();
            if let Some(token) = pair.strip_prefix(SESSION_COOKIE) {
                if let Some(value) = token.strip_prefix('=') {
                    if !value.is_empty() {
                        return Ok(Some(value.to_string()));
                    }
                }
            }
        }
    }

    Ok(None)
}

/// Authenticated user extractor
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let token = extract_session_token(parts)?.ok_or(AuthError::MissingAuthorization)?;
        let auth_context = backend.authenticate_session(&token).await?;

        Ok(AuthUser(auth_context))
    }
}

/// Authenticated user who belongs to a team.
///
/// Like `AuthUser` but rejects users without a team with 403 FORBIDDEN.
/// Gate for the invite endpoint.
#[derive(Debug)]
pub struct TeamUser(pub AuthContext);

impl<S> FromRequestParts<S> for TeamUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(auth_context) = AuthUser::from_request_parts(parts, state).await?;

        if !auth_context.has_team() {
            return Err(AuthError::TeamRequired);
        }

        Ok(TeamUser(auth_context))
    }
}

/// Authenticated user who does NOT yet belong to a team.
///
/// Gate for team creation: a user may create a team only while teamless,
/// which is what keeps membership at zero-or-one teams per user.
#[derive(Debug)]
pub struct SoloUser(pub AuthContext);

impl<S> FromRequestParts<S> for SoloUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(auth_context) = AuthUser::from_request_parts(parts, state).await?;

        if auth_context.has_team() {
            return Err(AuthError::TeamAlreadyJoined);
        }

        Ok(SoloUser(auth_context))
    }
}

/// Anonymous-caller gate for register, login, and forgot-password.
///
/// Requests carrying a *valid* session are rejected with 403; requests with
/// no credentials or a stale token pass through as anonymous.
#[derive(Debug)]
pub struct Guest;

impl<S> FromRequestParts<S> for Guest
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let token = match extract_session_token(parts) {
            Ok(Some(token)) => token,
            // Unparseable credentials count as anonymous here
            Ok(None) | Err(_) => return Ok(Guest),
        };

        match backend.authenticate_session(&token).await {
            Ok(_) => Err(AuthError::AlreadyAuthenticated),
            Err(_) => Ok(Guest),
        }
    }
}
