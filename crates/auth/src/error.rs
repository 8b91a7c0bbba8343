//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidSession,
    UserLoadError,
    TeamLoadError,
    SessionStoreError,
    /// Guest gate: the endpoint requires an anonymous caller
    AlreadyAuthenticated,
    /// TeamUser gate: the endpoint requires team membership
    TeamRequired,
    /// SoloUser gate: the user already belongs to a team
    TeamAlreadyJoined,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authentication required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidSession => (
                StatusCode::UNAUTHORIZED,
                "INVALID_SESSION",
                "Invalid or expired session",
            ),
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::TeamLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TEAM_LOAD_ERROR",
                "Failed to load team membership",
            ),
            AuthError::SessionStoreError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_STORE_ERROR",
                "Failed to access session store",
            ),
            AuthError::AlreadyAuthenticated => (
                StatusCode::FORBIDDEN,
                "ALREADY_AUTHENTICATED",
                "This endpoint is only available to anonymous users",
            ),
            AuthError::TeamRequired => (
                StatusCode::FORBIDDEN,
                "TEAM_REQUIRED",
                "You must belong to a team to perform this action",
            ),
            AuthError::TeamAlreadyJoined => (
                StatusCode::FORBIDDEN,
                "TEAM_ALREADY_JOINED",
                "You already belong to a team",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for huddle_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidSession => {
                huddle_common::Error::Authentication("Invalid or expired session".to_string())
            }
            AuthError::AlreadyAuthenticated => huddle_common::Error::Authorization(
                "This endpoint is only available to anonymous users".to_string(),
            ),
            AuthError::TeamRequired => huddle_common::Error::Authorization(
                "You must belong to a team to perform this action".to_string(),
            ),
            AuthError::TeamAlreadyJoined => {
                huddle_common::Error::Authorization("You already belong to a team".to_string())
            }
            AuthError::UserLoadError | AuthError::TeamLoadError | AuthError::SessionStoreError => {
                huddle_common::Error::Internal("Authentication backend failure".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingAuthorization, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidAuthorizationFormat,
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::InvalidSession, StatusCode::UNAUTHORIZED),
            (AuthError::UserLoadError, StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::TeamLoadError, StatusCode::INTERNAL_SERVER_ERROR),
            (
                AuthError::SessionStoreError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::AlreadyAuthenticated, StatusCode::FORBIDDEN),
            (AuthError::TeamRequired, StatusCode::FORBIDDEN),
            (AuthError::TeamAlreadyJoined, StatusCode::FORBIDDEN),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }
}
