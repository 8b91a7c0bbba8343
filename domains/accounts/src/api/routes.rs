//! Route table for the accounts API

use axum::routing::{get, post, put};
use axum::Router;

use crate::api::handlers::{invites, passwords, register, sessions, teams};
use crate::api::middleware::AccountsState;

/// Build the accounts router.
///
/// Confirmation and reset-accept links are GETs because users reach them
/// by clicking a link in an email.
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/register/", post(register::register_user))
        .route("/login/", post(sessions::login))
        .route("/logout/", get(sessions::logout))
        .route("/forgot_password/", post(passwords::forgot_password))
        .route("/set_password/", put(passwords::set_password))
        .route("/create_team/", post(teams::create_team))
        .route("/invite/", post(invites::invite))
        .route("/{uidb64}/{token}/confirm/", get(register::confirm))
        .route(
            "/{uidb64}/{token}/forgot_password_accept/",
            get(passwords::forgot_password_accept),
        )
}
