//! Shared state for the accounts API
//!
//! `AccountsState` is the axum state for every accounts route. Auth
//! extractors pull the [`AuthBackend`] out via `FromRef`.

use std::sync::Arc;

use axum::extract::FromRef;
use huddle_email::EmailService;

use crate::domain::tokens::TokenGenerator;
use crate::repository::AccountsRepositories;

// Handlers take their gates from here so they name one import path.
pub use huddle_auth::{AuthBackend, AuthUser, Guest, SoloUser, TeamUser};

/// Application state shared by all accounts handlers
#[derive(Clone)]
pub struct AccountsState {
    pub repos: AccountsRepositories,
    pub auth: AuthBackend,
    pub email: Arc<dyn EmailService>,
    pub registration_tokens: TokenGenerator,
    pub reset_tokens: TokenGenerator,
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
