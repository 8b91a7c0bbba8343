//! Huddle Accounts Domain
//!
//! Owns the user-account and team-membership flows:
//! - registration with email confirmation
//! - login / logout over persisted sessions
//! - forgot-password and set-password
//! - one-team-per-user team creation
//! - tokenless email invites
//!
//! Layered as domain (entities, signed tokens), repository (SQL), and
//! api (axum state, routes, handlers).

pub mod api;
pub mod domain;
pub mod repository;

pub use api::middleware::AccountsState;
pub use api::routes::routes;
pub use domain::entities::{Membership, Team, User};
pub use domain::tokens::{uid_decode, uid_encode, TokenGenerator, TokenPurpose};
pub use repository::{AccountsRepositories, TeamRepository, UserRepository};
