//! Huddle authentication
//!
//! Persisted opaque-token sessions over Postgres, an authorization context
//! with capability gates, and axum extractors that evaluate those gates
//! before handler dispatch.

pub mod backend;
pub mod context;
pub mod error;
pub mod extractors;
pub mod types;

pub use backend::AuthBackend;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{
    expired_session_cookie, session_cookie, AuthUser, Guest, SoloUser, TeamUser,
};
pub use types::{AuthIdentity, AuthTeam};
