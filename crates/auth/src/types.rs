//! Auth read-model types
//!
//! Lightweight views of the same DB rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and
//! authorization; handlers needing the full `User` (password hash) load
//! it from the domain repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lightweight identity for authenticated users.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthIdentity {
    /// Display name for outgoing email: "First Last", falling back to the email address.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self.email.clone(),
        }
    }
}

/// The single team an authenticated user belongs to, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthTeam {
    pub id: Uuid,
    pub name: String,
}
