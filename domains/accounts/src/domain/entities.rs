//! Account entities
//!
//! Database-backed rows for users, teams, and memberships. Constructors
//! assign ids and timestamps so inserts can echo the entity back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Maximum team name length
pub const TEAM_NAME_MAX_LEN: u64 = 64;

/// A registered user account.
///
/// Accounts start inactive and flip to active on email confirmation or
/// invite-driven registration. `password_hash` is a PHC-format Argon2 hash
/// and never leaves the repository layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
        is_active: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A team. Names are globally unique.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// Membership links a user to a team.
///
/// Application-level invariant: at most one membership per user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(team_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
