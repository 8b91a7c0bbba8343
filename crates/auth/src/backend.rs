//! Concrete authentication backend
//!
//! Wraps `PgPool` and owns auth-specific SQL queries: session rows and the
//! lightweight identity/team read models. Uses runtime `sqlx::query_as`
//! (not macros) so the crate builds without a live database.

use chrono::{Duration, Utc};
use huddle_common::crypto::{generate_session_token, hash_session_token};
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::{AuthIdentity, AuthTeam};

/// Row type for session lookup
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
}

/// Concrete authentication backend.
///
/// Wraps a database pool and the configured session lifetime. Provides
/// methods to establish, resolve, and revoke sessions.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    session_ttl: Duration,
}

impl AuthBackend {
    pub fn new(pool: PgPool, session_ttl_secs: i64) -> Self {
        Self {
            pool,
            session_ttl: Duration::seconds(session_ttl_secs),
        }
    }

    /// Find user identity by ID (read model, lightweight subset of User)
    pub(crate) async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, email, first_name, last_name, is_active,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Find the team a user belongs to, if any (at most one by invariant)
    pub(crate) async fn find_team(&self, user_id: Uuid) -> Result<Option<AuthTeam>, AuthError> {
        let team: Option<AuthTeam> = sqlx::query_as(
            r#"
            SELECT t.id, t.name
            FROM teams t
            INNER JOIN memberships m ON t.id = m.team_id
            WHERE m.user_id = $1
            ORDER BY m.created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load team membership");
            AuthError::TeamLoadError
        })?;

        Ok(team)
    }

    /// Establish a new session for a user and return the raw opaque token.
    ///
    /// Only the SHA-256 digest of the token is persisted; the raw value is
    /// handed to the client once and never stored.
    pub async fn create_session(&self, user_id: Uuid) -> Result<String, AuthError> {
        let token = generate_session_token();
        let token_hash = hash_session_token(&token);
        let expires_at = Utc::now() + self.session_ttl;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
            VALUES ($1, $2, $3, NOW(), $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to create session");
            AuthError::SessionStoreError
        })?;

        tracing::debug!(user_id = %user_id, "Session established");

        Ok(token)
    }

    /// Delete a session row, ending the session.
    pub async fn delete_session(&self, session_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, session_id = %session_id, "Failed to delete session");
                AuthError::SessionStoreError
            })?;

        Ok(())
    }

    /// Resolve a raw session token into an [`AuthContext`].
    ///
    /// Expired sessions and sessions for deactivated users both fail with
    /// the same `InvalidSession` error.
    pub async fn authenticate_session(&self, token: &str) -> Result<AuthContext, AuthError> {
        let token_hash = hash_session_token(token);

        let session: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to query sessions");
            AuthError::SessionStoreError
        })?;

        let session = session.ok_or(AuthError::InvalidSession)?;

        let user = self
            .find_user(session.user_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if !user.is_active {
            return Err(AuthError::InvalidSession);
        }

        let team = self.find_team(user.id).await?;

        Ok(AuthContext::new(user, team, session.id))
    }
}
