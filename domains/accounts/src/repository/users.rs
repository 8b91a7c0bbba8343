//! User repository

use huddle_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user and return the stored row.
    ///
    /// Callers check for duplicate emails first; a race on the unique
    /// constraint still surfaces as the same field error.
    pub async fn create(&self, user: &User) -> Result<User> {
        let created: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name,
                               is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, email, password_hash, first_name, last_name,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::field("email", "Email already exists")
            }
            _ => Error::Database(e),
        })?;

        tracing::info!(user_id = %created.id, "User created");

        Ok(created)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name,
                   is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name,
                   is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Flip the account to active. Invalidates outstanding registration
    /// tokens, whose MAC covers `is_active`.
    pub async fn activate(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id = %id, "User activated");

        Ok(())
    }

    pub async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id = %id, "Password updated");

        Ok(())
    }
}
