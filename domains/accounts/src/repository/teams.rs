//! Team and membership repository

use huddle_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Membership, Team};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team: Option<Team> =
            sqlx::query_as("SELECT id, name, created_at FROM teams WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(team)
    }

    /// Attach a user to an existing team (invite-driven registration).
    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<Membership> {
        let membership = Membership::new(team_id, user_id);

        let created: Membership = sqlx::query_as(
            r#"
            INSERT INTO memberships (id, team_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, team_id, user_id, created_at
            "#,
        )
        .bind(membership.id)
        .bind(membership.team_id)
        .bind(membership.user_id)
        .bind(membership.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(team_id = %team_id, user_id = %user_id, "Membership created");

        Ok(created)
    }
}
