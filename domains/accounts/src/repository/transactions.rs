//! Transactional write helpers
//!
//! Free functions taking `&mut Transaction` so a handler can compose a
//! team insert and the creator's membership into one atomic unit.

use sqlx::{Postgres, Transaction};

use crate::domain::entities::{Membership, Team};

pub async fn create_team_tx(
    tx: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> Result<Team, sqlx::Error> {
    let created: Team = sqlx::query_as(
        r#"
        INSERT INTO teams (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(team.created_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(created)
}

pub async fn create_membership_tx(
    tx: &mut Transaction<'_, Postgres>,
    membership: &Membership,
) -> Result<Membership, sqlx::Error> {
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
    .fetch_one(&mut **tx)
    .await?;

    Ok(created)
}
