//! Team creation

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use huddle_common::{Error, Result, ValidatedJson};

use crate::api::middleware::{AccountsState, SoloUser};
use crate::domain::entities::{Membership, Team};
use crate::repository::{create_membership_tx, create_team_tx};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 64, message = "Team name must be 1-64 characters"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            created_at: team.created_at,
        }
    }
}

/// POST /create_team/
///
/// Only available to users without a team (`SoloUser` gate). The team and
/// the creator's membership are inserted in one transaction, so a failure
/// on either leaves no orphan team.
pub async fn create_team(
    SoloUser(context): SoloUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    if state
        .repos
        .teams
        .find_by_name(&request.name)
        .await?
        .is_some()
    {
        return Err(Error::field("name", "Team name already taken"));
    }

    let mut tx = state.repos.begin().await?;

    let team = create_team_tx(&mut tx, &Team::new(request.name))
        .await
        .map_err(|e| match &e {
            // Lost the race on the unique name; same error as the pre-check
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::field("name", "Team name already taken")
            }
            _ => Error::Database(e),
        })?;

    let membership = Membership::new(team.id, context.user.id);
    create_membership_tx(&mut tx, &membership).await?;

    tx.commit().await?;

    tracing::info!(team_id = %team.id, user_id = %context.user.id, "Team created");

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))))
}
