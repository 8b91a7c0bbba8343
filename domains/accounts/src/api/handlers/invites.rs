//! Team invites
//!
//! Invites are stateless: no row is written and no token is minted. The
//! invite email carries a registration link with the team name as a
//! query parameter, and registration joins the invitee to the team.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use huddle_common::{Error, Result, ValidatedJson};

use crate::api::middleware::{AccountsState, TeamUser};

#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// POST /invite/
///
/// Only team members may invite, and only addresses without an account.
pub async fn invite(
    TeamUser(context): TeamUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<InviteRequest>,
) -> Result<Json<Value>> {
    if state.repos.users.email_exists(&request.email).await? {
        return Err(Error::field("email", "Email already registered"));
    }

    let team = context
        .team
        .as_ref()
        .ok_or_else(|| Error::Internal("Team gate passed without a team".to_string()))?;

    state
        .email
        .send_team_invite_email(&request.email, &context.user.display_name(), &team.name)
        .await
        .map_err(|e| Error::Email(e.to_string()))?;

    tracing::info!(
        team_id = %team.id,
        inviter_id = %context.user.id,
        "Invite sent"
    );

    Ok(Json(json!({ "data": "Email is sent" })))
}
