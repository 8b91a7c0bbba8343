//! Authorization context for authenticated requests

use uuid::Uuid;

use crate::types::{AuthIdentity, AuthTeam};

/// Represents an authenticated request context.
///
/// Carries the identity, the user's team (a user belongs to at most one),
/// and the session backing this request. Capability gates are boolean
/// predicates over this context, evaluated by extractors before handler
/// dispatch.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
    pub team: Option<AuthTeam>,
    pub session_id: Uuid,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity, team: Option<AuthTeam>, session_id: Uuid) -> Self {
        Self {
            user,
            team,
            session_id,
        }
    }

    /// Capability gate: the user belongs to a team
    pub fn has_team(&self) -> bool {
        self.team.is_some()
    }

    /// Capability gate: the user belongs to no team
    pub fn has_no_team(&self) -> bool {
        self.team.is_none()
    }
}
