use crate::model::{Role, TeamId, UserId};

/// The authenticated user, handed to services by the composition root.
///
/// Nothing below the app crate looks up authentication state on its own;
/// every access decision is made against a `Session` passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    display_name: String,
    role: Role,
    team_id: Option<TeamId>,
}

impl Session {
    #[must_use]
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        role: Role,
        team_id: Option<TeamId>,
    ) -> Self {
        let display_name = display_name.into().trim().to_string();
        Self {
            user_id,
            display_name,
            role,
            team_id,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    #[must_use]
    pub fn is_self(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether this user may look at data owned by `target`.
    ///
    /// Own data is always visible. Team leads see members of their own team,
    /// HR sees everyone.
    #[must_use]
    pub fn can_view_user(&self, target: UserId, target_team: Option<TeamId>) -> bool {
        if self.is_self(target) {
            return true;
        }
        match self.role {
            Role::Hr => true,
            Role::TeamLead => self.team_id.is_some() && self.team_id == target_team,
            Role::Individual => false,
        }
    }
}
