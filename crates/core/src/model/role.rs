use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {raw}")]
pub struct RoleParseError {
    raw: String,
}

/// Role attached to an authenticated user by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Individual,
    TeamLead,
    Hr,
}

impl Role {
    /// Parse a role claim, falling back to the least privileged role for
    /// strings the client does not recognise.
    #[must_use]
    pub fn from_claim(raw: &str) -> Self {
        raw.parse().unwrap_or(Role::Individual)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Individual => "individual",
            Role::TeamLead => "team_lead",
            Role::Hr => "hr",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Role::Individual => "Individual contributor",
            Role::TeamLead => "Team lead",
            Role::Hr => "HR",
        }
    }

    #[must_use]
    pub fn can_view_team_roster(&self) -> bool {
        matches!(self, Role::TeamLead | Role::Hr)
    }

    #[must_use]
    pub fn can_view_all_members(&self) -> bool {
        matches!(self, Role::Hr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "individual" | "ic" | "employee" | "member" => Ok(Role::Individual),
            "team_lead" | "teamlead" | "lead" | "manager" => Ok(Role::TeamLead),
            "hr" | "human_resources" => Ok(Role::Hr),
            _ => Err(RoleParseError { raw: s.to_string() }),
        }
    }
}
