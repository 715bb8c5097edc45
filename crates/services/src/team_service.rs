use std::sync::Arc;

use lms_core::listing::{MemberFilter, MemberSort, Page, PageRequest, list_members};
use lms_core::model::{Role, Session, TeamMember};
use remote::TeamRepository;

use crate::error::TeamServiceError;

/// Team roster for leads and HR.
#[derive(Clone)]
pub struct TeamService {
    team: Arc<dyn TeamRepository>,
}

impl TeamService {
    #[must_use]
    pub fn new(team: Arc<dyn TeamRepository>) -> Self {
        Self { team }
    }

    /// List the members visible to `session`.
    ///
    /// HR sees every member, a team lead sees their own team.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::AccessDenied` for individual contributors,
    /// `TeamServiceError::MissingTeam` for a lead without a team, or
    /// `TeamServiceError::Remote` if fetching fails.
    pub async fn roster(
        &self,
        session: &Session,
        filter: &MemberFilter,
        sort: MemberSort,
        page: PageRequest,
    ) -> Result<Page<TeamMember>, TeamServiceError> {
        let scope = match session.role() {
            Role::Hr => None,
            Role::TeamLead => Some(session.team_id().ok_or(TeamServiceError::MissingTeam)?),
            Role::Individual => return Err(TeamServiceError::AccessDenied),
        };
        let members = self.team.list_members(scope).await?;
        tracing::debug!(role = %session.role(), count = members.len(), "roster loaded");
        Ok(list_members(members, filter, sort, page))
    }

    /// Every member the session may pick in the calendar's member switcher.
    ///
    /// # Errors
    ///
    /// Same as [`TeamService::roster`].
    pub async fn selectable_members(
        &self,
        session: &Session,
    ) -> Result<Vec<TeamMember>, TeamServiceError> {
        let page = self
            .roster(
                session,
                &MemberFilter::default(),
                MemberSort::default(),
                PageRequest::first(u32::MAX),
            )
            .await?;
        Ok(page
            .items
            .into_iter()
            .filter(|member| !session.is_self(member.id))
            .collect())
    }
}
