use crate::model::track::completion_percent;
use crate::model::{Role, TeamId, UserId};

/// A roster entry as shown to team leads and HR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
    pub job_title: Option<String>,
    pub completed_courses: u32,
    pub total_courses: u32,
}

impl TeamMember {
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.completed_courses, self.total_courses)
    }

    #[must_use]
    pub fn belongs_to(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_uses_shared_rounding() {
        let member = TeamMember {
            id: UserId::new(1),
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Individual,
            team_id: Some(TeamId::new(2)),
            job_title: None,
            completed_courses: 1,
            total_courses: 3,
        };
        assert_eq!(member.completion_percent(), 33);
        assert!(member.belongs_to(TeamId::new(2)));
        assert!(!member.belongs_to(TeamId::new(3)));
    }
}
