use lms_core::listing::Page;
use lms_core::model::{TeamMember, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRowVm {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role_label: &'static str,
    pub job_title: String,
    pub progress_label: String,
    pub percent: u8,
}

impl From<&TeamMember> for MemberRowVm {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            email: member.email.clone(),
            role_label: member.role.label(),
            job_title: member.job_title.clone().unwrap_or_default(),
            progress_label: format!(
                "{}/{} courses",
                member.completed_courses.min(member.total_courses),
                member.total_courses
            ),
            percent: member.completion_percent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterPageVm {
    pub rows: Vec<MemberRowVm>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl RosterPageVm {
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[must_use]
pub fn map_roster_page(page: &Page<TeamMember>) -> RosterPageVm {
    RosterPageVm {
        rows: page.items.iter().map(MemberRowVm::from).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}

/// Options for the calendar's member switcher, own calendar first.
#[must_use]
pub fn member_options(members: &[TeamMember]) -> Vec<(String, String)> {
    let mut options = vec![(String::new(), "My calendar".to_string())];
    options.extend(
        members
            .iter()
            .map(|member| (member.id.to_string(), member.name.clone())),
    );
    options
}
