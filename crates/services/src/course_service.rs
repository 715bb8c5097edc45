use std::sync::Arc;

use lms_core::listing::{CourseFilter, CourseSort, Page, PageRequest, list_courses};
use lms_core::model::{Course, CourseId, Progress, Session, UserId};
use remote::{CourseRepository, TeamRepository};

use crate::access::may_view_user;
use crate::error::CourseServiceError;

/// Course listing and progress updates.
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    team: Arc<dyn TeamRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>, team: Arc<dyn TeamRepository>) -> Self {
        Self { courses, team }
    }

    /// List one user's courses, filtered, sorted and paginated.
    ///
    /// `owner` of `None` lists the session's own courses.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::AccessDenied` if the session may not see
    /// `owner`'s courses, or `CourseServiceError::Remote` if fetching fails.
    pub async fn list_courses(
        &self,
        session: &Session,
        owner: Option<UserId>,
        filter: &CourseFilter,
        sort: CourseSort,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseServiceError> {
        let owner = owner.unwrap_or_else(|| session.user_id());
        if !may_view_user(session, owner, self.team.as_ref()).await? {
            return Err(CourseServiceError::AccessDenied(owner));
        }
        let courses = self.courses.list_courses(owner).await?;
        Ok(list_courses(courses, filter, sort, page))
    }

    /// Record new progress on one of the session's own courses.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Course` for a percentage above 100,
    /// `CourseServiceError::AccessDenied` if the course belongs to someone
    /// else, or `CourseServiceError::Remote` for backend failures.
    pub async fn update_progress(
        &self,
        session: &Session,
        course_id: CourseId,
        percent: u8,
    ) -> Result<Course, CourseServiceError> {
        let progress = Progress::new(i64::from(percent))?;
        let course = self.courses.get_course(course_id).await?;
        if !session.is_self(course.owner()) {
            tracing::warn!(user_id = %session.user_id(), course_id = %course_id, "progress update denied");
            return Err(CourseServiceError::AccessDenied(course.owner()));
        }
        let updated = self.courses.update_progress(course_id, progress).await?;
        tracing::info!(course_id = %course_id, progress = percent, "course progress updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lms_core::listing::CourseSortKey;
    use lms_core::model::{CourseStatus, Role, TeamId, TeamMember};
    use remote::{InMemoryRepository, RemoteError};

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for (id, owner, title, progress) in [
            (1, 1, "Rust basics", 100),
            (2, 1, "Async Rust", 40),
            (3, 1, "Docker", 0),
            (4, 2, "Kubernetes", 10),
        ] {
            repo.upsert_course(
                Course::new(
                    CourseId::new(id),
                    UserId::new(owner),
                    title,
                    Progress::new(progress).unwrap(),
                )
                .unwrap(),
            )
            .unwrap();
        }
        repo.upsert_member(TeamMember {
            id: UserId::new(2),
            name: "Bo".into(),
            email: "bo@example.com".into(),
            role: Role::Individual,
            team_id: Some(TeamId::new(5)),
            job_title: None,
            completed_courses: 0,
            total_courses: 1,
        })
        .unwrap();
        repo
    }

    fn service(repo: &InMemoryRepository) -> CourseService {
        CourseService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn lists_own_courses_with_filter_and_sort() {
        let repo = seeded();
        let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);
        let filter = CourseFilter {
            status: Some(CourseStatus::InProgress),
            ..CourseFilter::default()
        };
        let page = service(&repo)
            .list_courses(&session, None, &filter, CourseSort::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].title(), "Async Rust");

        let sorted = service(&repo)
            .list_courses(
                &session,
                None,
                &CourseFilter::default(),
                CourseSort {
                    key: CourseSortKey::Title,
                    ..CourseSort::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        let titles: Vec<_> = sorted.items.iter().map(Course::title).collect();
        assert_eq!(titles, vec!["Async Rust", "Docker", "Rust basics"]);
    }

    #[tokio::test]
    async fn lead_reads_team_member_courses() {
        let repo = seeded();
        let lead = Session::new(UserId::new(7), "Lin", Role::TeamLead, Some(TeamId::new(5)));
        let page = service(&repo)
            .list_courses(
                &lead,
                Some(UserId::new(2)),
                &CourseFilter::default(),
                CourseSort::default(),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
    }

    #[tokio::test]
    async fn only_owner_updates_progress() {
        let repo = seeded();
        let owner = Session::new(UserId::new(1), "Ada", Role::Individual, None);
        let hr = Session::new(UserId::new(9), "Sam", Role::Hr, None);
        let service = service(&repo);

        let updated = service
            .update_progress(&owner, CourseId::new(3), 25)
            .await
            .unwrap();
        assert_eq!(updated.status(), CourseStatus::InProgress);

        let denied = service.update_progress(&hr, CourseId::new(3), 50).await;
        assert!(matches!(denied, Err(CourseServiceError::AccessDenied(_))));

        let invalid = service.update_progress(&owner, CourseId::new(3), 101).await;
        assert!(matches!(invalid, Err(CourseServiceError::Course(_))));

        let missing = service.update_progress(&owner, CourseId::new(99), 10).await;
        assert!(matches!(
            missing,
            Err(CourseServiceError::Remote(RemoteError::NotFound))
        ));
    }
}
