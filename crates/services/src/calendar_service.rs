use std::sync::Arc;

use chrono::NaiveDate;
use lms_core::model::{Session, TrainingTrack, UserId};
use lms_core::{
    CalendarDayCell, MonthKey, MonthTrainingSummary, aggregate_month, join_day_counts, month_grid,
};
use remote::{TeamRepository, TrackQuery, TrackRepository};

use crate::Clock;
use crate::access::may_view_user;
use crate::error::CalendarError;

/// Which month, and whose tracks, the calendar shows.
///
/// `user_id` of `None` means the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthQuery {
    pub month: MonthKey,
    pub user_id: Option<UserId>,
}

impl MonthQuery {
    #[must_use]
    pub fn new(month: MonthKey, user_id: Option<UserId>) -> Self {
        Self { month, user_id }
    }

    #[must_use]
    pub fn current(today: NaiveDate) -> Self {
        Self::new(MonthKey::containing(today), None)
    }

    #[must_use]
    pub fn with_month(self, month: MonthKey) -> Self {
        Self { month, ..self }
    }

    #[must_use]
    pub fn with_user(self, user_id: Option<UserId>) -> Self {
        Self { user_id, ..self }
    }
}

/// A fully prepared month: summary plus the grid cells joined with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub query: MonthQuery,
    pub today: NaiveDate,
    pub summary: MonthTrainingSummary,
    pub cells: Vec<CalendarDayCell>,
}

impl MonthView {
    /// Aggregate already-fetched tracks into a view.
    #[must_use]
    pub fn build(query: MonthQuery, today: NaiveDate, tracks: &[TrainingTrack]) -> Self {
        let summary = aggregate_month(tracks, query.month);
        let cells = join_day_counts(&month_grid(query.month, today), &summary);
        Self {
            query,
            today,
            summary,
            cells,
        }
    }
}

/// Loads one month of training data for the calendar screen.
#[derive(Clone)]
pub struct CalendarService {
    clock: Clock,
    tracks: Arc<dyn TrackRepository>,
    team: Arc<dyn TeamRepository>,
}

impl CalendarService {
    #[must_use]
    pub fn new(
        clock: Clock,
        tracks: Arc<dyn TrackRepository>,
        team: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            clock,
            tracks,
            team,
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fetch, aggregate and grid the requested month.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::AccessDenied` when the session may not view
    /// the requested user, or `CalendarError::Remote` if fetching fails.
    pub async fn load_month(
        &self,
        session: &Session,
        query: &MonthQuery,
    ) -> Result<MonthView, CalendarError> {
        let target = query.user_id.unwrap_or_else(|| session.user_id());
        if !may_view_user(session, target, self.team.as_ref()).await? {
            tracing::warn!(user_id = %session.user_id(), %target, "calendar access denied");
            return Err(CalendarError::AccessDenied(target));
        }

        let tracks = self
            .tracks
            .list_tracks(&TrackQuery::new(query.month, Some(target)))
            .await?;
        tracing::debug!(month = %query.month, %target, fetched = tracks.len(), "aggregating month");
        Ok(MonthView::build(*query, self.today(), &tracks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lms_core::model::{Role, TeamId, TeamMember, TrackId};
    use lms_core::time::fixed_clock;
    use remote::InMemoryRepository;

    fn member(id: u64, team: u64) -> TeamMember {
        TeamMember {
            id: UserId::new(id),
            name: format!("Member {id}"),
            email: format!("m{id}@example.com"),
            role: Role::Individual,
            team_id: Some(TeamId::new(team)),
            job_title: None,
            completed_courses: 0,
            total_courses: 0,
        }
    }

    fn service(repo: &InMemoryRepository) -> CalendarService {
        CalendarService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for (owner, id, day) in [(1, 1, 5), (2, 2, 12), (3, 3, 20)] {
            repo.insert_track(
                UserId::new(owner),
                TrainingTrack::new(TrackId::new(id), format!("Track {id}"), 1, 2)
                    .with_due_date(NaiveDate::from_ymd_opt(2025, 11, day)),
            )
            .unwrap();
        }
        repo.upsert_member(member(2, 10)).unwrap();
        repo.upsert_member(member(3, 20)).unwrap();
        repo
    }

    #[tokio::test]
    async fn loads_own_month_with_joined_cells() {
        let repo = seeded();
        let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);
        let query = MonthQuery::current(fixed_clock().today());
        let view = service(&repo).load_month(&session, &query).await.unwrap();

        assert_eq!(view.query.month, MonthKey::new(2025, 10));
        assert_eq!(view.cells.len(), 42);
        assert_eq!(view.summary.total_tracks, 1);
        let fifth = view.cells.iter().find(|c| c.iso_date == "2025-11-05").unwrap();
        assert_eq!(fifth.track_count, 1);
        assert_eq!(view.cells.iter().filter(|c| c.is_today).count(), 1);
    }

    #[tokio::test]
    async fn individual_cannot_view_others() {
        let repo = seeded();
        let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);
        let query = MonthQuery::new(MonthKey::new(2025, 10), Some(UserId::new(2)));
        let err = service(&repo).load_month(&session, &query).await.unwrap_err();
        assert!(matches!(err, CalendarError::AccessDenied(id) if id == UserId::new(2)));
    }

    #[tokio::test]
    async fn lead_views_only_own_team() {
        let repo = seeded();
        let lead = Session::new(UserId::new(9), "Lin", Role::TeamLead, Some(TeamId::new(10)));
        let service = service(&repo);

        let own_team = MonthQuery::new(MonthKey::new(2025, 10), Some(UserId::new(2)));
        let view = service.load_month(&lead, &own_team).await.unwrap();
        assert_eq!(view.summary.total_tracks, 1);

        let other_team = MonthQuery::new(MonthKey::new(2025, 10), Some(UserId::new(3)));
        assert!(matches!(
            service.load_month(&lead, &other_team).await,
            Err(CalendarError::AccessDenied(_))
        ));
    }

    #[tokio::test]
    async fn hr_views_anyone() {
        let repo = seeded();
        let hr = Session::new(UserId::new(50), "Sam", Role::Hr, None);
        let query = MonthQuery::new(MonthKey::new(2025, 10), Some(UserId::new(3)));
        let view = service(&repo).load_month(&hr, &query).await.unwrap();
        assert_eq!(view.summary.upcoming.len(), 1);
    }

    #[tokio::test]
    async fn empty_month_is_not_an_error() {
        let repo = seeded();
        let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);
        let query = MonthQuery::new(MonthKey::new(2026, 0), None);
        let view = service(&repo).load_month(&session, &query).await.unwrap();
        assert!(view.summary.is_empty());
        assert!(view.summary.upcoming.is_empty());
        assert!(view.cells.iter().all(|c| c.track_count == 0));
    }
}
