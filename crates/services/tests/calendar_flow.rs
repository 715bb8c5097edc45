use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use lms_core::MonthKey;
use lms_core::model::{Role, Session, TeamMember, TeamId, TrackId, TrainingTrack, UserId};
use lms_core::time::fixed_clock;
use remote::{InMemoryRepository, RemoteError, TeamRepository, TrackQuery, TrackRepository};
use services::{
    CalendarError, CalendarService, MonthLoader, MonthNav, MonthQuery, Resolution,
};

/// Track source that can be switched into failure mode.
struct FlakyTracks {
    inner: InMemoryRepository,
    failing: AtomicBool,
}

#[async_trait]
impl TrackRepository for FlakyTracks {
    async fn list_tracks(&self, query: &TrackQuery) -> Result<Vec<TrainingTrack>, RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::HttpStatus(503));
        }
        self.inner.list_tracks(query).await
    }
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn seeded() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    let me = UserId::new(1);
    let tracks = [
        TrainingTrack::new(TrackId::new(1), "React", 8, 10)
            .with_due_date(date(2025, 11, 5))
            .with_category(Some("Frontend")),
        TrainingTrack::new(TrackId::new(2), "CSS", 10, 10)
            .with_due_date(date(2025, 11, 5))
            .with_category(Some("Frontend")),
        TrainingTrack::new(TrackId::new(3), "SQL", 0, 5)
            .with_due_date(date(2025, 11, 5))
            .with_category(Some("Backend")),
        TrainingTrack::new(TrackId::new(4), "Go", 1, 3).with_due_date(date(2025, 12, 2)),
        TrainingTrack::new(TrackId::new(5), "Draft", 0, 0),
    ];
    for track in tracks {
        repo.insert_track(me, track).expect("seed track");
    }
    repo.upsert_member(TeamMember {
        id: UserId::new(2),
        name: "Bo".into(),
        email: "bo@example.com".into(),
        role: Role::Individual,
        team_id: Some(TeamId::new(3)),
        job_title: Some("Engineer".into()),
        completed_courses: 0,
        total_courses: 0,
    })
    .expect("seed member");
    repo
}

async fn load(
    service: &CalendarService,
    session: &Session,
    loader: &mut MonthLoader,
    ticket: services::LoadTicket,
) -> Resolution {
    let result = service.load_month(session, ticket.query()).await;
    loader.resolve(ticket, result)
}

#[tokio::test]
async fn month_navigation_round_trip_reproduces_summary() {
    let repo = seeded();
    let tracks = Arc::new(FlakyTracks {
        inner: repo.clone(),
        failing: AtomicBool::new(false),
    });
    let team: Arc<dyn TeamRepository> = Arc::new(repo);
    let service = CalendarService::new(fixed_clock(), tracks.clone(), team);
    let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);

    let mut loader = MonthLoader::new(MonthQuery::current(service.today()));
    let ticket = loader.begin_load();
    assert_eq!(load(&service, &session, &mut loader, ticket).await, Resolution::Applied);

    let november = loader.view().expect("november view").clone();
    let day = november
        .summary
        .day(NaiveDate::from_ymd_opt(2025, 11, 5).expect("date"))
        .expect("bucket for the 5th");
    assert_eq!(day.total_tracks, 3);
    assert_eq!(day.completed_tracks, 1);
    assert_eq!(day.in_progress_tracks, 1);
    assert_eq!(november.summary.categories[0].name, "Frontend");
    assert_eq!(november.summary.categories[0].total_tracks, 2);
    assert_eq!(november.summary.categories[0].completed_tracks, 1);
    assert_eq!(november.summary.categories[1].name, "Backend");

    let ticket = loader.navigate(MonthNav::Next);
    assert_eq!(load(&service, &session, &mut loader, ticket).await, Resolution::Applied);
    assert_eq!(loader.view().expect("december").summary.total_tracks, 1);

    let ticket = loader.navigate(MonthNav::Previous);
    assert_eq!(load(&service, &session, &mut loader, ticket).await, Resolution::Applied);
    assert_eq!(loader.view(), Some(&november));

    // A failing refetch keeps November on screen.
    tracks.failing.store(true, Ordering::SeqCst);
    let ticket = loader.begin_load();
    assert_eq!(load(&service, &session, &mut loader, ticket).await, Resolution::Failed);
    assert_eq!(loader.view(), Some(&november));
    assert!(loader.notice().is_some_and(|n| n.contains("503")));
}

#[tokio::test]
async fn denied_member_switch_surfaces_as_notice() {
    let repo = seeded();
    let service = CalendarService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo));
    let session = Session::new(UserId::new(1), "Ada", Role::Individual, None);

    let mut loader = MonthLoader::new(MonthQuery::new(MonthKey::new(2025, 10), None));
    let ticket = loader.select_user(Some(UserId::new(2)));
    let result = service.load_month(&session, ticket.query()).await;
    assert!(matches!(result, Err(CalendarError::AccessDenied(_))));
    assert_eq!(loader.resolve(ticket, result), Resolution::Failed);
    assert!(loader.view().is_none());
    assert!(loader.notice().is_some());
}
