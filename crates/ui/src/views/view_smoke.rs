use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use lms_core::model::{
    Course, CourseId, Progress, Role, Session, TeamId, TeamMember, TrackId, TrainingTrack, UserId,
};
use remote::{InMemoryRepository, Remote, RemoteError, TrackQuery, TrackRepository};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_remote};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn member(id: u64, name: &str, role: Role, team: u64) -> TeamMember {
    TeamMember {
        id: UserId::new(id),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        team_id: Some(TeamId::new(team)),
        job_title: Some("Engineer".into()),
        completed_courses: 1,
        total_courses: 4,
    }
}

fn seeded() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    let me = UserId::new(1);
    for track in [
        TrainingTrack::new(TrackId::new(1), "React", 8, 10)
            .with_due_date(date(2025, 11, 5))
            .with_category(Some("Frontend")),
        TrainingTrack::new(TrackId::new(2), "CSS", 10, 10)
            .with_due_date(date(2025, 11, 5))
            .with_category(Some("Frontend")),
        TrainingTrack::new(TrackId::new(3), "SQL", 0, 5)
            .with_due_date(date(2025, 11, 20))
            .with_category(Some("Backend")),
    ] {
        repo.insert_track(me, track).expect("seed track");
    }
    for (id, title, progress) in [(1, "Rust basics", 100), (2, "Async Rust", 40)] {
        let course = Course::new(
            CourseId::new(id),
            me,
            title,
            Progress::new(progress).expect("progress"),
        )
        .expect("course")
        .with_platform(Some("Udemy".into()));
        repo.upsert_course(course).expect("seed course");
    }
    repo.upsert_member(member(1, "Ada", Role::TeamLead, 3))
        .expect("seed member");
    repo.upsert_member(member(2, "Bo", Role::Individual, 3))
        .expect("seed member");
    repo.upsert_member(member(4, "Cy", Role::Individual, 9))
        .expect("seed member");
    repo
}

fn individual() -> Session {
    Session::new(UserId::new(1), "Ada", Role::Individual, Some(TeamId::new(3)))
}

struct FailingTracks;

#[async_trait]
impl TrackRepository for FailingTracks {
    async fn list_tracks(&self, _query: &TrackQuery) -> Result<Vec<TrainingTrack>, RemoteError> {
        Err(RemoteError::HttpStatus(503))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_greeting_and_snapshot() {
    let mut harness = setup_view_harness(ViewKind::Home, individual(), seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Ada"), "missing greeting in {html}");
    assert!(html.contains("Tracks due this month: 3"), "missing count in {html}");
    assert!(html.contains("Track completion: 33%"), "missing rate in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn calendar_view_smoke_renders_month_and_summary() {
    let mut harness = setup_view_harness(ViewKind::Calendar, individual(), seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("November 2025"), "missing month title in {html}");
    assert!(html.contains("data-date=\"2025-11-05\""), "missing day cell in {html}");
    assert!(html.contains("Course completion: 72% (18/25)"), "missing summary in {html}");
    assert!(html.contains("Upcoming deadlines"), "missing upcoming list in {html}");
    assert!(!html.contains("calendar-member-select"), "individuals get no picker: {html}");
    assert!(!html.contains("day-popover"), "popover must start closed: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn calendar_view_smoke_offers_team_members_to_leads() {
    let lead = Session::new(UserId::new(1), "Ada", Role::TeamLead, Some(TeamId::new(3)));
    let mut harness = setup_view_harness(ViewKind::Calendar, lead, seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("My calendar"), "missing own option in {html}");
    assert!(html.contains(">Bo<"), "missing team member in {html}");
    assert!(!html.contains(">Cy<"), "other team leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn calendar_view_smoke_shows_notice_when_loading_fails() {
    let repo = seeded();
    let mut remote = Remote::from_in_memory(repo);
    remote.tracks = Arc::new(FailingTracks);
    let mut harness = setup_view_harness_with_remote(ViewKind::Calendar, individual(), remote);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Could not load November 2025"),
        "missing notice in {html}"
    );
    assert!(html.contains("Dismiss"), "missing dismiss button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_lists_own_courses() {
    let mut harness = setup_view_harness(ViewKind::Courses, individual(), seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Async Rust"), "missing course in {html}");
    assert!(html.contains("Rust basics"), "missing course in {html}");
    assert!(html.contains("Page 1 of 1"), "missing pagination in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn team_view_smoke_lists_everyone_for_hr() {
    let hr = Session::new(UserId::new(7), "Hana", Role::Hr, None);
    let mut harness = setup_view_harness(ViewKind::Team, hr, seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("All members"), "missing heading in {html}");
    assert!(html.contains("Bo"), "missing member in {html}");
    assert!(html.contains("Cy"), "missing member in {html}");
    assert!(html.contains("1/4 courses (25%)"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn team_view_smoke_denies_individuals() {
    let mut harness = setup_view_harness(ViewKind::Team, individual(), seeded());
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("You do not have access to this page."),
        "missing denial in {html}"
    );
    assert!(!html.contains("roster-table"), "roster leaked in {html}");
}
