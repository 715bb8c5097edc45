use chrono::{Duration, NaiveDate};
use lms_core::MonthKey;
use lms_core::model::{
    Course, CourseId, Progress, Role, TeamId, TeamMember, TrackId, TrainingTrack, UserId,
};
use remote::InMemoryRepository;

struct TrackSeed {
    title: &'static str,
    category: &'static str,
    platform: &'static str,
    day: u32,
    month_offset: i32,
    completed: u32,
    total: u32,
}

const TRACKS: &[TrackSeed] = &[
    TrackSeed { title: "React Fundamentals", category: "Frontend", platform: "Udemy", day: 5, month_offset: 0, completed: 8, total: 10 },
    TrackSeed { title: "Modern CSS", category: "Frontend", platform: "Udemy", day: 5, month_offset: 0, completed: 10, total: 10 },
    TrackSeed { title: "SQL for Analysts", category: "Backend", platform: "Coursera", day: 5, month_offset: 0, completed: 0, total: 5 },
    TrackSeed { title: "Kubernetes Basics", category: "DevOps", platform: "Pluralsight", day: 12, month_offset: 0, completed: 2, total: 6 },
    TrackSeed { title: "Threat Modelling", category: "Security", platform: "Internal", day: 12, month_offset: 0, completed: 0, total: 3 },
    TrackSeed { title: "Async Rust", category: "Backend", platform: "Udemy", day: 18, month_offset: 0, completed: 4, total: 4 },
    TrackSeed { title: "Design Systems", category: "Design", platform: "Coursera", day: 24, month_offset: 0, completed: 1, total: 8 },
    TrackSeed { title: "Terraform", category: "DevOps", platform: "Udemy", day: 9, month_offset: 1, completed: 0, total: 5 },
    TrackSeed { title: "GraphQL", category: "Backend", platform: "Pluralsight", day: 20, month_offset: -1, completed: 3, total: 3 },
];

fn due_on(today: NaiveDate, month_offset: i32, day: u32) -> NaiveDate {
    let month = MonthKey::containing(today).offset(month_offset);
    let day = day.clamp(1, month.days_in_month());
    month.first_day() + Duration::days(i64::from(day - 1))
}

/// Fill `repo` with a small team and a few months of training data around
/// `today`, all owned by `me`.
pub fn seed(
    repo: &InMemoryRepository,
    me: UserId,
    team: TeamId,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    for (index, seed) in (1u64..).zip(TRACKS) {
        let track = TrainingTrack::new(TrackId::new(index), seed.title, seed.completed, seed.total)
            .with_due_date(Some(due_on(today, seed.month_offset, seed.day)))
            .with_category(Some(seed.category))
            .with_platform(Some(seed.platform));
        repo.insert_track(me, track)?;

        let percent = if seed.total == 0 {
            0
        } else {
            i64::from(seed.completed * 100 / seed.total)
        };
        let course = Course::new(CourseId::new(index), me, seed.title, Progress::saturating(percent))?
            .with_platform(Some(seed.platform.to_string()))
            .with_category(Some(seed.category.to_string()))
            .with_track(Some(TrackId::new(index)))
            .with_due_date(Some(due_on(today, seed.month_offset, seed.day)));
        repo.upsert_course(course)?;
    }

    let members = [
        (me, "You", Role::TeamLead, Some(team), "Engineering Manager", 3, 9),
        (UserId::new(me.value() + 1), "Bo Lindqvist", Role::Individual, Some(team), "Backend Engineer", 5, 7),
        (UserId::new(me.value() + 2), "Chen Wei", Role::Individual, Some(team), "Frontend Engineer", 2, 6),
        (UserId::new(me.value() + 3), "Dara Okafor", Role::Individual, None, "Data Analyst", 4, 4),
        (UserId::new(me.value() + 4), "Eli Moreau", Role::Hr, None, "People Partner", 1, 2),
    ];
    for (id, name, role, team_id, job_title, completed, total) in members {
        repo.upsert_member(TeamMember {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.split(' ').next().unwrap_or(name).to_lowercase()),
            role,
            team_id,
            job_title: Some(job_title.to_string()),
            completed_courses: completed,
            total_courses: total,
        })?;
    }

    tracing::info!(tracks = TRACKS.len(), "demo data seeded");
    Ok(())
}
