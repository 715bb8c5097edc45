//! Wire shapes returned by the learning backend and their mapping into
//! domain types.
//!
//! Individual malformed records never fail a whole batch: unusable due
//! dates become "no due date", negative counts clamp to zero and courses
//! that cannot be represented are skipped with a warning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lms_core::model::{
    Course, CourseId, Progress, Role, TeamId, TeamMember, TrackId, TrainingTrack, UserId,
};

/// Collections arrive either as a bare array or wrapped in `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub total_courses: i64,
    #[serde(default)]
    pub completed_courses: i64,
}

impl TrackRecord {
    #[must_use]
    pub fn into_track(self) -> TrainingTrack {
        let due_date = self.due_date.as_deref().and_then(|raw| {
            let parsed = parse_due_date(raw);
            if parsed.is_none() {
                tracing::warn!(track_id = self.id, raw, "ignoring unparseable due date");
            }
            parsed
        });
        TrainingTrack::new(
            TrackId::new(self.id),
            self.title,
            clamp_count(self.completed_courses),
            clamp_count(self.total_courses),
        )
        .with_due_date(due_date)
        .with_category(self.category)
        .with_platform(self.platform)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub track_id: Option<u64>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub progress: i64,
}

impl CourseRecord {
    /// Returns `None` when the record cannot form a valid course.
    #[must_use]
    pub fn into_course(self) -> Option<Course> {
        let id = self.id;
        let course = Course::new(
            CourseId::new(self.id),
            UserId::new(self.user_id),
            self.title,
            Progress::saturating(self.progress),
        );
        match course {
            Ok(course) => Some(
                course
                    .with_platform(self.platform)
                    .with_category(self.category)
                    .with_track(self.track_id.map(TrackId::new))
                    .with_due_date(self.due_date.as_deref().and_then(parse_due_date)),
            ),
            Err(err) => {
                tracing::warn!(course_id = id, %err, "skipping malformed course record");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub completed_courses: i64,
    #[serde(default)]
    pub total_courses: i64,
}

impl MemberRecord {
    #[must_use]
    pub fn into_member(self) -> TeamMember {
        TeamMember {
            id: UserId::new(self.id),
            name: self.name.trim().to_string(),
            email: self.email,
            role: Role::from_claim(&self.role),
            team_id: self.team_id.map(TeamId::new),
            job_title: self.job_title.filter(|t| !t.trim().is_empty()),
            completed_courses: clamp_count(self.completed_courses),
            total_courses: clamp_count(self.total_courses),
        }
    }
}

/// Body of a progress update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPatch {
    pub progress: u8,
}

/// Parse a due date as the calendar date written by the backend.
///
/// Accepts `YYYY-MM-DD` and timestamps that start with one
/// (`2025-11-05T00:00:00Z`); the time part and offset are ignored so a
/// date never shifts to a neighbouring day.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    if raw.len() > 10 && !raw[10..].starts_with(['T', 't', ' ']) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn clamp_count(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamp_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 5);
        assert_eq!(parse_due_date("2025-11-05"), expected);
        assert_eq!(parse_due_date("2025-11-05T00:00:00Z"), expected);
        assert_eq!(parse_due_date("2025-11-05T23:30:00-08:00"), expected);
        assert_eq!(parse_due_date(" 2025-11-05 "), expected);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("tomorrow"), None);
        assert_eq!(parse_due_date("2025-13-01"), None);
        assert_eq!(parse_due_date("2025-11-0512"), None);
    }

    #[test]
    fn track_record_decodes_with_nulls() {
        let json = r#"{
            "id": 7,
            "title": "Cloud basics",
            "due_date": null,
            "category": null,
            "platform": "Coursera",
            "total_courses": 4,
            "completed_courses": -2
        }"#;
        let record: TrackRecord = serde_json::from_str(json).unwrap();
        let track = record.into_track();
        assert_eq!(track.id(), TrackId::new(7));
        assert_eq!(track.due_date(), None);
        assert_eq!(track.category(), None);
        assert_eq!(track.platform(), Some("Coursera"));
        assert_eq!(track.completed_courses(), 0);
        assert_eq!(track.total_courses(), 4);
    }

    #[test]
    fn unparseable_due_date_becomes_none() {
        let record = TrackRecord {
            id: 1,
            title: "A".into(),
            due_date: Some("soon".into()),
            category: None,
            platform: None,
            total_courses: 1,
            completed_courses: 0,
        };
        assert_eq!(record.into_track().due_date(), None);
    }

    #[test]
    fn envelope_accepts_both_shapes() {
        let bare: ListEnvelope<u32> = serde_json::from_str("[1, 2]").unwrap();
        let wrapped: ListEnvelope<u32> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);
        assert_eq!(wrapped.into_vec(), vec![3]);
    }

    #[test]
    fn blank_course_title_is_skipped() {
        let record = CourseRecord {
            id: 1,
            user_id: 2,
            title: " ".into(),
            platform: None,
            category: None,
            track_id: None,
            due_date: None,
            progress: 10,
        };
        assert!(record.into_course().is_none());
    }

    #[test]
    fn member_record_maps_role_claim() {
        let record: MemberRecord = serde_json::from_str(
            r#"{"id": 3, "name": " Lin ", "email": "lin@example.com", "role": "manager",
                "team_id": 9, "completed_courses": 2, "total_courses": 5}"#,
        )
        .unwrap();
        let member = record.into_member();
        assert_eq!(member.name, "Lin");
        assert_eq!(member.role, Role::TeamLead);
        assert_eq!(member.team_id, Some(TeamId::new(9)));
        assert_eq!(member.completion_percent(), 40);
    }
}
