use chrono::NaiveDate;

use crate::model::TrackId;

/// Category assigned when the backend omits one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
/// Platform assigned when the backend omits one.
pub const DEFAULT_PLATFORM: &str = "Unknown";

/// Completion percentage rounded half-up, clamped to `0..=100`.
///
/// A zero total is defined as 0%.
#[must_use]
pub fn completion_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Progress state of a training track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TrackStatus {
    /// Classify course counts.
    ///
    /// Counts where `completed` exceeds `total` are treated as completed; a
    /// track with no courses is never completed.
    #[must_use]
    pub fn classify(completed: u32, total: u32) -> Self {
        if total == 0 {
            TrackStatus::NotStarted
        } else if completed >= total {
            TrackStatus::Completed
        } else if completed > 0 {
            TrackStatus::InProgress
        } else {
            TrackStatus::NotStarted
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TrackStatus::NotStarted => "Not started",
            TrackStatus::InProgress => "In progress",
            TrackStatus::Completed => "Completed",
        }
    }
}

/// A unit of assigned training: a curriculum of courses with a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingTrack {
    id: TrackId,
    title: String,
    platform: Option<String>,
    category: Option<String>,
    due_date: Option<NaiveDate>,
    total_courses: u32,
    completed_courses: u32,
}

impl TrainingTrack {
    #[must_use]
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        completed_courses: u32,
        total_courses: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            platform: None,
            category: None,
            due_date: None,
            total_courses,
            completed_courses,
        }
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = category.map(Into::into);
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Option<impl Into<String>>) -> Self {
        self.platform = platform.map(Into::into);
        self
    }

    #[must_use]
    pub fn id(&self) -> TrackId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    #[must_use]
    pub fn total_courses(&self) -> u32 {
        self.total_courses
    }

    #[must_use]
    pub fn completed_courses(&self) -> u32 {
        self.completed_courses
    }

    #[must_use]
    pub fn status(&self) -> TrackStatus {
        TrackStatus::classify(self.completed_courses, self.total_courses)
    }

    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.completed_courses, self.total_courses)
    }

    /// Still has courses left to finish.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.completed_courses < self.total_courses
    }

    /// Incomplete and due strictly before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_incomplete() && self.due_date.is_some_and(|due| due < today)
    }
}

/// A track with its optional attributes resolved, ready for bucketing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTrack<'a> {
    pub track: &'a TrainingTrack,
    pub category: &'a str,
    pub platform: &'a str,
    pub due_date: NaiveDate,
    pub status: TrackStatus,
}

impl<'a> NormalizedTrack<'a> {
    /// Resolve defaults for category and platform.
    ///
    /// Returns `None` for tracks without a due date, which cannot be placed
    /// on a calendar.
    #[must_use]
    pub fn from_track(track: &'a TrainingTrack) -> Option<Self> {
        let due_date = track.due_date?;
        Some(Self {
            track,
            category: non_blank(track.category.as_deref()).unwrap_or(DEFAULT_CATEGORY),
            platform: non_blank(track.platform.as_deref()).unwrap_or(DEFAULT_PLATFORM),
            due_date,
            status: track.status(),
        })
    }

    /// Completed course count clamped to the total.
    #[must_use]
    pub fn completed_courses(&self) -> u32 {
        self.track.completed_courses.min(self.track.total_courses)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 8), 13);
        assert_eq!(completion_percent(8, 10), 80);
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(4, 0), 0);
    }

    #[test]
    fn percent_clamps_inverted_counts() {
        assert_eq!(completion_percent(12, 10), 100);
    }

    #[test]
    fn classify_covers_every_state() {
        assert_eq!(TrackStatus::classify(0, 0), TrackStatus::NotStarted);
        assert_eq!(TrackStatus::classify(0, 5), TrackStatus::NotStarted);
        assert_eq!(TrackStatus::classify(3, 5), TrackStatus::InProgress);
        assert_eq!(TrackStatus::classify(5, 5), TrackStatus::Completed);
        assert_eq!(TrackStatus::classify(7, 5), TrackStatus::Completed);
    }

    #[test]
    fn normalization_defaults_missing_and_blank_attributes() {
        let track = TrainingTrack::new(TrackId::new(1), "Rust", 0, 2)
            .with_due_date(Some(date(2025, 11, 5)))
            .with_category(Some("   "))
            .with_platform(None::<String>);
        let normalized = NormalizedTrack::from_track(&track).unwrap();
        assert_eq!(normalized.category, DEFAULT_CATEGORY);
        assert_eq!(normalized.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn normalization_skips_undated_tracks() {
        let track = TrainingTrack::new(TrackId::new(1), "Rust", 0, 2);
        assert!(NormalizedTrack::from_track(&track).is_none());
    }

    #[test]
    fn overdue_requires_incomplete_and_past_due() {
        let today = date(2025, 11, 10);
        let late = TrainingTrack::new(TrackId::new(1), "A", 1, 2).with_due_date(Some(date(2025, 11, 9)));
        let due_today =
            TrainingTrack::new(TrackId::new(2), "B", 1, 2).with_due_date(Some(today));
        let done = TrainingTrack::new(TrackId::new(3), "C", 2, 2).with_due_date(Some(date(2025, 11, 1)));
        assert!(late.is_overdue(today));
        assert!(!due_today.is_overdue(today));
        assert!(!done.is_overdue(today));
    }
}
