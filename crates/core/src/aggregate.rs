//! Month-level roll-up of training tracks.
//!
//! `aggregate_month` is a pure function: the same tracks and month always
//! produce a structurally equal `MonthTrainingSummary`. A summary is never
//! patched; a refetch or a month change builds a new one.

use chrono::NaiveDate;

use crate::calendar::MonthKey;
use crate::model::{NormalizedTrack, TrackStatus, TrainingTrack, completion_percent};
use crate::ordered_map::OrderedMap;

/// Maximum number of entries in the upcoming-deadlines list.
pub const UPCOMING_LIMIT: usize = 10;

/// Everything due on one calendar day of the aggregated month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_tracks: u32,
    pub completed_tracks: u32,
    pub in_progress_tracks: u32,
    pub total_courses: u32,
    pub completed_courses: u32,
    pub tracks_by_category: OrderedMap<String, u32>,
    pub tracks_by_platform: OrderedMap<String, u32>,
    pub tracks: Vec<TrainingTrack>,
}

impl DaySummary {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_tracks: 0,
            completed_tracks: 0,
            in_progress_tracks: 0,
            total_courses: 0,
            completed_courses: 0,
            tracks_by_category: OrderedMap::new(),
            tracks_by_platform: OrderedMap::new(),
            tracks: Vec::new(),
        }
    }

    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.completed_courses, self.total_courses)
    }
}

/// Month-wide totals for one category or platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub name: String,
    pub total_tracks: u32,
    pub completed_tracks: u32,
    pub total_courses: u32,
    pub completed_courses: u32,
}

impl Breakdown {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total_tracks: 0,
            completed_tracks: 0,
            total_courses: 0,
            completed_courses: 0,
        }
    }

    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.completed_courses, self.total_courses)
    }

    #[must_use]
    pub fn track_completion_percent(&self) -> u8 {
        completion_percent(self.completed_tracks, self.total_tracks)
    }
}

pub type CategoryBreakdown = Breakdown;
pub type PlatformBreakdown = Breakdown;

/// Aggregation root for one month of one user's (or team's) tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTrainingSummary {
    pub month: MonthKey,
    pub total_tracks: u32,
    pub completed_tracks: u32,
    pub in_progress_tracks: u32,
    pub not_started_tracks: u32,
    pub total_courses: u32,
    pub completed_courses: u32,
    pub daily: OrderedMap<NaiveDate, DaySummary>,
    pub categories: Vec<CategoryBreakdown>,
    pub platforms: Vec<PlatformBreakdown>,
    pub upcoming: Vec<TrainingTrack>,
}

impl MonthTrainingSummary {
    /// A summary with no tracks; what an empty month renders as.
    #[must_use]
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            total_tracks: 0,
            completed_tracks: 0,
            in_progress_tracks: 0,
            not_started_tracks: 0,
            total_courses: 0,
            completed_courses: 0,
            daily: OrderedMap::new(),
            categories: Vec::new(),
            platforms: Vec::new(),
            upcoming: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_tracks == 0
    }

    #[must_use]
    pub fn track_completion_percent(&self) -> u8 {
        completion_percent(self.completed_tracks, self.total_tracks)
    }

    #[must_use]
    pub fn course_completion_percent(&self) -> u8 {
        completion_percent(self.completed_courses, self.total_courses)
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.daily.get(&date)
    }
}

/// Roll up the tracks due in `month`.
///
/// Tracks without a due date, or due in another month, are skipped.
/// Malformed counts never fail the pass: completed counts above the total
/// classify as completed and are clamped in course sums, and course sums
/// saturate at `u32::MAX`.
#[must_use]
pub fn aggregate_month(tracks: &[TrainingTrack], month: MonthKey) -> MonthTrainingSummary {
    let mut summary = MonthTrainingSummary::empty(month);
    let mut categories: OrderedMap<String, Breakdown> = OrderedMap::new();
    let mut platforms: OrderedMap<String, Breakdown> = OrderedMap::new();
    let mut incomplete: Vec<&TrainingTrack> = Vec::new();

    let in_month = tracks
        .iter()
        .filter_map(NormalizedTrack::from_track)
        .filter(|entry| month.contains(entry.due_date));

    for entry in in_month {
        let total_courses = entry.track.total_courses();
        let completed_courses = entry.completed_courses();
        let completed = u32::from(entry.status == TrackStatus::Completed);
        let in_progress = u32::from(entry.status == TrackStatus::InProgress);

        summary.total_tracks += 1;
        summary.completed_tracks += completed;
        summary.in_progress_tracks += in_progress;
        summary.not_started_tracks += u32::from(entry.status == TrackStatus::NotStarted);
        summary.total_courses = summary.total_courses.saturating_add(total_courses);
        summary.completed_courses = summary.completed_courses.saturating_add(completed_courses);

        let day = summary
            .daily
            .get_or_insert_with(entry.due_date, || DaySummary::empty(entry.due_date));
        day.total_tracks += 1;
        day.completed_tracks += completed;
        day.in_progress_tracks += in_progress;
        day.total_courses = day.total_courses.saturating_add(total_courses);
        day.completed_courses = day.completed_courses.saturating_add(completed_courses);
        *day
            .tracks_by_category
            .get_or_insert_with(entry.category.to_string(), || 0) += 1;
        *day
            .tracks_by_platform
            .get_or_insert_with(entry.platform.to_string(), || 0) += 1;
        day.tracks.push(entry.track.clone());

        for (map, key) in [
            (&mut categories, entry.category),
            (&mut platforms, entry.platform),
        ] {
            let bucket = map.get_or_insert_with(key.to_string(), || Breakdown::empty(key));
            bucket.total_tracks += 1;
            bucket.completed_tracks += completed;
            bucket.total_courses = bucket.total_courses.saturating_add(total_courses);
            bucket.completed_courses = bucket.completed_courses.saturating_add(completed_courses);
        }

        if entry.track.is_incomplete() {
            incomplete.push(entry.track);
        }
    }

    // sort_by_key is stable: equal due dates keep input order
    incomplete.sort_by_key(|track| track.due_date());
    summary.upcoming = incomplete
        .into_iter()
        .take(UPCOMING_LIMIT)
        .cloned()
        .collect();
    summary.categories = categories.into_values();
    summary.platforms = platforms.into_values();
    summary
}
