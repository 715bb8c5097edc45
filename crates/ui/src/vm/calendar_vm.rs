use chrono::NaiveDate;
use lms_core::calendar::{DAYS_PER_WEEK, WEEKDAY_LABELS};
use lms_core::model::{DEFAULT_CATEGORY, DEFAULT_PLATFORM, TrackId, TrainingTrack};
use lms_core::{CalendarDayCell, DaySummary};
use services::MonthView;

use crate::vm::time_fmt::{format_day_heading, format_due_date};

/// Category dots shown on a day cell before collapsing into "+N".
pub const MAX_CATEGORY_INDICATORS: usize = 3;

const CATEGORY_TONES: u8 = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryIndicatorVm {
    pub name: String,
    pub tone: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCellVm {
    pub date: NaiveDate,
    pub iso_date: String,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub track_count: u32,
    pub course_count: u32,
    pub completed_tracks: u32,
    pub indicators: Vec<CategoryIndicatorVm>,
    pub hidden_categories: usize,
}

impl DayCellVm {
    fn from_cell(cell: &CalendarDayCell, day: Option<&DaySummary>) -> Self {
        let mut vm = Self {
            date: cell.date,
            iso_date: cell.iso_date.clone(),
            day: cell.day,
            is_current_month: cell.is_current_month,
            is_today: cell.is_today,
            track_count: cell.track_count,
            course_count: cell.course_count,
            completed_tracks: 0,
            indicators: Vec::new(),
            hidden_categories: 0,
        };
        if let Some(day) = day.filter(|_| cell.is_current_month) {
            vm.completed_tracks = day.completed_tracks;
            vm.indicators = day
                .tracks_by_category
                .keys()
                .take(MAX_CATEGORY_INDICATORS)
                .map(|name| CategoryIndicatorVm {
                    name: name.clone(),
                    tone: category_tone(name),
                })
                .collect();
            vm.hidden_categories = day
                .tracks_by_category
                .len()
                .saturating_sub(MAX_CATEGORY_INDICATORS);
        }
        vm
    }

    #[must_use]
    pub fn has_tracks(&self) -> bool {
        self.is_current_month && self.track_count > 0
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        let mut class = String::from("day-cell");
        if !self.is_current_month {
            class.push_str(" day-cell--muted");
        }
        if self.is_today {
            class.push_str(" day-cell--today");
        }
        if self.has_tracks() {
            class.push_str(" day-cell--has-tracks");
        }
        class
    }
}

/// Stable palette slot for a category name.
#[must_use]
pub fn category_tone(name: &str) -> u8 {
    let sum = name
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(u32::from(byte)));
    u8::try_from(sum % u32::from(CATEGORY_TONES)).unwrap_or(0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarGridVm {
    pub title: String,
    pub weekday_labels: [&'static str; DAYS_PER_WEEK],
    pub weeks: Vec<Vec<DayCellVm>>,
}

impl CalendarGridVm {
    #[must_use]
    pub fn build(view: &MonthView) -> Self {
        let cells: Vec<DayCellVm> = view
            .cells
            .iter()
            .map(|cell| DayCellVm::from_cell(cell, view.summary.day(cell.date)))
            .collect();
        let weeks = cells
            .chunks(DAYS_PER_WEEK)
            .map(<[DayCellVm]>::to_vec)
            .collect();
        Self {
            title: view.query.month.label(),
            weekday_labels: WEEKDAY_LABELS,
            weeks,
        }
    }

    /// The ISO date to emit when `cell` is clicked. Days outside the month
    /// are inert.
    #[must_use]
    pub fn select(cell: &DayCellVm) -> Option<String> {
        cell.is_current_month.then(|| cell.iso_date.clone())
    }

    #[must_use]
    pub fn cell(&self, iso_date: &str) -> Option<&DayCellVm> {
        self.weeks
            .iter()
            .flatten()
            .find(|cell| cell.iso_date == iso_date)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayTrackVm {
    pub id: TrackId,
    pub title: String,
    pub category: String,
    pub platform: String,
    pub status_label: &'static str,
    pub percent: u8,
    pub progress_label: String,
    pub due_label: String,
    pub is_overdue: bool,
}

impl DayTrackVm {
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        if self.is_overdue {
            "day-track day-track--overdue"
        } else {
            "day-track"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayDetailVm {
    pub heading: String,
    pub iso_date: String,
    pub tracks: Vec<DayTrackVm>,
}

/// Tracks due on one day, overdue first, then by due date.
#[must_use]
pub fn day_detail(day: &DaySummary, today: NaiveDate) -> DayDetailVm {
    let mut tracks: Vec<&TrainingTrack> = day.tracks.iter().collect();
    // stable: ties keep aggregation order
    tracks.sort_by_key(|track| (!track.is_overdue(today), track.due_date()));
    DayDetailVm {
        heading: format_day_heading(day.date),
        iso_date: lms_core::iso_key(day.date),
        tracks: tracks
            .into_iter()
            .map(|track| DayTrackVm {
                id: track.id(),
                title: track.title().to_string(),
                category: track
                    .category()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or(DEFAULT_CATEGORY)
                    .to_string(),
                platform: track
                    .platform()
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or(DEFAULT_PLATFORM)
                    .to_string(),
                status_label: track.status().label(),
                percent: track.completion_percent(),
                progress_label: format!(
                    "{}/{} courses",
                    track.completed_courses().min(track.total_courses()),
                    track.total_courses()
                ),
                due_label: track.due_date().map(format_due_date).unwrap_or_default(),
                is_overdue: track.is_overdue(today),
            })
            .collect(),
    }
}
