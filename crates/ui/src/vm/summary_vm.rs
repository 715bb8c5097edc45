use chrono::NaiveDate;
use lms_core::model::TrackId;
use lms_core::{Breakdown, MonthTrainingSummary};

use crate::vm::time_fmt::{format_due_date, format_relative_due};

/// Rows shown by a collapsed breakdown.
pub const COLLAPSED_BREAKDOWN_ROWS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownRowVm {
    pub name: String,
    pub total_tracks: u32,
    pub completed_tracks: u32,
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownListVm {
    pub rows: Vec<BreakdownRowVm>,
}

impl BreakdownListVm {
    fn from_breakdowns(items: &[Breakdown]) -> Self {
        let mut rows: Vec<BreakdownRowVm> = items
            .iter()
            .map(|b| BreakdownRowVm {
                name: b.name.clone(),
                total_tracks: b.total_tracks,
                completed_tracks: b.completed_tracks,
                percent: b.track_completion_percent(),
            })
            .collect();
        rows.sort_by(|a, b| b.total_tracks.cmp(&a.total_tracks));
        Self { rows }
    }

    #[must_use]
    pub fn visible(&self, expanded: bool) -> &[BreakdownRowVm] {
        if expanded {
            &self.rows
        } else {
            &self.rows[..self.rows.len().min(COLLAPSED_BREAKDOWN_ROWS)]
        }
    }

    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.rows.len() > COLLAPSED_BREAKDOWN_ROWS
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpcomingVm {
    pub id: TrackId,
    pub title: String,
    pub due_label: String,
    pub relative_label: String,
    pub percent: u8,
    pub is_overdue: bool,
}

impl UpcomingVm {
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        if self.is_overdue {
            "upcoming upcoming--overdue"
        } else {
            "upcoming"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryPanelVm {
    pub month_label: String,
    pub total_tracks: u32,
    pub completed_tracks: u32,
    pub in_progress_tracks: u32,
    pub not_started_tracks: u32,
    pub track_rate: u8,
    pub course_rate: u8,
    pub completed_courses: u32,
    pub total_courses: u32,
    pub categories: BreakdownListVm,
    pub platforms: BreakdownListVm,
    pub upcoming: Vec<UpcomingVm>,
}

impl SummaryPanelVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_tracks == 0
    }
}

#[must_use]
pub fn map_summary_panel(summary: &MonthTrainingSummary, today: NaiveDate) -> SummaryPanelVm {
    SummaryPanelVm {
        month_label: summary.month.label(),
        total_tracks: summary.total_tracks,
        completed_tracks: summary.completed_tracks,
        in_progress_tracks: summary.in_progress_tracks,
        not_started_tracks: summary.not_started_tracks,
        track_rate: summary.track_completion_percent(),
        course_rate: summary.course_completion_percent(),
        completed_courses: summary.completed_courses,
        total_courses: summary.total_courses,
        categories: BreakdownListVm::from_breakdowns(&summary.categories),
        platforms: BreakdownListVm::from_breakdowns(&summary.platforms),
        upcoming: summary
            .upcoming
            .iter()
            .map(|track| UpcomingVm {
                id: track.id(),
                title: track.title().to_string(),
                due_label: track.due_date().map(format_due_date).unwrap_or_default(),
                relative_label: track
                    .due_date()
                    .map(|due| format_relative_due(due, today))
                    .unwrap_or_default(),
                percent: track.completion_percent(),
                is_overdue: track.is_overdue(today),
            })
            .collect(),
    }
}
