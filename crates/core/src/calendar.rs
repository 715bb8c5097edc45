//! Month arithmetic and the 6×7 calendar grid.
//!
//! Months are 0-based throughout (January = 0); conversion to the 1-based
//! convention of the backend happens in the remote layer.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};

use crate::aggregate::MonthTrainingSummary;

/// Number of cells in a month grid: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Keeps every first-of-month representable by chrono.
const MIN_YEAR: i32 = -9_999;
const MAX_YEAR: i32 = 9_999;

/// Gregorian leap year rule, including the century exception.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a 0-based month. Out-of-range months carry into the
/// neighbouring year.
#[must_use]
pub fn days_in_month(year: i32, month: i32) -> u32 {
    MonthKey::new(year, month).days_in_month()
}

/// ISO `YYYY-MM-DD` key used to join cells, buckets and events.
#[must_use]
pub fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A calendar month, the unit of fetching and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from a year and a 0-based month, carrying overflow into
    /// the year (`(2025, 12)` is January 2026, `(2025, -1)` December 2024).
    #[must_use]
    pub fn new(year: i32, month: i32) -> Self {
        let total = i64::from(year) * 12 + i64::from(month);
        let year = total.div_euclid(12).clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR));
        let month = total.rem_euclid(12);
        Self {
            year: i32::try_from(year).unwrap_or(MAX_YEAR),
            month: u32::try_from(month).unwrap_or(0),
        }
    }

    /// The month a date falls in.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 1-based month number, as the backend expects it.
    #[must_use]
    pub fn one_based_month(&self) -> u32 {
        self.month + 1
    }

    #[must_use]
    pub fn next(&self) -> Self {
        self.offset(1)
    }

    #[must_use]
    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    #[must_use]
    pub fn offset(&self, months: i32) -> Self {
        let month = i32::try_from(self.month).unwrap_or(0);
        Self::new(self.year, month.saturating_add(months))
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.one_based_month(), 1).unwrap_or(NaiveDate::MIN)
    }

    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    #[must_use]
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.one_based_month())
    }
}

/// One slot of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub iso_date: String,
    pub is_current_month: bool,
    pub is_today: bool,
    pub track_count: u32,
    pub course_count: u32,
}

/// Generate the 42 cells covering `month`, starting on the Sunday on or
/// before the 1st.
///
/// Leading and trailing cells carry their real dates from the neighbouring
/// months. `is_today` compares ISO keys, so callers must build `today` with
/// the same local-day convention as the track due dates.
#[must_use]
pub fn month_grid(month: MonthKey, today: NaiveDate) -> Vec<CalendarDayCell> {
    let first = month.first_day();
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let today_key = iso_key(today);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let iso_date = iso_key(date);
            CalendarDayCell {
                date,
                day: date.day(),
                is_current_month: month.contains(date),
                is_today: iso_date == today_key,
                iso_date,
                track_count: 0,
                course_count: 0,
            }
        })
        .collect()
}

/// Copy per-day track and course counts from `summary` onto the cells of
/// the summarised month.
#[must_use]
pub fn join_day_counts(
    cells: &[CalendarDayCell],
    summary: &MonthTrainingSummary,
) -> Vec<CalendarDayCell> {
    cells
        .iter()
        .map(|cell| {
            let mut cell = cell.clone();
            if cell.is_current_month {
                if let Some(day) = summary.daily.get(&cell.date) {
                    cell.track_count = day.total_tracks;
                    cell.course_count = day.total_courses;
                }
            }
            cell
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_month;
    use crate::model::{TrackId, TrainingTrack};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_years_follow_century_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn month_key_carries_out_of_range_months() {
        assert_eq!(MonthKey::new(2025, 12), MonthKey::new(2026, 0));
        assert_eq!(MonthKey::new(2025, -1), MonthKey::new(2024, 11));
        assert_eq!(MonthKey::new(2025, 25), MonthKey::new(2027, 1));
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn month_key_navigation_round_trips() {
        let nov = MonthKey::new(2025, 10);
        assert_eq!(nov.next(), MonthKey::new(2025, 11));
        assert_eq!(nov.next().next(), MonthKey::new(2026, 0));
        assert_eq!(nov.next().prev(), nov);
        assert_eq!(nov.label(), "November 2025");
        assert_eq!(nov.to_string(), "2025-11");
        assert_eq!(nov.one_based_month(), 11);
    }

    #[test]
    fn every_month_has_42_cells() {
        let today = date(2025, 11, 10);
        for year in [1900, 2000, 2015, 2024, 2025, 2026] {
            for month in 0..12 {
                let key = MonthKey::new(year, month);
                let cells = month_grid(key, today);
                assert_eq!(cells.len(), GRID_CELLS, "{key}");
                let in_month = cells.iter().filter(|c| c.is_current_month).count();
                assert_eq!(in_month as u32, key.days_in_month(), "{key}");
                assert!(cells.iter().filter(|c| c.is_today).count() <= 1);
                assert_eq!(cells[0].date.weekday(), chrono::Weekday::Sun);
            }
        }
    }

    #[test]
    fn november_2025_starts_with_trailing_october_days() {
        let cells = month_grid(MonthKey::new(2025, 10), date(2025, 11, 10));
        // 1 November 2025 is a Saturday.
        assert_eq!(cells[0].date, date(2025, 10, 26));
        assert!(!cells[0].is_current_month);
        assert_eq!(cells[6].date, date(2025, 11, 1));
        assert!(cells[6].is_current_month);
        assert_eq!(cells[41].date, date(2025, 12, 6));
        assert_eq!(cells[41].day, 6);

        let today: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].iso_date, "2025-11-10");
    }

    #[test]
    fn month_starting_on_sunday_still_fills_six_rows() {
        // February 2015 starts on a Sunday and has 28 days.
        let cells = month_grid(MonthKey::new(2015, 1), date(2015, 2, 1));
        assert_eq!(cells[0].date, date(2015, 2, 1));
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[41].date, date(2015, 3, 14));
    }

    #[test]
    fn today_outside_grid_marks_nothing() {
        let cells = month_grid(MonthKey::new(2025, 10), date(2030, 1, 1));
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn join_copies_counts_only_for_current_month() {
        let key = MonthKey::new(2025, 10);
        let tracks = vec![
            TrainingTrack::new(TrackId::new(1), "A", 1, 4).with_due_date(Some(date(2025, 11, 5))),
            TrainingTrack::new(TrackId::new(2), "B", 0, 2).with_due_date(Some(date(2025, 11, 5))),
        ];
        let summary = aggregate_month(&tracks, key);
        let cells = join_day_counts(&month_grid(key, date(2025, 11, 10)), &summary);

        let fifth = cells.iter().find(|c| c.iso_date == "2025-11-05").unwrap();
        assert_eq!(fifth.track_count, 2);
        assert_eq!(fifth.course_count, 6);
        assert_eq!(
            cells.iter().map(|c| c.track_count).sum::<u32>(),
            summary.total_tracks
        );
    }
}
