#![forbid(unsafe_code)]

pub mod aggregate;
pub mod calendar;
pub mod listing;
pub mod model;
pub mod ordered_map;
pub mod time;

pub use aggregate::{
    Breakdown, CategoryBreakdown, DaySummary, MonthTrainingSummary, PlatformBreakdown,
    UPCOMING_LIMIT, aggregate_month,
};
pub use calendar::{CalendarDayCell, MonthKey, iso_key, join_day_counts, month_grid};
pub use ordered_map::OrderedMap;
pub use time::Clock;
