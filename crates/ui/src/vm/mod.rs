mod calendar_vm;
mod course_vm;
pub mod popover;
mod summary_vm;
mod team_vm;
mod time_fmt;

pub use calendar_vm::{
    CalendarGridVm, CategoryIndicatorVm, DayCellVm, DayDetailVm, DayTrackVm,
    MAX_CATEGORY_INDICATORS, category_tone, day_detail,
};
pub use course_vm::{CoursePageVm, CourseRowVm, PROGRESS_STEP, map_course_page, map_course_row};
pub use popover::{
    HoverEffect, HoverInput, HoverIntent, Point, PopoverAnchor, Rect, Size, estimate_popover_size,
    place_popover,
};
pub use summary_vm::{
    BreakdownListVm, BreakdownRowVm, COLLAPSED_BREAKDOWN_ROWS, SummaryPanelVm, UpcomingVm,
    map_summary_panel,
};
pub use team_vm::{MemberRowVm, RosterPageVm, map_roster_page, member_options};
pub use time_fmt::{format_day_heading, format_due_date, format_relative_due};
