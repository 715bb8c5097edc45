mod day_popover;
mod grid;
mod summary_panel;
mod view;

pub use view::CalendarView;
