mod calendar;
mod courses;
mod home;
mod state;
mod team;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use calendar::CalendarView;
pub use courses::CoursesView;
pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use team::TeamView;
