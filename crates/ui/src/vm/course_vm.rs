use chrono::NaiveDate;
use lms_core::listing::Page;
use lms_core::model::{Course, CourseId, CourseStatus};

use crate::vm::time_fmt::format_due_date;

/// Step used by the progress buttons on a course row.
pub const PROGRESS_STEP: u8 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRowVm {
    pub id: CourseId,
    pub title: String,
    pub meta: String,
    pub status: CourseStatus,
    pub status_label: &'static str,
    pub progress: u8,
    pub due_label: Option<String>,
    pub is_overdue: bool,
}

impl CourseRowVm {
    #[must_use]
    pub fn next_progress(&self) -> Option<u8> {
        (self.progress < 100).then(|| self.progress.saturating_add(PROGRESS_STEP).min(100))
    }

    #[must_use]
    pub fn previous_progress(&self) -> Option<u8> {
        (self.progress > 0).then(|| self.progress.saturating_sub(PROGRESS_STEP))
    }
}

#[must_use]
pub fn map_course_row(course: &Course, today: NaiveDate) -> CourseRowVm {
    let meta = [course.platform(), course.category()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    CourseRowVm {
        id: course.id(),
        title: course.title().to_string(),
        meta,
        status: course.status(),
        status_label: course.status().label(),
        progress: course.progress().percent(),
        due_label: course.due_date().map(format_due_date),
        is_overdue: course.is_overdue(today),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoursePageVm {
    pub rows: Vec<CourseRowVm>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl CoursePageVm {
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[must_use]
pub fn map_course_page(page: &Page<Course>, today: NaiveDate) -> CoursePageVm {
    CoursePageVm {
        rows: page
            .items
            .iter()
            .map(|course| map_course_row(course, today))
            .collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}
