//! Client-side filtering, sorting and pagination of small lists.

use std::cmp::Ordering;

use thiserror::Error;

use crate::model::{Course, CourseStatus, Role, TeamMember};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListingError {
    #[error("page numbers start at 1")]
    ZeroPage,

    #[error("page size must be > 0")]
    ZeroPageSize,
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns `ListingError` for a zero page number or page size.
    pub fn new(page: u32, per_page: u32) -> Result<Self, ListingError> {
        if page == 0 {
            return Err(ListingError::ZeroPage);
        }
        if per_page == 0 {
            return Err(ListingError::ZeroPageSize);
        }
        Ok(Self { page, per_page })
    }

    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a filtered, sorted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `items` into the requested page. Pages past the end clamp to the
/// last page; an empty list is page 1 of 1.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let per_page = request.per_page as usize;
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = (request.page as usize).min(total_pages);
    let start = (page - 1) * per_page;

    let items = items.into_iter().skip(start).take(per_page).collect();
    Page {
        items,
        page: u32::try_from(page).unwrap_or(u32::MAX),
        per_page: request.per_page,
        total_items,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Case-insensitive substring match against any of `fields`.
#[must_use]
pub fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

// Missing values sort after present ones regardless of direction.
fn cmp_optional<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//
// ─── COURSES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub query: String,
    pub status: Option<CourseStatus>,
    pub category: Option<String>,
}

impl CourseFilter {
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        if self.status.is_some_and(|status| course.status() != status) {
            return false;
        }
        if let Some(category) = &self.category {
            if !course
                .category()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }
        let fields = [
            Some(course.title()),
            course.category(),
            course.platform(),
        ];
        matches_query(&self.query, fields.into_iter().flatten())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseSortKey {
    #[default]
    DueDate,
    Title,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseSort {
    pub key: CourseSortKey,
    pub direction: SortDirection,
}

impl CourseSort {
    /// Stable in-place sort.
    pub fn sort(&self, courses: &mut [Course]) {
        courses.sort_by(|a, b| match self.key {
            CourseSortKey::DueDate => cmp_optional(a.due_date(), b.due_date(), self.direction),
            CourseSortKey::Title => self
                .direction
                .apply(a.title().to_lowercase().cmp(&b.title().to_lowercase())),
            CourseSortKey::Progress => self.direction.apply(a.progress().cmp(&b.progress())),
        });
    }
}

/// Filter, sort and paginate courses in one step.
#[must_use]
pub fn list_courses(
    courses: Vec<Course>,
    filter: &CourseFilter,
    sort: CourseSort,
    request: PageRequest,
) -> Page<Course> {
    let mut visible: Vec<Course> = courses.into_iter().filter(|c| filter.matches(c)).collect();
    sort.sort(&mut visible);
    paginate(visible, request)
}

//
// ─── TEAM MEMBERS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub query: String,
    pub role: Option<Role>,
}

impl MemberFilter {
    #[must_use]
    pub fn matches(&self, member: &TeamMember) -> bool {
        if self.role.is_some_and(|role| member.role != role) {
            return false;
        }
        let fields = [
            Some(member.name.as_str()),
            Some(member.email.as_str()),
            member.job_title.as_deref(),
        ];
        matches_query(&self.query, fields.into_iter().flatten())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberSortKey {
    #[default]
    Name,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberSort {
    pub key: MemberSortKey,
    pub direction: SortDirection,
}

impl MemberSort {
    pub fn sort(&self, members: &mut [TeamMember]) {
        members.sort_by(|a, b| {
            let ordering = match self.key {
                MemberSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                MemberSortKey::Completion => a.completion_percent().cmp(&b.completion_percent()),
            };
            self.direction.apply(ordering)
        });
    }
}

#[must_use]
pub fn list_members(
    members: Vec<TeamMember>,
    filter: &MemberFilter,
    sort: MemberSort,
    request: PageRequest,
) -> Page<TeamMember> {
    let mut visible: Vec<TeamMember> = members.into_iter().filter(|m| filter.matches(m)).collect();
    sort.sort(&mut visible);
    paginate(visible, request)
}
