use dioxus::prelude::*;
use lms_core::listing::{
    CourseFilter, CourseSort, CourseSortKey, DEFAULT_PAGE_SIZE, PageRequest, SortDirection,
};
use lms_core::model::{CourseId, CourseStatus};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CoursePageVm, CourseRowVm, map_course_page};

fn status_value(status: Option<CourseStatus>) -> &'static str {
    match status {
        None => "",
        Some(CourseStatus::NotStarted) => "not_started",
        Some(CourseStatus::InProgress) => "in_progress",
        Some(CourseStatus::Completed) => "completed",
    }
}

fn status_from_value(value: &str) -> Option<CourseStatus> {
    match value {
        "not_started" => Some(CourseStatus::NotStarted),
        "in_progress" => Some(CourseStatus::InProgress),
        "completed" => Some(CourseStatus::Completed),
        _ => None,
    }
}

fn sort_value(key: CourseSortKey) -> &'static str {
    match key {
        CourseSortKey::DueDate => "due",
        CourseSortKey::Title => "title",
        CourseSortKey::Progress => "progress",
    }
}

fn sort_from_value(value: &str) -> CourseSortKey {
    match value {
        "title" => CourseSortKey::Title,
        "progress" => CourseSortKey::Progress,
        _ => CourseSortKey::DueDate,
    }
}

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let today = ctx.calendar().today();
    let session = ctx.session().clone();

    let mut search = use_signal(String::new);
    let mut status = use_signal(|| None::<CourseStatus>);
    let mut sort = use_signal(CourseSort::default);
    let mut page = use_signal(|| 1u32);
    let mut action_error = use_signal(|| None::<String>);

    let resource = {
        let courses = courses.clone();
        let session = session.clone();
        use_resource(move || {
            let courses = courses.clone();
            let session = session.clone();
            let filter = CourseFilter {
                query: search(),
                status: status(),
                category: None,
            };
            let sort = sort();
            let request = PageRequest::new(page(), DEFAULT_PAGE_SIZE).unwrap_or_default();
            async move {
                let page = courses
                    .list_courses(&session, None, &filter, sort, request)
                    .await
                    .map_err(|err| ViewError::from(&err))?;
                Ok::<_, ViewError>(map_course_page(&page, today))
            }
        })
    };

    let set_progress = use_callback(move |(course_id, percent): (CourseId, u8)| {
        let courses = courses.clone();
        let session = session.clone();
        let mut resource = resource;
        spawn(async move {
            match courses.update_progress(&session, course_id, percent).await {
                Ok(_) => {
                    action_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    tracing::warn!(%err, course_id = %course_id, "progress update failed");
                    action_error.set(Some(ViewError::from(&err).message().to_string()));
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let current_sort = sort();
    let direction_label = match current_sort.direction {
        SortDirection::Ascending => "Ascending",
        SortDirection::Descending => "Descending",
    };

    rsx! {
        div { class: "page courses-page",
            header { class: "view-header",
                h2 { class: "view-title", "My courses" }
            }
            div { class: "view-divider" }

            div { class: "list-controls",
                input {
                    class: "list-search-input",
                    r#type: "text",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |evt| {
                        search.set(evt.value());
                        page.set(1);
                    },
                }
                select {
                    class: "list-select",
                    title: "Filter by status",
                    value: "{status_value(status())}",
                    onchange: move |evt| {
                        status.set(status_from_value(&evt.value()));
                        page.set(1);
                    },
                    option { value: "", "All statuses" }
                    option { value: "not_started", "Not started" }
                    option { value: "in_progress", "In progress" }
                    option { value: "completed", "Completed" }
                }
                select {
                    class: "list-select",
                    title: "Sort courses",
                    value: "{sort_value(current_sort.key)}",
                    onchange: move |evt| {
                        let key = sort_from_value(&evt.value());
                        sort.with_mut(|sort| sort.key = key);
                    },
                    option { value: "due", "Due date" }
                    option { value: "title", "Title" }
                    option { value: "progress", "Progress" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| sort.with_mut(|sort| sort.direction = sort.direction.toggled()),
                    "{direction_label}"
                }
            }

            if let Some(message) = action_error() {
                p { class: "list-error", role: "alert", "{message}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    CourseTable {
                        vm,
                        on_progress: set_progress,
                        on_page: move |next: u32| page.set(next),
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn CourseTable(
    vm: CoursePageVm,
    on_progress: EventHandler<(CourseId, u8)>,
    on_page: EventHandler<u32>,
) -> Element {
    if vm.rows.is_empty() {
        return rsx! {
            p { class: "list-empty", "No courses match." }
        };
    }
    let page = vm.page;

    rsx! {
        ul { class: "course-list",
            for row in vm.rows.iter().cloned() {
                CourseRow { key: "{row.id}", row, on_progress }
            }
        }
        div { class: "list-pagination",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !vm.has_previous(),
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "Previous"
            }
            span { "{vm.page_label()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !vm.has_next(),
                onclick: move |_| on_page.call(page + 1),
                "Next"
            }
        }
    }
}

#[component]
fn CourseRow(row: CourseRowVm, on_progress: EventHandler<(CourseId, u8)>) -> Element {
    let id = row.id;
    let next = row.next_progress();
    let previous = row.previous_progress();

    rsx! {
        li { class: "course-row",
            div { class: "course-row-head",
                span { class: "course-title", "{row.title}" }
                span { class: "pill", "{row.status_label}" }
                if row.is_overdue {
                    span { class: "pill pill--danger", "Overdue" }
                }
            }
            if !row.meta.is_empty() {
                div { class: "course-meta", "{row.meta}" }
            }
            if let Some(due) = row.due_label.as_deref() {
                div { class: "course-due", "Due {due}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {row.progress}%;" }
            }
            div { class: "course-progress",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    aria_label: "Decrease progress",
                    disabled: previous.is_none(),
                    onclick: move |_| {
                        if let Some(percent) = previous {
                            on_progress.call((id, percent));
                        }
                    },
                    "-"
                }
                span { "{row.progress}%" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    aria_label: "Increase progress",
                    disabled: next.is_none(),
                    onclick: move |_| {
                        if let Some(percent) = next {
                            on_progress.call((id, percent));
                        }
                    },
                    "+"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_values_round_trip() {
        for status in [
            None,
            Some(CourseStatus::NotStarted),
            Some(CourseStatus::InProgress),
            Some(CourseStatus::Completed),
        ] {
            assert_eq!(status_from_value(status_value(status)), status);
        }
        assert_eq!(sort_from_value("bogus"), CourseSortKey::DueDate);
        assert_eq!(sort_from_value(sort_value(CourseSortKey::Progress)), CourseSortKey::Progress);
    }
}
