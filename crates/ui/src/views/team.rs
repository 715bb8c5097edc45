use dioxus::prelude::*;
use lms_core::listing::{
    DEFAULT_PAGE_SIZE, MemberFilter, MemberSort, MemberSortKey, PageRequest, SortDirection,
};
use lms_core::model::Role;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{RosterPageVm, map_roster_page};

fn role_from_value(value: &str) -> Option<Role> {
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}

#[component]
pub fn TeamView() -> Element {
    let ctx = use_context::<AppContext>();
    let team = ctx.team();
    let session = ctx.session().clone();
    let heading = if session.role().can_view_all_members() {
        "All members"
    } else {
        "My team"
    };

    let mut search = use_signal(String::new);
    let mut role = use_signal(|| None::<Role>);
    let mut sort = use_signal(MemberSort::default);
    let mut page = use_signal(|| 1u32);

    let resource = use_resource(move || {
        let team = team.clone();
        let session = session.clone();
        let filter = MemberFilter {
            query: search(),
            role: role(),
        };
        let sort = sort();
        let request = PageRequest::new(page(), DEFAULT_PAGE_SIZE).unwrap_or_default();
        async move {
            let roster = team
                .roster(&session, &filter, sort, request)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_roster_page(&roster))
        }
    });

    let state = view_state_from_resource(&resource);
    let current_sort = sort();
    let role_value = role().map(|role| role.as_str()).unwrap_or_default();
    let sort_label = match (current_sort.key, current_sort.direction) {
        (MemberSortKey::Name, SortDirection::Ascending) => "Name A-Z",
        (MemberSortKey::Name, SortDirection::Descending) => "Name Z-A",
        (MemberSortKey::Completion, SortDirection::Ascending) => "Least complete first",
        (MemberSortKey::Completion, SortDirection::Descending) => "Most complete first",
    };

    rsx! {
        div { class: "page team-page",
            header { class: "view-header",
                h2 { class: "view-title", "{heading}" }
            }
            div { class: "view-divider" }

            match state {
                ViewState::Error(ViewError::AccessDenied) => rsx! {
                    p { class: "list-empty", "{ViewError::AccessDenied.message()}" }
                },
                state => rsx! {
                    div { class: "list-controls",
                        input {
                            class: "list-search-input",
                            r#type: "text",
                            placeholder: "Search members",
                            value: "{search}",
                            oninput: move |evt| {
                                search.set(evt.value());
                                page.set(1);
                            },
                        }
                        select {
                            class: "list-select",
                            title: "Filter by role",
                            value: "{role_value}",
                            onchange: move |evt| {
                                role.set(role_from_value(&evt.value()));
                                page.set(1);
                            },
                            option { value: "", "All roles" }
                            option { value: "individual", "Individual contributor" }
                            option { value: "team_lead", "Team lead" }
                            option { value: "hr", "HR" }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                sort.with_mut(|sort| sort.key = match sort.key {
                                    MemberSortKey::Name => MemberSortKey::Completion,
                                    MemberSortKey::Completion => MemberSortKey::Name,
                                });
                            },
                            "Sort by"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| sort.with_mut(|sort| sort.direction = sort.direction.toggled()),
                            "{sort_label}"
                        }
                    }
                    match state {
                        ViewState::Idle => rsx! {
                            p { "Idle" }
                        },
                        ViewState::Loading => rsx! {
                            p { "Loading..." }
                        },
                        ViewState::Ready(vm) => rsx! {
                            RosterTable { vm, on_page: move |next: u32| page.set(next) }
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
                },
            }
        }
    }
}

#[component]
fn RosterTable(vm: RosterPageVm, on_page: EventHandler<u32>) -> Element {
    if vm.rows.is_empty() {
        return rsx! {
            p { class: "list-empty", "No members match." }
        };
    }
    let page = vm.page;
    let total_pages = vm.total_pages;

    rsx! {
        table { class: "roster-table",
            thead {
                tr {
                    th { "Name" }
                    th { "Role" }
                    th { "Title" }
                    th { "Courses" }
                }
            }
            tbody {
                for row in vm.rows.iter() {
                    tr { key: "{row.id}",
                        td {
                            div { class: "roster-name", "{row.name}" }
                            div { class: "roster-email", "{row.email}" }
                        }
                        td { "{row.role_label}" }
                        td { "{row.job_title}" }
                        td {
                            div { class: "progress",
                                div { class: "progress-bar", style: "width: {row.percent}%;" }
                            }
                            span { "{row.progress_label} ({row.percent}%)" }
                        }
                    }
                }
            }
        }
        div { class: "list-pagination",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: page <= 1,
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "Previous"
            }
            span { "{vm.page_label()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: page >= total_pages,
                onclick: move |_| on_page.call(page + 1),
                "Next"
            }
        }
    }
}
