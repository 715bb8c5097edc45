use dioxus::prelude::*;
use dioxus_router::Link;
use services::MonthQuery;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SummaryPanelVm, map_summary_panel};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let calendar = ctx.calendar();
    let session = ctx.session().clone();
    let name = session.display_name().to_string();
    let role = session.role().label();

    let resource = use_resource(move || {
        let calendar = calendar.clone();
        let session = session.clone();
        async move {
            let today = calendar.today();
            let view = calendar
                .load_month(&session, &MonthQuery::current(today))
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_summary_panel(&view.summary, today))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Welcome back, {name}" }
                p { class: "view-subtitle", "{role}" }
            }
            div { class: "view-divider" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(panel) => rsx! {
                    MonthSnapshot { panel }
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
fn MonthSnapshot(panel: SummaryPanelVm) -> Element {
    let overdue = panel.upcoming.iter().filter(|u| u.is_overdue).count();
    let next = panel.upcoming.iter().find(|u| !u.is_overdue).cloned();

    rsx! {
        section { class: "home-snapshot",
            h3 { "{panel.month_label}" }
            if panel.is_empty() {
                p { "Nothing is due this month." }
            } else {
                p { "Tracks due this month: {panel.total_tracks}" }
                p { "Track completion: {panel.track_rate}%" }
                if overdue > 0 {
                    p { class: "home-overdue", "Overdue: {overdue}" }
                }
                if let Some(next) = next {
                    p { "Next deadline: {next.title} ({next.relative_label})" }
                }
            }
            div { class: "home-links",
                Link { class: "btn btn-primary", to: Route::Calendar {}, "Open calendar" }
                Link { class: "btn btn-secondary", to: Route::Courses {}, "My courses" }
            }
        }
    }
}
