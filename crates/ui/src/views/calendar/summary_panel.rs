use dioxus::prelude::*;

use crate::vm::{BreakdownListVm, SummaryPanelVm};

#[component]
pub fn SummaryPanel(panel: SummaryPanelVm) -> Element {
    rsx! {
        aside { class: "summary-panel",
            h3 { "{panel.month_label}" }
            dl { class: "summary-counts",
                dt { "Total" }
                dd { "{panel.total_tracks}" }
                dt { "Completed" }
                dd { "{panel.completed_tracks}" }
                dt { "In progress" }
                dd { "{panel.in_progress_tracks}" }
                dt { "Not started" }
                dd { "{panel.not_started_tracks}" }
            }
            p { class: "summary-rate", "Track completion: {panel.track_rate}%" }
            p { class: "summary-rate",
                "Course completion: {panel.course_rate}% ({panel.completed_courses}/{panel.total_courses})"
            }

            BreakdownSection { title: "Categories", list: panel.categories.clone() }
            BreakdownSection { title: "Platforms", list: panel.platforms.clone() }

            section { class: "summary-upcoming",
                h4 { "Upcoming deadlines" }
                if panel.upcoming.is_empty() {
                    p { class: "muted", "No upcoming deadlines." }
                } else {
                    ul {
                        for item in panel.upcoming.iter() {
                            li {
                                key: "{item.id}",
                                class: item.class_name(),
                                span { class: "upcoming-title", "{item.title}" }
                                span { class: "upcoming-due", "{item.due_label}" }
                                span { class: "upcoming-relative", "{item.relative_label}" }
                                if item.is_overdue {
                                    span { class: "pill pill--danger", "Overdue" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BreakdownSection(title: &'static str, list: BreakdownListVm) -> Element {
    let mut expanded = use_signal(|| false);
    let is_expanded = expanded();
    let rows = list.visible(is_expanded).to_vec();

    rsx! {
        section { class: "summary-breakdown",
            h4 { "{title}" }
            if rows.is_empty() {
                p { class: "muted", "None this month." }
            }
            ul {
                for row in rows {
                    li { key: "{row.name}",
                        span { class: "breakdown-name", "{row.name}" }
                        span { class: "breakdown-count", "{row.completed_tracks}/{row.total_tracks}" }
                        span { class: "breakdown-rate", "{row.percent}%" }
                    }
                }
            }
            if list.can_expand() {
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| expanded.set(!is_expanded),
                    if is_expanded { "Show top 3" } else { "Show all" }
                }
            }
        }
    }
}
