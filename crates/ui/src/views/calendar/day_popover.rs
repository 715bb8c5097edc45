use dioxus::prelude::*;

use crate::vm::{DayDetailVm, HoverInput, Point};

#[component]
pub fn DayPopover(
    detail: DayDetailVm,
    position: Point,
    on_hover: EventHandler<HoverInput<String>>,
) -> Element {
    rsx! {
        div {
            class: "day-popover",
            role: "dialog",
            style: "left: {position.x}px; top: {position.y}px;",
            onmouseenter: move |_| on_hover.call(HoverInput::EnterPopover),
            onmouseleave: move |_| on_hover.call(HoverInput::LeavePopover),
            h4 { class: "day-popover-title", "{detail.heading}" }
            DayTrackList { detail }
        }
    }
}

#[component]
pub fn DayTrackList(detail: DayDetailVm) -> Element {
    rsx! {
        ul { class: "day-track-list",
            for track in detail.tracks {
                li {
                    key: "{track.id}",
                    class: track.class_name(),
                    div { class: "day-track-head",
                        span { class: "day-track-title", "{track.title}" }
                        if track.is_overdue {
                            span { class: "pill pill--danger", "Overdue" }
                        }
                    }
                    div { class: "day-track-meta",
                        "{track.category} · {track.platform} · {track.status_label}"
                    }
                    div { class: "progress",
                        div { class: "progress-bar", style: "width: {track.percent}%;" }
                    }
                    div { class: "day-track-progress", "{track.progress_label} ({track.percent}%)" }
                }
            }
        }
    }
}
