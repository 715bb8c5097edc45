use std::rc::Rc;

use dioxus::prelude::*;

use crate::vm::{CalendarGridVm, DayCellVm, HoverInput, PopoverAnchor, Rect};

#[component]
pub fn CalendarGrid(
    grid: CalendarGridVm,
    selected: Option<String>,
    on_select: EventHandler<String>,
    on_hover: EventHandler<HoverInput<String>>,
    on_anchor: EventHandler<PopoverAnchor<String>>,
) -> Element {
    rsx! {
        div { class: "calendar-grid", role: "grid",
            div { class: "calendar-weekdays", role: "row",
                for label in grid.weekday_labels {
                    div { class: "calendar-weekday", role: "columnheader", "{label}" }
                }
            }
            for (index, week) in grid.weeks.iter().enumerate() {
                div { key: "{index}", class: "calendar-week", role: "row",
                    for cell in week.iter().cloned() {
                        DayCell {
                            key: "{cell.iso_date}",
                            is_selected: selected.as_deref() == Some(cell.iso_date.as_str()),
                            cell,
                            on_select,
                            on_hover,
                            on_anchor,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DayCell(
    cell: DayCellVm,
    is_selected: bool,
    on_select: EventHandler<String>,
    on_hover: EventHandler<HoverInput<String>>,
    on_anchor: EventHandler<PopoverAnchor<String>>,
) -> Element {
    let mut mounted = use_signal(|| None::<Rc<MountedData>>);
    let mut class = cell.class_name();
    if is_selected {
        class.push_str(" day-cell--selected");
    }
    let iso_for_hover = cell.iso_date.clone();
    let has_tracks = cell.has_tracks();
    let cell_for_click = cell.clone();

    rsx! {
        div {
            class: "{class}",
            role: "gridcell",
            "data-date": "{cell.iso_date}",
            aria_disabled: !cell.is_current_month,
            onmounted: move |evt: MountedEvent| mounted.set(Some(evt.data())),
            onclick: move |_| {
                if let Some(iso) = CalendarGridVm::select(&cell_for_click) {
                    on_select.call(iso);
                }
            },
            onmouseenter: move |_| {
                on_hover.call(HoverInput::EnterTrigger {
                    target: iso_for_hover.clone(),
                    has_content: has_tracks,
                });
                if !has_tracks {
                    return;
                }
                if let Some(element) = mounted() {
                    let target = iso_for_hover.clone();
                    spawn(async move {
                        if let Ok(rect) = element.get_client_rect().await {
                            let rect = Rect::new(
                                rect.origin.x,
                                rect.origin.y,
                                rect.size.width,
                                rect.size.height,
                            );
                            on_anchor.call(PopoverAnchor::new(target, rect));
                        }
                    });
                }
            },
            onmouseleave: move |_| on_hover.call(HoverInput::LeaveTrigger),

            span { class: "day-number", "{cell.day}" }
            if cell.has_tracks() {
                span { class: "day-badge", title: "Tracks due", "{cell.track_count}" }
                if cell.course_count > 0 {
                    span { class: "day-badge day-badge--courses", title: "Courses", "{cell.course_count}" }
                }
                div { class: "day-indicators",
                    for indicator in cell.indicators.iter() {
                        span {
                            class: "day-indicator tone-{indicator.tone}",
                            title: "{indicator.name}",
                        }
                    }
                    if cell.hidden_categories > 0 {
                        span { class: "day-indicator-more", "+{cell.hidden_categories}" }
                    }
                }
            }
        }
    }
}
