use dioxus::prelude::*;
use lms_core::model::UserId;
use services::{MonthLoader, MonthNav, MonthQuery, MonthView};

use crate::context::AppContext;
use crate::views::calendar::day_popover::{DayPopover, DayTrackList};
use crate::views::calendar::grid::CalendarGrid;
use crate::views::calendar::summary_panel::SummaryPanel;
use crate::vm::{
    CalendarGridVm, DayDetailVm, HoverEffect, HoverInput, HoverIntent, PopoverAnchor, day_detail,
    estimate_popover_size, map_summary_panel, member_options, place_popover,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadRequest {
    Refresh,
    Navigate(MonthNav),
    SelectUser(Option<UserId>),
}

fn detail_for(view: &MonthView, grid: &CalendarGridVm, iso_date: &str) -> Option<DayDetailVm> {
    let cell = grid.cell(iso_date).filter(|cell| cell.has_tracks())?;
    let day = view.summary.day(cell.date)?;
    Some(day_detail(day, view.today))
}

#[component]
pub fn CalendarView() -> Element {
    let ctx = use_context::<AppContext>();
    let calendar = ctx.calendar();
    let team = ctx.team();
    let session = ctx.session().clone();
    let viewport = ctx.viewport();
    let today = calendar.today();
    let can_pick_member = session.role().can_view_team_roster();

    let loader = use_signal(|| MonthLoader::new(MonthQuery::current(today)));
    let mut selected_date = use_signal(|| None::<String>);
    let hover = use_signal(HoverIntent::<String>::new);
    let mut anchor = use_signal(|| None::<PopoverAnchor<String>>);

    let request = {
        let calendar = calendar.clone();
        let session = session.clone();
        use_callback(move |request: LoadRequest| {
            let mut loader = loader;
            let ticket = {
                let mut state = loader.write();
                match request {
                    LoadRequest::Refresh => state.begin_load(),
                    LoadRequest::Navigate(nav) => state.navigate(nav),
                    LoadRequest::SelectUser(user_id) => state.select_user(user_id),
                }
            };
            let calendar = calendar.clone();
            let session = session.clone();
            spawn(async move {
                let result = calendar.load_month(&session, ticket.query()).await;
                loader.write().resolve(ticket, result);
            });
        })
    };

    use_effect(move || request.call(LoadRequest::Refresh));

    let members = use_resource(move || {
        let team = team.clone();
        let session = session.clone();
        async move {
            if !can_pick_member {
                return Vec::new();
            }
            match team.selectable_members(&session).await {
                Ok(members) => member_options(&members),
                Err(err) => {
                    tracing::warn!(%err, "member list unavailable");
                    Vec::new()
                }
            }
        }
    });

    let on_hover = use_callback(move |input: HoverInput<String>| {
        let mut hover = hover;
        let effect = hover.write().handle(input);
        if let HoverEffect::Schedule { timer, delay } = effect {
            spawn(async move {
                tokio::time::sleep(delay).await;
                hover.write().timer_fired(timer);
            });
        }
    });

    let on_anchor = use_callback(move |measured: PopoverAnchor<String>| anchor.set(Some(measured)));

    let on_select = use_callback(move |iso_date: String| {
        if selected_date.read().as_deref() == Some(iso_date.as_str()) {
            selected_date.set(None);
        } else {
            selected_date.set(Some(iso_date));
        }
    });

    let go = use_callback(move |nav: MonthNav| {
        let mut hover = hover;
        selected_date.set(None);
        hover.write().close_now();
        request.call(LoadRequest::Navigate(nav));
    });

    let state = loader.read();
    let selection = *state.selection();
    let title = selection.month.label();
    let is_loading = state.is_loading();
    let notice = state.notice().map(str::to_string);
    let showing_other = state
        .view()
        .filter(|_| !state.view_is_current())
        .map(|view| view.query.month.label());
    let grid = state.view().map(CalendarGridVm::build);
    let panel = state
        .view()
        .map(|view| map_summary_panel(&view.summary, view.today));
    // Hidden until the hovered day's own rect has been measured.
    let (popover, selected_detail) = match (state.view(), grid.as_ref()) {
        (Some(view), Some(grid)) => (
            hover.read().visible_target().and_then(|iso| {
                let rect = anchor.read().as_ref()?.rect_for(iso)?;
                Some((detail_for(view, grid, iso)?, rect))
            }),
            selected_date
                .read()
                .as_deref()
                .and_then(|iso| detail_for(view, grid, iso)),
        ),
        _ => (None, None),
    };
    drop(state);

    let popover = popover.map(|(detail, rect)| {
        let position = place_popover(rect, estimate_popover_size(detail.tracks.len()), viewport);
        (detail, position)
    });
    let member_value = selection
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let member_choices = members.read().clone().unwrap_or_default();

    rsx! {
        div { class: "page calendar-page",
            header { class: "view-header calendar-header",
                h2 { class: "view-title", "{title}" }
                div { class: "calendar-nav",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        aria_label: "Previous month",
                        onclick: move |_| go.call(MonthNav::Previous),
                        "Prev"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| go.call(MonthNav::Today(today)),
                        "Today"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        aria_label: "Next month",
                        onclick: move |_| go.call(MonthNav::Next),
                        "Next"
                    }
                }
                if can_pick_member {
                    select {
                        class: "calendar-member-select",
                        title: "Show calendar for",
                        value: "{member_value}",
                        onchange: move |evt| {
                            let user_id = evt.value().parse::<UserId>().ok();
                            let mut hover = hover;
                            selected_date.set(None);
                            hover.write().close_now();
                            request.call(LoadRequest::SelectUser(user_id));
                        },
                        for (value, label) in member_choices {
                            option { key: "{value}", value: "{value}", "{label}" }
                        }
                    }
                }
            }
            div { class: "view-divider" }

            if let Some(message) = notice {
                div { class: "calendar-notice", role: "alert",
                    span { "{message}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut loader = loader;
                            loader.write().dismiss_notice();
                        },
                        "Dismiss"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| request.call(LoadRequest::Refresh),
                        "Retry"
                    }
                }
            }
            if is_loading {
                p { class: "calendar-loading", "Loading..." }
            }
            if let Some(month) = showing_other {
                p { class: "calendar-stale", "Showing {month}" }
            }

            div { class: "calendar-layout",
                div { class: "calendar-main",
                    if let Some(grid) = grid {
                        CalendarGrid {
                            grid,
                            selected: selected_date(),
                            on_select,
                            on_hover,
                            on_anchor,
                        }
                    }
                    if let Some(detail) = selected_detail {
                        section { class: "calendar-day-detail",
                            h3 { "{detail.heading}" }
                            DayTrackList { detail }
                        }
                    }
                }
                if let Some(panel) = panel {
                    SummaryPanel { panel }
                }
            }

            if let Some((detail, position)) = popover {
                DayPopover { detail, position, on_hover }
            }
        }
    }
}
