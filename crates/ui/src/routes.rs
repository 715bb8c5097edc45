use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{CalendarView, CoursesView, HomeView, TeamView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/calendar", CalendarView)] Calendar {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/team", TeamView)] Team {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    let show_team = session.role().can_view_team_roster();
    let name = session.display_name().to_string();
    let role = session.role().label();

    rsx! {
        nav { class: "sidebar",
            h1 { "Training" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Calendar {}, "Calendar" } }
                li { Link { to: Route::Courses {}, "Courses" } }
                if show_team {
                    li { Link { to: Route::Team {}, "Team" } }
                }
            }
            div { class: "sidebar-user",
                span { class: "sidebar-user-name", "{name}" }
                span { class: "sidebar-user-role", "{role}" }
            }
        }
    }
}
