use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lms_core::model::Session;
use lms_core::time::fixed_clock;
use remote::{InMemoryRepository, Remote};
use services::{AppServices, CalendarService, CourseService, TeamService};

use crate::context::{UiApp, build_app_context};
use crate::views::{CalendarView, CoursesView, HomeView, TeamView};

#[derive(Clone)]
struct TestApp {
    session: Session,
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn calendar(&self) -> Arc<CalendarService> {
        self.services.calendar()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn team(&self) -> Arc<TeamService> {
        self.services.team()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Calendar,
    Courses,
    Team,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Calendar => rsx! { CalendarView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Team => rsx! { TeamView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let spawned loads and resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, session: Session, repo: InMemoryRepository) -> ViewHarness {
    setup_view_harness_with_remote(view, session, Remote::from_in_memory(repo))
}

pub fn setup_view_harness_with_remote(view: ViewKind, session: Session, remote: Remote) -> ViewHarness {
    let app = Arc::new(TestApp {
        session,
        services: AppServices::new(&remote, fixed_clock()),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
