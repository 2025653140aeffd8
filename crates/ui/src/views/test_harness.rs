use std::sync::Arc;

use course_core::Catalog;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, MockIdentityProvider, ProgressService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{AuthView, DashboardView, ExerciseView, LevelsView, StudyView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn app_name(&self) -> &str {
        "Deutsch Lernen"
    }

    fn catalog(&self) -> Arc<Catalog> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Auth,
    Dashboard,
    Levels,
    Study(&'static str),
    Exercise(&'static str),
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

impl Eq for ViewHarnessProps {}

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
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Levels => rsx! { LevelsView {} },
        ViewKind::Study(level) => rsx! { StudyView { level: level.to_string() } },
        ViewKind::Exercise(level) => rsx! { ExerciseView { level: level.to_string() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub progress: Arc<ProgressService>,
}

impl ViewHarness {
    /// Render once and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
        for _ in 0..3 {
            self.drive_async().await;
        }
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Builds the harness over fresh in-memory storage. The DOM is not rendered
/// until `settle`, so tests can seed progress through `progress` first.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(&storage, Arc::new(MockIdentityProvider))
        .expect("embedded catalog");
    let progress = services.progress();
    let app = Arc::new(TestApp { services });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        storage,
        progress,
    }
}
