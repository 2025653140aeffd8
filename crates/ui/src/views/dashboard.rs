use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::levels::open_level;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let mut denied = use_signal(|| None::<ViewError>);

    let resource = use_resource({
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move {
                let session = progress
                    .current_session()
                    .await
                    .map_err(ViewError::from)?
                    .ok_or(ViewError::NotSignedIn)?;
                Ok::<_, ViewError>(map_dashboard(session.user.first_name(), &session.progress))
            }
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Auth {}, "Go to sign in" }
                },
                ViewState::Ready(vm) => {
                    let level = vm.continue_level;
                    let progress = progress.clone();
                    rsx! {
                        header { class: "view-header",
                            h2 { class: "view-title", "{vm.greeting}" }
                            p { class: "view-subtitle", "Keep going, you are making great progress." }
                        }
                        StatGrid { vm: vm.clone() }
                        div { class: "dashboard-actions",
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    let progress = progress.clone();
                                    spawn(async move {
                                        match open_level(&progress, level).await {
                                            Ok(route) => {
                                                denied.set(None);
                                                let _ = navigator.push(route);
                                            }
                                            Err(err) => denied.set(Some(err)),
                                        }
                                    });
                                },
                                "Continue Learning"
                            }
                            Link { class: "btn btn-secondary", to: Route::Levels {}, "View All Levels" }
                        }
                        if let Some(err) = denied() {
                            p { class: "error", "{err.message()}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatGrid(vm: DashboardVm) -> Element {
    rsx! {
        div { class: "stat-grid",
            div { class: "stat-card",
                span { class: "stat-label", "Levels Completed" }
                span { class: "stat-value", "{vm.completed_label}" }
                span { class: "stat-hint", "{vm.completion_label}" }
            }
            div { class: "stat-card",
                span { class: "stat-label", "Study Notes" }
                span { class: "stat-value", "{vm.study_label}" }
                span { class: "stat-hint", "{vm.study_percent_label}" }
            }
            div { class: "stat-card",
                span { class: "stat-label", "Current Level" }
                span { class: "stat-value", "{vm.current_level_label}" }
                span { class: "stat-hint", "{vm.current_tier_label}" }
            }
        }
        div { class: "progress-bar",
            div {
                class: "progress-bar-fill",
                style: "width: {vm.completion_percent}%",
            }
        }
    }
}
