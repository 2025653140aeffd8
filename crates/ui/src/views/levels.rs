use course_core::LevelId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::ProgressService;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LevelCardVm, TierGroupVm, map_tier_groups};

/// Ask the service where `level` leads. A locked level is refused and the
/// caller stays where it is.
pub(crate) async fn open_level(
    progress: &ProgressService,
    level: LevelId,
) -> Result<Route, ViewError> {
    progress
        .select_level(level)
        .await
        .map(Route::from)
        .map_err(ViewError::from)
}

#[component]
pub fn LevelsView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let catalog = ctx.catalog();
    let denied = use_signal(|| None::<(LevelId, ViewError)>);

    let resource = use_resource(move || {
        let progress = progress.clone();
        let catalog = catalog.clone();
        async move {
            let current = progress.progress().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_tier_groups(&current, &catalog))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page levels-page",
            header { class: "view-header",
                h2 { class: "view-title", "German Levels" }
                p { class: "view-subtitle",
                    "Work through each level in order. Study the notes, then complete the exercises."
                }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(groups) => rsx! {
                    for group in groups {
                        TierSection { key: "{group.tier}", group, denied }
                    }
                },
            }
        }
    }
}

#[component]
fn TierSection(group: TierGroupVm, denied: Signal<Option<(LevelId, ViewError)>>) -> Element {
    rsx! {
        section { class: "tier-section",
            h3 { class: "tier-heading", "{group.heading}" }
            p { class: "tier-description", "{group.description}" }
            div { class: "level-grid",
                for card in group.cards {
                    LevelCardView { key: "{card.id_label}", card, denied }
                }
            }
        }
    }
}

#[component]
fn LevelCardView(card: LevelCardVm, denied: Signal<Option<(LevelId, ViewError)>>) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let level = card.level;
    let refusal = denied()
        .filter(|(denied_level, _)| *denied_level == level)
        .map(|(_, err)| err.message());

    rsx! {
        div { class: "level-card {card.state_class}",
            div { class: "level-card-header",
                span { class: "level-card-id", "{card.id_label}" }
                span { class: "level-card-status", "{card.status_label}" }
            }
            p { class: "level-card-title", "{card.title}" }
            if card.show_study_badge {
                span { class: "badge badge-study", "✓ Study Notes Complete" }
            }
            if let Some(score) = card.score_label.as_ref() {
                span { class: "badge badge-score", "{score}" }
            }
            button {
                class: "btn btn-primary level-card-action",
                r#type: "button",
                disabled: !card.is_unlocked,
                onclick: move |_| {
                    let progress = ctx.progress();
                    let mut denied = denied;
                    spawn(async move {
                        match open_level(&progress, level).await {
                            Ok(route) => {
                                denied.set(None);
                                let _ = navigator.push(route);
                            }
                            Err(err) => denied.set(Some((level, err))),
                        }
                    });
                },
                "{card.action_label}"
            }
            if let Some(message) = refusal {
                p { class: "error", "{message}" }
            }
        }
    }
}
