mod choice;
mod fill_blanks;
mod flashcards;
mod listening;
mod matching;
mod writing;

use course_core::LevelId;
use course_core::evaluator::{ExerciseResponse, ExerciseSet};
use course_core::model::ExerciseKind;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{EvaluationVm, ExerciseBoardVm, map_evaluation, map_exercise_board};

use choice::ChoicePanel;
use fill_blanks::FillBlanksPanel;
use flashcards::FlashcardsPanel;
use listening::ListeningPanel;
use matching::MatchingPanel;
use writing::WritingPanel;

#[derive(Clone, Debug, PartialEq)]
struct ExerciseData {
    level: LevelId,
    title: String,
    board: ExerciseBoardVm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Saving,
    Error(ViewError),
}

#[component]
pub fn ExerciseView(level: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let catalog = ctx.catalog();
    let parsed = level.parse::<LevelId>().ok();
    let mut active = use_signal(|| ExerciseKind::FillBlanks);
    let mut result = use_signal(|| None::<EvaluationVm>);
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let resource = use_resource({
        let progress = progress.clone();
        let catalog = catalog.clone();
        move || {
            let progress = progress.clone();
            let catalog = catalog.clone();
            async move {
                let level = parsed.ok_or(ViewError::UnknownLevel)?;
                let scorecard = progress
                    .open_exercise(level)
                    .await
                    .map_err(ViewError::from)?;
                let required = catalog.exercise_kinds(level);
                Ok::<_, ViewError>(ExerciseData {
                    level,
                    title: catalog.level_title(level).to_owned(),
                    board: map_exercise_board(&required, &scorecard),
                })
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let on_submit = {
        let progress = progress.clone();
        move |response: ExerciseResponse| {
            let Some(level) = parsed else {
                return;
            };
            let progress = progress.clone();
            submit_state.set(SubmitState::Saving);
            spawn(async move {
                match progress.submit_exercise(level, &response).await {
                    Ok(recorded) => {
                        result.set(recorded.evaluation.as_ref().map(map_evaluation));
                        submit_state.set(SubmitState::Idle);
                        let mut resource = resource;
                        resource.restart();
                    }
                    Err(err) => {
                        tracing::warn!(%level, error = %err, "exercise submission failed");
                        submit_state.set(SubmitState::Error(ViewError::from(err)));
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "page exercise-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    if err == ViewError::StudyIncomplete {
                        Link {
                            class: "btn btn-primary",
                            to: Route::Study { level: level.clone() },
                            "Go to Study Notes"
                        }
                    }
                    Link { class: "btn btn-secondary", to: Route::Levels {}, "Back to Levels" }
                },
                ViewState::Ready(data) => {
                    let level = data.level;
                    let kind = active();
                    let panel = render_panel(catalog.exercise_set(level, kind), on_submit.clone());
                    let progress = progress.clone();
                    rsx! {
                        header { class: "view-header",
                            h2 { class: "view-title", "{level} Exercises" }
                            p { class: "view-subtitle", "{data.title}" }
                        }
                        div { class: "exercise-summary",
                            span { class: "exercise-stat", "{data.board.completed_label}" }
                            span { class: "exercise-stat", "{data.board.average_label}" }
                            span { class: "exercise-stat", "{data.board.total_points_label}" }
                        }
                        div { class: "tabs",
                            for tab in data.board.tabs.iter().cloned() {
                                button {
                                    key: "{tab.kind}",
                                    class: if tab.kind == kind { "tab tab--active" } else { "tab" },
                                    r#type: "button",
                                    onclick: move |_| {
                                        active.set(tab.kind);
                                        result.set(None);
                                        submit_state.set(SubmitState::Idle);
                                    },
                                    "{tab.label}"
                                    if let Some(score) = tab.score_label.as_ref() {
                                        span { class: "badge badge-done", "✓ {score}" }
                                    }
                                }
                            }
                        }
                        if let Some(vm) = result() {
                            div { class: if vm.passed { "result result--passed" } else { "result result--failed" },
                                strong { "{vm.headline}" }
                                p { "{vm.detail}" }
                            }
                        }
                        if let SubmitState::Error(err) = submit_state() {
                            p { class: "error", "{err.message()}" }
                        }
                        // keyed so each panel starts fresh when the tab changes
                        for panel_kind in std::iter::once(kind) {
                            div { key: "{panel_kind}", class: "exercise-body", {panel.clone()} }
                        }
                        if data.board.can_complete {
                            div { class: "exercise-complete",
                                p { "All exercises completed! {data.board.average_label}" }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: submit_state() == SubmitState::Saving,
                                    onclick: move |_| {
                                        let progress = progress.clone();
                                        submit_state.set(SubmitState::Saving);
                                        spawn(async move {
                                            match progress.advance_level(level).await {
                                                Ok(_) => {
                                                    submit_state.set(SubmitState::Idle);
                                                    let _ = navigator.push(Route::Levels {});
                                                }
                                                Err(err) => {
                                                    submit_state.set(SubmitState::Error(ViewError::from(err)));
                                                }
                                            }
                                        });
                                    },
                                    "Complete Level & Continue"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_panel(
    set: Option<ExerciseSet<'_>>,
    on_submit: impl FnMut(ExerciseResponse) + 'static,
) -> Element {
    let on_submit = EventHandler::new(on_submit);
    match set {
        Some(ExerciseSet::FillBlanks(set)) => rsx! {
            FillBlanksPanel { set: set.clone(), on_submit }
        },
        Some(ExerciseSet::MatchFollowing(set)) => rsx! {
            MatchingPanel { set: set.clone(), on_submit }
        },
        Some(ExerciseSet::CompleteSentences(questions)) => rsx! {
            ChoicePanel {
                kind: ExerciseKind::CompleteSentences,
                instructions: "Choose the word that completes each sentence.",
                questions: questions.to_vec(),
                on_submit,
            }
        },
        Some(ExerciseSet::Flashcards(cards)) => rsx! {
            FlashcardsPanel { cards: cards.to_vec(), on_submit }
        },
        Some(ExerciseSet::Writing(prompts)) => rsx! {
            WritingPanel { prompts: prompts.to_vec(), on_submit }
        },
        Some(ExerciseSet::Listening(passages)) => rsx! {
            ListeningPanel { passages: passages.to_vec(), on_submit }
        },
        Some(ExerciseSet::CulturalQuiz(questions)) => rsx! {
            ChoicePanel {
                kind: ExerciseKind::CulturalQuiz,
                instructions: "Test what you learned about German culture.",
                questions: questions.to_vec(),
                on_submit,
            }
        },
        None => rsx! {
            p { "No exercise content for this level." }
        },
    }
}

/// Shared footer with the submit button.
#[component]
fn SubmitButton(label: &'static str, enabled: bool, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "exercise-footer",
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !enabled,
                onclick: move |evt| onclick.call(evt),
                "{label}"
            }
        }
    }
}
