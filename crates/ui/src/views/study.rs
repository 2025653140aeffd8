use course_core::LevelId;
use course_core::catalog::SectionContent;
use course_core::model::StudySection;
use course_core::progression::StudyOutcome;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudyVm, map_study};

#[derive(Clone, Debug, PartialEq)]
struct StudyData {
    level: LevelId,
    title: String,
    vm: StudyVm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MarkState {
    Idle,
    Saving,
    JustCompleted,
    Error(ViewError),
}

#[component]
pub fn StudyView(level: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let catalog = ctx.catalog();
    let parsed = level.parse::<LevelId>().ok();
    let mut active = use_signal(|| StudySection::Vocabulary);
    let mut mark_state = use_signal(|| MarkState::Idle);

    let resource = use_resource({
        let progress = progress.clone();
        let catalog = catalog.clone();
        move || {
            let progress = progress.clone();
            let catalog = catalog.clone();
            async move {
                let level = parsed.ok_or(ViewError::UnknownLevel)?;
                let checklist = progress.open_study(level).await.map_err(ViewError::from)?;
                let required = catalog.study_sections(level);
                Ok::<_, ViewError>(StudyData {
                    level,
                    title: catalog.level_title(level).to_owned(),
                    vm: map_study(&required, &checklist),
                })
            }
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page study-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Levels {}, "Back to Levels" }
                },
                ViewState::Ready(data) => {
                    let level = data.level;
                    let section = active();
                    let section_done = data.vm.is_completed(section);
                    let content = catalog
                        .section(level, section)
                        .map(render_section)
                        .unwrap_or_else(|| rsx! {
                            p { "No notes for this section." }
                        });
                    let progress = progress.clone();
                    rsx! {
                        header { class: "view-header",
                            h2 { class: "view-title", "{level} Study Notes" }
                            p { class: "view-subtitle", "{data.title}" }
                            p { class: "study-progress", "{data.vm.progress_label}" }
                        }
                        div { class: "tabs",
                            for tab in data.vm.tabs.iter().copied() {
                                button {
                                    key: "{tab.section}",
                                    class: if tab.section == section { "tab tab--active" } else { "tab" },
                                    r#type: "button",
                                    onclick: move |_| {
                                        active.set(tab.section);
                                        mark_state.set(MarkState::Idle);
                                    },
                                    "{tab.label}"
                                    if tab.completed {
                                        span { class: "tab-check", " ✓" }
                                    }
                                }
                            }
                        }
                        div { class: "study-section", {content} }
                        div { class: "study-actions",
                            if section_done {
                                span { class: "badge badge-study", "✓ Section completed" }
                            } else {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: mark_state() == MarkState::Saving,
                                    onclick: move |_| {
                                        let progress = progress.clone();
                                        mark_state.set(MarkState::Saving);
                                        spawn(async move {
                                            match progress.complete_study_section(level, section).await {
                                                Ok(recorded) => {
                                                    let next = if recorded.outcome == StudyOutcome::StudyCompleted {
                                                        MarkState::JustCompleted
                                                    } else {
                                                        MarkState::Idle
                                                    };
                                                    mark_state.set(next);
                                                    let mut resource = resource;
                                                    resource.restart();
                                                }
                                                Err(err) => mark_state.set(MarkState::Error(ViewError::from(err))),
                                            }
                                        });
                                    },
                                    "Mark Section as Completed"
                                }
                            }
                            if data.vm.all_completed {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    onclick: move |_| {
                                        let _ = navigator.push(Route::Exercise {
                                            level: level.to_string(),
                                        });
                                    },
                                    "Proceed to Exercises"
                                }
                            }
                        }
                        match mark_state() {
                            MarkState::JustCompleted => rsx! {
                                p { class: "notice",
                                    "All study notes completed! You can now proceed to the exercises."
                                }
                            },
                            MarkState::Error(err) => rsx! {
                                p { class: "error", "{err.message()}" }
                            },
                            MarkState::Idle | MarkState::Saving => rsx! {},
                        }
                    }
                }
            }
        }
    }
}

fn render_section(content: SectionContent<'_>) -> Element {
    match content {
        SectionContent::Vocabulary(vocabulary) => rsx! {
            h3 { "{vocabulary.title}" }
            for category in vocabulary.categories.iter() {
                div { class: "vocab-category",
                    h4 { "{category.category}" }
                    table { class: "vocab-table",
                        tr {
                            th { "German" }
                            th { "English" }
                            th { "Pronunciation" }
                            th { "Example" }
                        }
                        for word in category.words.iter() {
                            tr {
                                td { class: "vocab-german", "{word.german}" }
                                td { "{word.english}" }
                                td { class: "vocab-pronunciation", "{word.pronunciation}" }
                                td { class: "vocab-example", "{word.example}" }
                            }
                        }
                    }
                }
            }
        },
        SectionContent::Grammar(grammar) => rsx! {
            h3 { "{grammar.title}" }
            for topic in grammar.topics.iter() {
                div { class: "note-card",
                    h4 { "{topic.topic}" }
                    p { "{topic.explanation}" }
                    if !topic.rules.is_empty() {
                        ul { class: "note-rules",
                            for rule in topic.rules.iter() {
                                li { "{rule}" }
                            }
                        }
                    }
                    if !topic.examples.is_empty() {
                        ul { class: "note-examples",
                            for example in topic.examples.iter() {
                                li { "{example}" }
                            }
                        }
                    }
                }
            }
        },
        SectionContent::Culture(culture) => rsx! {
            h3 { "{culture.title}" }
            for topic in culture.topics.iter() {
                div { class: "note-card",
                    h4 { "{topic.topic}" }
                    p { "{topic.description}" }
                    ul {
                        for point in topic.points.iter() {
                            li { "{point}" }
                        }
                    }
                }
            }
        },
        SectionContent::Reading(reading) => rsx! {
            h3 { "{reading.title}" }
            for text in reading.texts.iter() {
                div { class: "note-card",
                    h4 { "{text.title}" }
                    for paragraph in text.paragraphs() {
                        p { "{paragraph}" }
                    }
                    for question in text.questions.iter() {
                        details { class: "reading-question",
                            summary { "{question.question}" }
                            p { "{question.answer}" }
                        }
                    }
                }
            }
        },
        SectionContent::Practice(practice) => rsx! {
            h3 { "{practice.title}" }
            for drill in practice.drills.iter() {
                div { class: "note-card",
                    h4 { "{drill.kind}" }
                    p { "{drill.instructions}" }
                    for pair in drill.questions.iter() {
                        details { class: "practice-pair",
                            summary { "{pair.english}" }
                            p { "{pair.german}" }
                        }
                    }
                }
            }
        },
    }
}
