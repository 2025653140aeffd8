use course_core::catalog::FillBlanksSet;
use course_core::evaluator::ExerciseResponse;
use dioxus::prelude::*;

use super::SubmitButton;

#[component]
pub fn FillBlanksPanel(set: FillBlanksSet, on_submit: EventHandler<ExerciseResponse>) -> Element {
    let gaps = set.blanks.len();
    let mut answers = use_signal(|| vec![String::new(); gaps]);
    let fragments = set
        .fragments()
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    let filled = answers.read().iter().all(|answer| !answer.trim().is_empty());

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions", "Fill in the blanks with the correct words." }
            p { class: "fill-text",
                for (index, fragment) in fragments.into_iter().enumerate() {
                    span { key: "{index}", class: "fill-segment",
                        "{fragment}"
                        if index < gaps {
                            input {
                                class: "fill-input",
                                r#type: "text",
                                value: answers.read().get(index).cloned().unwrap_or_default(),
                                oninput: move |evt| {
                                    if let Some(slot) = answers.write().get_mut(index) {
                                        *slot = evt.value();
                                    }
                                },
                            }
                        }
                    }
                }
            }
            p { class: "exercise-translation", "{set.translation}" }
            SubmitButton {
                label: "Check Answers",
                enabled: filled,
                onclick: move |_| on_submit.call(ExerciseResponse::FillBlanks(answers())),
            }
        }
    }
}
