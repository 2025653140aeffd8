use std::collections::BTreeMap;

use course_core::catalog::ListeningPassage;
use course_core::evaluator::ExerciseResponse;
use dioxus::prelude::*;

use super::SubmitButton;

#[component]
pub fn ListeningPanel(
    passages: Vec<ListeningPassage>,
    on_submit: EventHandler<ExerciseResponse>,
) -> Element {
    let mut selections = use_signal(BTreeMap::<(usize, usize), usize>::new);
    let question_count: usize = passages.iter().map(|p| p.questions.len()).sum();
    let answered = selections.read().len() == question_count;

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions",
                "Read each passage aloud or open the transcript, then answer the questions."
            }
            for (p_index, passage) in passages.iter().enumerate() {
                div { key: "{p_index}", class: "listening-passage",
                    h4 { "{passage.title}" }
                    p { class: "listening-description", "{passage.description}" }
                    details { class: "listening-transcript",
                        summary { "Show transcript" }
                        p { "{passage.transcript}" }
                    }
                    for (q_index, question) in passage.questions.iter().enumerate() {
                        div { key: "{q_index}", class: "choice-question",
                            p { class: "choice-prompt", "{question.question}" }
                            div { class: "choice-options",
                                for (o_index, option) in question.options.iter().enumerate() {
                                    button {
                                        key: "{o_index}",
                                        class: if selections.read().get(&(p_index, q_index)) == Some(&o_index) {
                                            "choice-option choice-option--selected"
                                        } else {
                                            "choice-option"
                                        },
                                        r#type: "button",
                                        onclick: move |_| {
                                            selections.write().insert((p_index, q_index), o_index);
                                        },
                                        "{option}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
            SubmitButton {
                label: "Submit Answers",
                enabled: answered,
                onclick: move |_| on_submit.call(ExerciseResponse::Listening(selections())),
            }
        }
    }
}
