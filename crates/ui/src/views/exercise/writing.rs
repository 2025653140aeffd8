use course_core::catalog::WritingPrompt;
use course_core::evaluator::ExerciseResponse;
use dioxus::prelude::*;

use super::SubmitButton;

#[component]
pub fn WritingPanel(prompts: Vec<WritingPrompt>, on_submit: EventHandler<ExerciseResponse>) -> Element {
    let count = prompts.len();
    let mut answers = use_signal(|| vec![String::new(); count]);
    let started = answers.read().iter().any(|answer| !answer.trim().is_empty());
    let count_labels = prompts
        .iter()
        .zip(answers.read().iter())
        .map(|(prompt, answer)| {
            let [min, max] = prompt.word_count;
            format!("{} words (suggested {min}–{max})", word_count(answer))
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions", "Write a short answer in German for each prompt." }
            for ((index, prompt), count_label) in prompts.iter().enumerate().zip(count_labels) {
                div { key: "{index}", class: "writing-prompt",
                    p { class: "writing-question", "{prompt.prompt}" }
                    if !prompt.hints.is_empty() {
                        ul { class: "writing-hints",
                            for hint in prompt.hints.iter() {
                                li { "{hint}" }
                            }
                        }
                    }
                    textarea {
                        class: "writing-input",
                        rows: "5",
                        value: answers.read().get(index).cloned().unwrap_or_default(),
                        oninput: move |evt| {
                            if let Some(slot) = answers.write().get_mut(index) {
                                *slot = evt.value();
                            }
                        },
                    }
                    p { class: "writing-count", "{count_label}" }
                    details { class: "writing-sample",
                        summary { "Show sample answer" }
                        p { "{prompt.sample_answer}" }
                    }
                }
            }
            SubmitButton {
                label: "Submit Writing",
                enabled: started,
                onclick: move |_| on_submit.call(ExerciseResponse::Writing(answers())),
            }
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
