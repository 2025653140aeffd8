use course_core::catalog::ChoiceQuestion;
use course_core::evaluator::ExerciseResponse;
use course_core::model::ExerciseKind;
use dioxus::prelude::*;

use super::SubmitButton;

/// Multiple-choice questions; serves both sentence completion and the
/// cultural quiz.
#[component]
pub fn ChoicePanel(
    kind: ExerciseKind,
    instructions: &'static str,
    questions: Vec<ChoiceQuestion>,
    on_submit: EventHandler<ExerciseResponse>,
) -> Element {
    let count = questions.len();
    let mut selections = use_signal(|| vec![None::<usize>; count]);
    let mut checked = use_signal(|| false);
    let answered = selections.read().iter().all(Option::is_some);

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions", "{instructions}" }
            for (q_index, question) in questions.iter().enumerate() {
                div { key: "{q_index}", class: "choice-question",
                    p { class: "choice-prompt", "{question.question}" }
                    div { class: "choice-options",
                        for (o_index, option) in question.options.iter().enumerate() {
                            button {
                                key: "{o_index}",
                                class: option_class(
                                    selections.read().get(q_index).copied().flatten() == Some(o_index),
                                    checked().then_some(o_index == question.correct),
                                ),
                                r#type: "button",
                                onclick: move |_| {
                                    if let Some(slot) = selections.write().get_mut(q_index) {
                                        *slot = Some(o_index);
                                    }
                                    checked.set(false);
                                },
                                "{option}"
                            }
                        }
                    }
                    if checked() {
                        if let Some(explanation) = question.explanation.as_ref() {
                            p { class: "choice-explanation", "{explanation}" }
                        }
                    }
                }
            }
            SubmitButton {
                label: "Submit Answers",
                enabled: answered,
                onclick: move |_| {
                    checked.set(true);
                    let picks = selections();
                    let response = if kind == ExerciseKind::CulturalQuiz {
                        ExerciseResponse::CulturalQuiz(picks)
                    } else {
                        ExerciseResponse::CompleteSentences(picks)
                    };
                    on_submit.call(response);
                },
            }
        }
    }
}

/// `correct` is only known once the answers have been checked.
fn option_class(selected: bool, correct: Option<bool>) -> &'static str {
    match (selected, correct) {
        (_, Some(true)) => "choice-option choice-option--correct",
        (true, Some(false)) => "choice-option choice-option--wrong",
        (true, None) => "choice-option choice-option--selected",
        (false, _) => "choice-option",
    }
}
