use course_core::catalog::MatchSet;
use course_core::evaluator::{ExerciseResponse, MatchBoard};
use dioxus::prelude::*;

use super::SubmitButton;

#[component]
pub fn MatchingPanel(set: MatchSet, on_submit: EventHandler<ExerciseResponse>) -> Element {
    let mut board = use_signal(MatchBoard::new);
    let mut selected = use_signal(|| None::<usize>);
    let pairs = board
        .read()
        .pairs()
        .filter_map(|(left, right)| {
            Some(format!("{} ↔ {}", set.left.get(left)?, set.right.get(right)?))
        })
        .collect::<Vec<_>>();
    let complete = board.read().len() == set.left.len();

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions",
                "Select a German word, then the English meaning that belongs to it."
            }
            div { class: "match-columns",
                div { class: "match-column",
                    for (index, item) in set.left.iter().enumerate() {
                        button {
                            key: "{index}",
                            class: match (selected() == Some(index), board.read().right_for(index).is_some()) {
                                (true, _) => "match-item match-item--selected",
                                (false, true) => "match-item match-item--paired",
                                (false, false) => "match-item",
                            },
                            r#type: "button",
                            onclick: move |_| {
                                board.write().unpair(index);
                                selected.set(Some(index));
                            },
                            "{item}"
                        }
                    }
                }
                div { class: "match-column",
                    for (index, item) in set.right.iter().enumerate() {
                        button {
                            key: "{index}",
                            class: if board.read().left_for(index).is_some() { "match-item match-item--paired" } else { "match-item" },
                            r#type: "button",
                            disabled: selected().is_none(),
                            onclick: move |_| {
                                if let Some(left) = selected() {
                                    board.write().pair(left, index);
                                    selected.set(None);
                                }
                            },
                            "{item}"
                        }
                    }
                }
            }
            if !pairs.is_empty() {
                ul { class: "match-pairs",
                    for pair in pairs {
                        li { "{pair}" }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        board.write().clear();
                        selected.set(None);
                    },
                    "Clear Matches"
                }
            }
            SubmitButton {
                label: "Check Matches",
                enabled: complete,
                onclick: move |_| on_submit.call(ExerciseResponse::MatchFollowing(board())),
            }
        }
    }
}
