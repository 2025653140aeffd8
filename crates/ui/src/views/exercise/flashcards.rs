use course_core::catalog::Flashcard;
use course_core::evaluator::ExerciseResponse;
use dioxus::prelude::*;

use super::SubmitButton;

#[component]
pub fn FlashcardsPanel(cards: Vec<Flashcard>, on_submit: EventHandler<ExerciseResponse>) -> Element {
    let mut marks = use_signal(Vec::<bool>::new);
    let mut flipped = use_signal(|| false);
    let position = marks.read().len();
    let known = marks.read().iter().filter(|known| **known).count();
    let total = cards.len();
    let card_number = position + 1;

    rsx! {
        div { class: "exercise-panel",
            p { class: "exercise-instructions",
                "Read the German word, flip the card, and say honestly whether you knew it."
            }
            match cards.get(position) {
                Some(card) => rsx! {
                    p { class: "flashcard-position", "Card {card_number} of {total}" }
                    div { class: if flipped() { "flashcard flashcard--flipped" } else { "flashcard" },
                        span { class: "flashcard-german", "{card.german}" }
                        if flipped() {
                            span { class: "flashcard-english", "{card.english}" }
                            span { class: "flashcard-category", "{card.category}" }
                        }
                    }
                    if flipped() {
                        div { class: "flashcard-actions",
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    marks.write().push(false);
                                    flipped.set(false);
                                },
                                "Still Learning"
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    marks.write().push(true);
                                    flipped.set(false);
                                },
                                "I Knew It"
                            }
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| flipped.set(true),
                            "Show Answer"
                        }
                    }
                },
                None => rsx! {
                    p { class: "flashcard-summary", "You knew {known} of {total} cards." }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            marks.write().clear();
                            flipped.set(false);
                        },
                        "Start Over"
                    }
                },
            }
            SubmitButton {
                label: "Finish Review",
                enabled: position >= total,
                onclick: move |_| on_submit.call(ExerciseResponse::Flashcards(marks())),
            }
        }
    }
}
