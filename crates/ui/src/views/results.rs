use dioxus::prelude::*;

use crate::app::Screen;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultsVm, high_score_label, map_results};

#[derive(Clone, Debug, PartialEq)]
struct ResultsData {
    results: Option<ResultsVm>,
    best_label: String,
}

/// Compact summary of the last finished quiz.
#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context::<Signal<Screen>>();
    let results = ctx.results();
    let quiz_loop = ctx.quiz_loop();

    let resource = use_resource(move || {
        let results = results.clone();
        let quiz_loop = quiz_loop.clone();
        async move {
            let payload = results.latest().await;
            let best_score = quiz_loop
                .best_score()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(ResultsData {
                results: payload.as_ref().map(map_results),
                best_label: high_score_label(Some(best_score)),
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let back_to_quiz = move |_: MouseEvent| {
        let mut screen = screen;
        screen.set(Screen::Quiz);
    };

    rsx! {
        div { class: "container",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "card center", "Loading…" }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card error", role: "alert", "{err.message()}" }
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(ResultsData { results: None, .. }) => rsx! {
                    div { class: "card center", "No results to show." }
                    button { class: "btn", r#type: "button", onclick: back_to_quiz, "Go to Quiz" }
                },
                ViewState::Ready(ResultsData { results: Some(vm), best_label }) => rsx! {
                    div { class: "card center",
                        h2 { "{vm.score_label}" }
                        p { class: "subtle", "{vm.source_label}" }
                        p { class: "subtle", "{vm.completed_label}" }
                        p { class: "highscore", "{best_label}" }
                        button { class: "btn primary", r#type: "button", onclick: back_to_quiz, "Restart Quiz" }
                    }
                    ul { class: "results-list", aria_label: "Results breakdown",
                        for row in vm.rows {
                            li {
                                key: "{row.key}",
                                class: if row.is_right { "result-item right" } else { "result-item wrong" },
                                div { class: "q", dangerous_inner_html: "{row.question_html}" }
                                div { class: "row",
                                    div {
                                        strong { "Your answer: " }
                                        span { dangerous_inner_html: "{row.your_answer_html}" }
                                    }
                                    div {
                                        strong { "Correct: " }
                                        span { dangerous_inner_html: "{row.correct_html}" }
                                    }
                                }
                                if let Some(note) = row.note {
                                    div { class: "note", "{note}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
