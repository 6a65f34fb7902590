use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::model::QuestionSource;
use services::{Advance, LoadFailureKind, QuizController, QuizPhase, QuizSession, TimerTick};

use crate::app::Screen;
use crate::context::AppContext;
use crate::views::{QuestionCard, ViewError};
use crate::vm::{QuizVm, high_score_label};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq)]
enum QuizBody {
    Loading,
    Failed {
        message: &'static str,
        kind: LoadFailureKind,
    },
    Saving,
    Ready(QuizVm),
}

impl QuizBody {
    fn from_phase(phase: &QuizPhase) -> Self {
        match phase {
            QuizPhase::Loading { .. } => Self::Loading,
            QuizPhase::Failed(failure) => Self::Failed {
                message: failure.message,
                kind: failure.kind,
            },
            QuizPhase::Finished => Self::Saving,
            QuizPhase::Ready(session) => Self::Ready(QuizVm::from_session(session)),
        }
    }
}

/// Tick `epoch` once per second until the countdown stops running.
async fn run_countdown(epoch: u64, mut tick: impl FnMut(u64) -> Option<TimerTick>) {
    loop {
        tokio::time::sleep(TICK).await;
        if !matches!(tick(epoch), Some(TimerTick::Running(_))) {
            return;
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context::<Signal<Screen>>();
    let quiz_loop = ctx.quiz_loop();
    let initial_source = ctx.initial_source();

    let controller = use_signal(|| QuizController::new(initial_source));
    let error = use_signal(|| None::<ViewError>);

    let best_score = {
        let quiz_loop = quiz_loop.clone();
        use_resource(move || {
            let quiz_loop = quiz_loop.clone();
            async move {
                quiz_loop
                    .best_score()
                    .await
                    .map_err(|_| ViewError::Unknown)
            }
        })
    };

    // Every load takes a fresh ticket; the controller drops results that come
    // back with an older one.
    let load = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |source: QuestionSource| {
            let mut controller = controller;
            let mut error = error;
            error.set(None);
            let ticket = controller.write().begin_load(source);
            let quiz_loop = quiz_loop.clone();
            spawn(async move {
                let result = quiz_loop.load_questions(ticket.source()).await;
                controller.write().apply_load(ticket, result);
            });
        })
    };

    use_hook(move || {
        spawn(async move {
            load.call(initial_source);
        })
    });

    // Restarts whenever a question is entered, so each countdown starts at entry.
    let epoch = use_memo(move || controller.read().session().map(QuizSession::timer_epoch));
    let _countdown = use_resource(move || async move {
        let Some(epoch) = epoch() else {
            return;
        };
        let mut controller = controller;
        run_countdown(epoch, |epoch| {
            controller
                .write()
                .session_mut()
                .map(|session| session.timer_tick(epoch))
        })
        .await;
    });

    let finish = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let mut controller = controller;
            let mut error = error;
            let mut screen = screen;
            let Some(mut session) = controller.write().take_session() else {
                return;
            };
            error.set(None);
            let quiz_loop = quiz_loop.clone();
            spawn(async move {
                match quiz_loop.finish(&mut session).await {
                    Ok(_) => screen.set(Screen::Results),
                    Err(_) => {
                        controller.write().restore_session(session);
                        error.set(Some(ViewError::Unknown));
                    }
                }
            });
        })
    };

    let on_select = use_callback(move |option: usize| {
        let mut controller = controller;
        let mut error = error;
        let result = controller
            .write()
            .session_mut()
            .map(|session| session.select_option(option));
        if let Some(Err(_)) = result {
            error.set(Some(ViewError::Unknown));
        }
    });

    let on_lock = use_callback(move |()| {
        let mut controller = controller;
        if let Some(session) = controller.write().session_mut() {
            session.lock_answer();
        }
    });

    let on_previous = use_callback(move |()| {
        let mut controller = controller;
        if let Some(session) = controller.write().session_mut() {
            session.previous();
        }
    });

    let on_next = use_callback(move |()| {
        let mut controller = controller;
        let advanced = controller.write().session_mut().map(QuizSession::next);
        match advanced {
            Some(Ok(Advance::Finished)) => finish.call(()),
            Some(Err(_)) => {
                let mut error = error;
                error.set(Some(ViewError::Unknown));
            }
            Some(Ok(Advance::Moved(_))) | None => {}
        }
    });

    let on_restart = use_callback(move |()| {
        let mut controller = controller;
        if let Some(session) = controller.write().session_mut() {
            session.restart();
        }
    });

    let body = QuizBody::from_phase(controller.read().phase());
    let use_api = controller.read().source().used_api();
    let best = best_score
        .value()
        .read()
        .as_ref()
        .and_then(|value| value.as_ref().ok())
        .copied();
    let best_label = high_score_label(best);

    rsx! {
        div { class: "container",
            if let Some(err) = error() {
                div { class: "card error", role: "alert", "{err.message()}" }
            }
            match body {
                QuizBody::Loading => rsx! {
                    div { class: "card center", "Loading questions…" }
                },
                QuizBody::Saving => rsx! {
                    div { class: "card center", "Saving results…" }
                },
                QuizBody::Failed { message, kind } => rsx! {
                    div { class: "card error", role: "alert", "{message}" }
                    div { class: "stack",
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| load.call(QuestionSource::Local),
                            "Use Local Questions"
                        }
                        button {
                            class: "btn outline",
                            r#type: "button",
                            onclick: move |_| load.call(QuestionSource::Remote),
                            if kind == LoadFailureKind::NoQuestions { "Fetch from API" } else { "Retry API" }
                        }
                    }
                },
                QuizBody::Ready(vm) => rsx! {
                    div { class: "topbar",
                        div { class: "progress", aria_label: "{vm.position_label}",
                            div { class: "bar", style: "width: {vm.progress_percent}%" }
                        }
                        div { class: "meta",
                            span { "{vm.position_label}" }
                            span {
                                class: if vm.timer_warning { "timer warn" } else { "timer" },
                                aria_live: "polite",
                                "{vm.timer_label}"
                            }
                        }
                    }
                    QuestionCard {
                        key: "{vm.question_id}",
                        question_html: vm.question_html.clone(),
                        options: vm.options.clone(),
                        on_select: move |option| on_select.call(option),
                    }
                    div { class: "actions",
                        div { class: "stack",
                            button {
                                class: "btn",
                                r#type: "button",
                                disabled: !vm.can_go_previous,
                                onclick: move |_| on_previous.call(()),
                                "Previous"
                            }
                            button {
                                class: "btn outline",
                                r#type: "button",
                                disabled: !vm.can_lock,
                                onclick: move |_| on_lock.call(()),
                                "Lock Answer"
                            }
                        }
                        div { class: "stack",
                            button {
                                class: "btn primary",
                                r#type: "button",
                                disabled: !vm.can_advance,
                                onclick: move |_| on_next.call(()),
                                "{vm.advance_label()}"
                            }
                        }
                    }
                },
            }
            div { class: "source-toggle",
                label { class: "switch",
                    input {
                        r#type: "checkbox",
                        checked: use_api,
                        onchange: move |evt: FormEvent| {
                            load.call(QuestionSource::from_use_api(evt.checked()));
                        },
                    }
                    span { "Use Open Trivia DB API" }
                }
                button {
                    class: "btn ghost",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Restart"
                }
                div { class: "highscore", aria_label: "High score", "{best_label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::TIMER_SECONDS;
    use quiz_core::model::{Question, QuestionId};
    use tokio::time::Instant;

    fn session() -> QuizSession {
        let questions = (0..3)
            .map(|i| {
                Question::new(
                    QuestionId::positional("local", i),
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    0,
                    None,
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(QuestionSource::Local, questions).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expires_thirty_seconds_after_entering_a_question() {
        let mut session = session();
        session.lock_answer();
        session.next().unwrap();

        let entered = Instant::now();
        let epoch = session.timer_epoch();
        run_countdown(epoch, |epoch| Some(session.timer_tick(epoch))).await;

        assert_eq!(entered.elapsed().as_secs(), u64::from(TIMER_SECONDS));
        assert!(!session.timer_active());
        assert!(session.can_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_stops_once_the_question_changes() {
        let mut session = session();
        let epoch = session.timer_epoch();
        let mut ticks = 0;
        run_countdown(epoch, |epoch| {
            ticks += 1;
            if ticks == 3 {
                session.lock_answer();
                session.next().unwrap();
            }
            Some(session.timer_tick(epoch))
        })
        .await;

        assert_eq!(ticks, 3);
        assert!(session.timer_active());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_stops_without_a_session() {
        let started = Instant::now();
        run_countdown(0, |_| None).await;
        assert_eq!(started.elapsed().as_secs(), 1);
    }
}
