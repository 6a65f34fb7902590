use dioxus::prelude::*;

use crate::views::{QuizView, ResultsView};

/// Which screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Quiz,
    Results,
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Quiz App" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Screens { initial: Screen::Quiz }
            }
        }
    }
}

/// Header plus the active screen. Views switch screens through the
/// `Signal<Screen>` this provides.
#[component]
pub fn Screens(initial: Screen) -> Element {
    let screen = use_context_provider(|| Signal::new(initial));

    rsx! {
        header { class: "app-header",
            span { class: "brand", "❓ Quiz App" }
        }
        main { class: "app-main",
            match screen() {
                Screen::Quiz => rsx! { QuizView {} },
                Screen::Results => rsx! { ResultsView {} },
            }
        }
    }
}
