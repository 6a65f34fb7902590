use dioxus::prelude::*;

use crate::vm::OptionVm;

/// Prompt plus a radio group of options. Markup must already be sanitized.
#[component]
pub fn QuestionCard(
    question_html: String,
    options: Vec<OptionVm>,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        div { class: "card",
            h2 { class: "question", dangerous_inner_html: "{question_html}" }
            div { class: "options", role: "radiogroup", aria_label: "Answer choices",
                for option in options {
                    label {
                        key: "{option.index}",
                        class: if option.selected { "option selected" } else { "option" },
                        input {
                            r#type: "radio",
                            name: "answer",
                            checked: option.selected,
                            onchange: move |_| on_select.call(option.index),
                        }
                        span { dangerous_inner_html: "{option.html}" }
                    }
                }
            }
        }
    }
}
