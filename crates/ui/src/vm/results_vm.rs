use quiz_core::model::{AnswerState, ResultItem, ResultPayload, SkipReason};

use super::html::sanitize_html;
use super::time_fmt::format_completed_at;

const NO_ANSWER: &str = "—";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub key: String,
    pub question_html: String,
    pub your_answer_html: String,
    pub correct_html: String,
    pub is_right: bool,
    pub note: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub source_label: String,
    pub completed_label: String,
    pub rows: Vec<ResultRowVm>,
}

#[must_use]
pub fn map_results(payload: &ResultPayload) -> ResultsVm {
    let rows = payload
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| map_row(index, item))
        .collect();

    ResultsVm {
        score_label: format!("You scored {}/{}", payload.score, payload.total),
        source_label: format!("Source: {}", payload.source().label()),
        completed_label: format!("Completed {}", format_completed_at(payload.completed_at)),
        rows,
    }
}

fn map_row(index: usize, item: &ResultItem) -> ResultRowVm {
    let note = match item.answer {
        AnswerState::Skipped(SkipReason::TimedOut) => Some("Time ran out"),
        AnswerState::Skipped(SkipReason::Locked) => Some("Locked without an answer"),
        AnswerState::Unanswered | AnswerState::Answered(_) => None,
    };

    ResultRowVm {
        key: item.question.id().to_string(),
        question_html: format!("Q{}. {}", index + 1, sanitize_html(item.question.text())),
        your_answer_html: item
            .selected_option()
            .map_or_else(|| NO_ANSWER.to_string(), sanitize_html),
        correct_html: sanitize_html(item.question.correct_option()),
        is_right: item.is_right(),
        note,
    }
}
