use serde::{Deserialize, Serialize};

/// Why a question was closed without an option being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The user pressed "Lock Answer" with nothing selected.
    Locked,
    /// The countdown reached zero with nothing selected.
    TimedOut,
}

/// What the user did with one question.
///
/// `Locked` and `TimedOut` skips render the same way but are kept apart in
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum AnswerState {
    #[default]
    Unanswered,
    Skipped(SkipReason),
    Answered(usize),
}

impl AnswerState {
    /// The chosen option, if any.
    #[must_use]
    pub fn selected_index(self) -> Option<usize> {
        match self {
            AnswerState::Answered(index) => Some(index),
            AnswerState::Unanswered | AnswerState::Skipped(_) => None,
        }
    }

    #[must_use]
    pub fn is_correct(self, correct_index: usize) -> bool {
        self.selected_index() == Some(correct_index)
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, AnswerState::Answered(_))
    }
}

/// Terminal record for one question.
///
/// The correct index is copied at record time so the result does not depend
/// on the question afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub state: AnswerState,
    pub correct_index: usize,
}

impl AnswerRecord {
    #[must_use]
    pub fn answered(selected: usize, correct_index: usize) -> Self {
        Self {
            state: AnswerState::Answered(selected),
            correct_index,
        }
    }

    #[must_use]
    pub fn skipped(reason: SkipReason, correct_index: usize) -> Self {
        Self {
            state: AnswerState::Skipped(reason),
            correct_index,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.state.is_correct(self.correct_index)
    }
}
