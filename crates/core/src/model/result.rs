use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, AnswerState, Question, QuestionSource};

/// One question of a finished quiz together with what the user did with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(flatten)]
    pub question: Question,
    pub answer: AnswerState,
    /// Renderer view of `answer`: `null` for every kind of non-answer.
    pub selected_index: Option<usize>,
}

impl ResultItem {
    #[must_use]
    pub fn new(question: Question, answer: AnswerState) -> Self {
        Self {
            question,
            answer,
            selected_index: answer.selected_index(),
        }
    }

    #[must_use]
    pub fn is_right(&self) -> bool {
        self.answer.is_correct(self.question.correct_index())
    }

    /// Text of the chosen option, if one was chosen.
    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_index.and_then(|i| self.question.option(i))
    }
}

/// Handoff artifact written when a quiz finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub items: Vec<ResultItem>,
    pub total: usize,
    pub score: usize,
    pub used_api: bool,
    pub completed_at: DateTime<Utc>,
}

impl ResultPayload {
    /// Pair every question with its record; missing records count as unanswered.
    ///
    /// The score is taken from each record's own copy of the correct index.
    #[must_use]
    pub fn from_answers(
        questions: &[Question],
        answers: &[Option<AnswerRecord>],
        source: QuestionSource,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let mut score = 0;
        let items: Vec<ResultItem> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let record = answers.get(index).copied().flatten();
                if record.is_some_and(|r| r.is_correct()) {
                    score += 1;
                }
                let state = record.map_or(AnswerState::Unanswered, |r| r.state);
                ResultItem::new(question.clone(), state)
            })
            .collect();

        Self {
            total: items.len(),
            items,
            score,
            used_api: source.used_api(),
            completed_at,
        }
    }

    #[must_use]
    pub fn source(&self) -> QuestionSource {
        QuestionSource::from_use_api(self.used_api)
    }
}
