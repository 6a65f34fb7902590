//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while obtaining a batch of questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("trivia request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("unexpected trivia response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
}

impl QuestionSourceError {
    /// Transport failures and non-success statuses.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus(_))
    }
}

/// Errors emitted by the quiz session and its workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available")]
    NoQuestions,
    #[error("the current question has no answer yet")]
    NotAnswered,
    #[error("option {index} does not exist (question has {len})")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("quiz already finished")]
    Finished,
    #[error(transparent)]
    Source(#[from] QuestionSourceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
