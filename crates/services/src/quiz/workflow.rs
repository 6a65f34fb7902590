use quiz_core::AMOUNT;
use quiz_core::model::{Question, QuestionSource, ResultPayload};
use storage::repository::{BestScoreSlot, ResultSlot};

use super::session::QuizSession;
use crate::Clock;
use crate::error::{QuestionSourceError, QuizError};
use crate::questions::QuestionSources;

/// What finishing a quiz produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOutcome {
    pub payload: ResultPayload,
    /// Best score after this quiz was counted.
    pub best_score: u32,
    /// This quiz set a new best score.
    pub new_best: bool,
}

/// Orchestrates loading batches and publishing finished quizzes.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    sources: QuestionSources,
    best_score: BestScoreSlot,
    results: ResultSlot,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sources: QuestionSources,
        best_score: BestScoreSlot,
        results: ResultSlot,
    ) -> Self {
        Self {
            clock,
            sources,
            best_score,
            results,
        }
    }

    /// Fetch a batch from `source`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` from the selected adapter.
    pub async fn load_questions(
        &self,
        source: QuestionSource,
    ) -> Result<Vec<Question>, QuestionSourceError> {
        let result = self.sources.load(source, AMOUNT).await;
        match &result {
            Ok(questions) => tracing::info!(%source, count = questions.len(), "loaded questions"),
            Err(err) => tracing::warn!(%source, error = %err, "failed to load questions"),
        }
        result
    }

    /// Load a batch and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Source` if loading fails and `QuizError::NoQuestions`
    /// if the batch is empty.
    pub async fn start_session(&self, source: QuestionSource) -> Result<QuizSession, QuizError> {
        let questions = self.load_questions(source).await?;
        QuizSession::new(source, questions)
    }

    /// Record the best score, write the results to the handoff slot, then end `session`.
    ///
    /// The session is only marked finished once both writes succeeded, so a
    /// failed call can be retried with the same session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` if the session already ended, or
    /// `QuizError::Storage` when the score or results cannot be stored.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<FinishOutcome, QuizError> {
        if session.is_finished() {
            return Err(QuizError::Finished);
        }
        let payload = session.build_result(self.clock.now());
        let score = u32::try_from(payload.score).unwrap_or(u32::MAX);
        let (best_score, new_best) = self.best_score.record(score).await?;
        self.results.write(&payload).await?;
        session.finish(payload.completed_at)?;

        tracing::info!(
            score = payload.score,
            total = payload.total,
            source = %session.source(),
            new_best,
            "quiz finished"
        );

        Ok(FinishOutcome {
            payload,
            best_score,
            new_best,
        })
    }

    /// Best score recorded so far.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the persistent store cannot be read.
    pub async fn best_score(&self) -> Result<u32, QuizError> {
        Ok(self.best_score.load().await?)
    }
}
