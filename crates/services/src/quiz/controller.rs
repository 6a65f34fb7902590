use quiz_core::model::{Question, QuestionSource};

use super::session::QuizSession;
use crate::error::{QuestionSourceError, QuizError};

/// Message shown for any failed load.
pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load questions. Try local mode or check your internet.";

/// Message shown when a load succeeded but produced nothing.
pub const NO_QUESTIONS_MESSAGE: &str = "No questions available.";

/// Identifies one asynchronous load. Only the most recent ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    source: QuestionSource,
}

impl LoadTicket {
    #[must_use]
    pub fn token(self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn source(self) -> QuestionSource {
        self.source
    }
}

/// Why the quiz could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    Network,
    MalformedResponse,
    NoQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: LoadFailureKind,
    pub source: QuestionSource,
    pub message: &'static str,
}

impl LoadFailure {
    fn from_error(source: QuestionSource, err: &QuestionSourceError) -> Self {
        let kind = if err.is_network() {
            LoadFailureKind::Network
        } else {
            LoadFailureKind::MalformedResponse
        };
        Self {
            kind,
            source,
            message: LOAD_FAILED_MESSAGE,
        }
    }

    fn empty(source: QuestionSource) -> Self {
        Self {
            kind: LoadFailureKind::NoQuestions,
            source,
            message: NO_QUESTIONS_MESSAGE,
        }
    }
}

/// Where the quiz screen currently is.
#[derive(Debug)]
pub enum QuizPhase {
    Loading { source: QuestionSource },
    Ready(QuizSession),
    Failed(LoadFailure),
    Finished,
}

/// What `apply_load` did with a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplied {
    Ready,
    Failed,
    /// A newer load was started meanwhile; the result was dropped.
    Stale,
}

/// Load lifecycle of the quiz screen.
///
/// Each call to [`QuizController::begin_load`] hands out a ticket with a fresh
/// token and discards the running session. A load result is only applied when
/// it comes back with the latest ticket, so the last source switch wins even
/// if an earlier request resolves later.
#[derive(Debug)]
pub struct QuizController {
    phase: QuizPhase,
    source: QuestionSource,
    latest_token: u64,
}

impl QuizController {
    #[must_use]
    pub fn new(source: QuestionSource) -> Self {
        Self {
            phase: QuizPhase::Loading { source },
            source,
            latest_token: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn source(&self) -> QuestionSource {
        self.source
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QuizPhase::Loading { .. })
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            QuizPhase::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.phase {
            QuizPhase::Ready(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&LoadFailure> {
        match &self.phase {
            QuizPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Start a new load from `source`, discarding any session in progress.
    pub fn begin_load(&mut self, source: QuestionSource) -> LoadTicket {
        self.latest_token += 1;
        self.source = source;
        self.phase = QuizPhase::Loading { source };
        LoadTicket {
            token: self.latest_token,
            source,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.token == self.latest_token
    }

    /// Apply the result of the load identified by `ticket`.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, QuestionSourceError>,
    ) -> LoadApplied {
        if !self.is_current(ticket) {
            tracing::debug!(
                token = ticket.token,
                latest = self.latest_token,
                source = %ticket.source,
                "dropping stale question load"
            );
            return LoadApplied::Stale;
        }

        match result.map_err(QuizError::from).and_then(|questions| {
            QuizSession::new(ticket.source, questions)
        }) {
            Ok(session) => {
                self.phase = QuizPhase::Ready(session);
                LoadApplied::Ready
            }
            Err(QuizError::Source(err)) => {
                tracing::warn!(source = %ticket.source, error = %err, "question load failed");
                self.phase = QuizPhase::Failed(LoadFailure::from_error(ticket.source, &err));
                LoadApplied::Failed
            }
            Err(err) => {
                tracing::warn!(source = %ticket.source, error = %err, "question load produced no quiz");
                self.phase = QuizPhase::Failed(LoadFailure::empty(ticket.source));
                LoadApplied::Failed
            }
        }
    }

    /// Take the running session out to finish it. The phase becomes `Finished`
    /// until the next load.
    pub fn take_session(&mut self) -> Option<QuizSession> {
        match std::mem::replace(&mut self.phase, QuizPhase::Finished) {
            QuizPhase::Ready(session) => Some(session),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Put back a session taken with [`QuizController::take_session`] whose
    /// finish did not go through.
    ///
    /// Returns `false` and drops `session` if a new load started meanwhile.
    pub fn restore_session(&mut self, session: QuizSession) -> bool {
        if !matches!(self.phase, QuizPhase::Finished) {
            return false;
        }
        self.phase = QuizPhase::Ready(session);
        true
    }
}
