use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::TIMER_SECONDS;
use quiz_core::model::{
    AnswerRecord, AnswerState, Question, QuestionSource, ResultPayload, SkipReason,
};

use crate::error::QuizError;

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Counting down; carries the seconds left.
    Running(u32),
    /// Reached zero on this tick and locked the question.
    Expired,
    /// Nothing to count: the question already has a record or the quiz is over.
    Idle,
    /// The tick was scheduled for a question that is no longer current.
    Stale,
}

/// Result of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at this index.
    Moved(usize),
    /// That was the last question; the caller should finish the quiz.
    Finished,
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
    pub is_last: bool,
}

/// One run through a fixed batch of questions.
///
/// Owns the current position, one optional record per question, and the
/// countdown for the question on screen. Every time a question is entered the
/// countdown restarts and `timer_epoch` moves on, so ticks scheduled for an
/// earlier question can be told apart and dropped.
pub struct QuizSession {
    source: QuestionSource,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<AnswerRecord>>,
    seconds_remaining: u32,
    timer_epoch: u64,
    finished: bool,
}

impl QuizSession {
    /// Start answering `questions` from the first one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if the batch is empty.
    pub fn new(source: QuestionSource, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            source,
            questions,
            current: 0,
            answers,
            seconds_remaining: TIMER_SECONDS,
            timer_epoch: 0,
            finished: false,
        })
    }

    #[must_use]
    pub fn source(&self) -> QuestionSource {
        self.source
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        self.answer_at(self.current)
    }

    /// What the user did with the current question so far.
    #[must_use]
    pub fn current_state(&self) -> AnswerState {
        self.current_answer()
            .map_or(AnswerState::Unanswered, |record| record.state)
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[must_use]
    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total();
        let position = self.current + 1;
        let percent = u8::try_from((position * 100 + total / 2) / total).unwrap_or(100);
        QuizProgress {
            index: self.current,
            total,
            answered: self.answers.iter().flatten().count(),
            percent,
            is_last: self.is_last(),
        }
    }

    /// Record `option` as the answer to the current question.
    ///
    /// Replaces whatever was recorded before, including a skip, for as long as
    /// the quiz is running.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` after the quiz ended and
    /// `QuizError::OptionOutOfRange` for an index past the last option.
    pub fn select_option(&mut self, option: usize) -> Result<(), QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        let question = &self.questions[self.current];
        let len = question.options().len();
        if option >= len {
            return Err(QuizError::OptionOutOfRange { index: option, len });
        }
        self.answers[self.current] = Some(AnswerRecord::answered(option, question.correct_index()));
        Ok(())
    }

    /// Close the current question without choosing an option.
    ///
    /// Only writes when nothing is recorded yet; an existing answer or skip is
    /// left alone.
    pub fn lock_answer(&mut self) {
        self.lock_with(SkipReason::Locked);
    }

    fn lock_with(&mut self, reason: SkipReason) -> bool {
        if self.finished || self.answers[self.current].is_some() {
            return false;
        }
        let correct_index = self.questions[self.current].correct_index();
        self.answers[self.current] = Some(AnswerRecord::skipped(reason, correct_index));
        true
    }

    /// True while the countdown for the current question should keep running.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        !self.finished && self.answers[self.current].is_none() && self.seconds_remaining > 0
    }

    /// Advance the countdown by one second.
    ///
    /// `epoch` is the value of [`QuizSession::timer_epoch`] when the tick was
    /// scheduled. When the count reaches zero the question is locked as
    /// timed out.
    pub fn timer_tick(&mut self, epoch: u64) -> TimerTick {
        if epoch != self.timer_epoch {
            return TimerTick::Stale;
        }
        if !self.timer_active() {
            return TimerTick::Idle;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            self.lock_with(SkipReason::TimedOut);
            return TimerTick::Expired;
        }
        TimerTick::Running(self.seconds_remaining)
    }

    /// A record of any kind exists for the current question.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.answers[self.current].is_some()
    }

    /// Move to the next question, or report that the quiz is complete.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` when the current question has no record
    /// and `QuizError::Finished` after the quiz ended.
    pub fn next(&mut self) -> Result<Advance, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        if !self.can_advance() {
            return Err(QuizError::NotAnswered);
        }
        if self.is_last() {
            return Ok(Advance::Finished);
        }
        self.current += 1;
        self.enter_question();
        Ok(Advance::Moved(self.current))
    }

    /// Step back one question. Returns `false` on the first question.
    ///
    /// The revisited question keeps its record.
    pub fn previous(&mut self) -> bool {
        if self.finished || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.enter_question();
        true
    }

    /// Start over on the same batch.
    pub fn restart(&mut self) {
        self.current = 0;
        self.answers = vec![None; self.questions.len()];
        self.finished = false;
        self.enter_question();
    }

    fn enter_question(&mut self) {
        self.seconds_remaining = TIMER_SECONDS;
        self.timer_epoch += 1;
    }

    /// Snapshot of the results without ending the quiz.
    #[must_use]
    pub fn build_result(&self, completed_at: DateTime<Utc>) -> ResultPayload {
        ResultPayload::from_answers(&self.questions, &self.answers, self.source, completed_at)
    }

    /// End the quiz and produce its results. The session accepts no further input.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` if called twice.
    pub fn finish(&mut self, completed_at: DateTime<Utc>) -> Result<ResultPayload, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        self.finished = true;
        self.timer_epoch += 1;
        Ok(self.build_result(completed_at))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("source", &self.source)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.iter().flatten().count())
            .field("seconds_remaining", &self.seconds_remaining)
            .field("timer_epoch", &self.timer_epoch)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use quiz_core::time::fixed_now;

    fn question(id: usize, correct: usize) -> Question {
        Question::new(
            QuestionId::positional("t", id),
            format!("Q{id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            None,
        )
        .unwrap()
    }

    fn session(len: usize) -> QuizSession {
        let questions = (0..len).map(|i| question(i, i % 4)).collect();
        QuizSession::new(QuestionSource::Local, questions).unwrap()
    }

    fn expire(session: &mut QuizSession) {
        let epoch = session.timer_epoch();
        for _ in 0..TIMER_SECONDS {
            session.timer_tick(epoch);
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = QuizSession::new(QuestionSource::Remote, Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::NoQuestions));
    }

    #[test]
    fn new_session_starts_at_first_question_with_full_timer() {
        let s = session(3);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS);
        assert!(s.current_answer().is_none());
        assert!(s.timer_active());
    }

    #[test]
    fn can_advance_only_after_a_record_exists() {
        let mut s = session(3);
        assert!(!s.can_advance());
        assert!(matches!(s.next(), Err(QuizError::NotAnswered)));

        s.select_option(2).unwrap();
        assert!(s.can_advance());

        assert_eq!(s.next().unwrap(), Advance::Moved(1));
        s.lock_answer();
        assert!(s.can_advance());

        assert_eq!(s.next().unwrap(), Advance::Moved(2));
        expire(&mut s);
        assert!(s.can_advance());
    }

    #[test]
    fn selecting_copies_correct_index_and_overwrites() {
        let mut s = session(2);
        s.select_option(1).unwrap();
        s.select_option(3).unwrap();
        let record = s.current_answer().unwrap();
        assert_eq!(record.state, AnswerState::Answered(3));
        assert_eq!(record.correct_index, 0);
    }

    #[test]
    fn selecting_missing_option_fails() {
        let mut s = session(1);
        let err = s.select_option(4).unwrap_err();
        assert!(matches!(err, QuizError::OptionOutOfRange { index: 4, len: 4 }));
        assert!(s.current_answer().is_none());
    }

    #[test]
    fn lock_does_not_overwrite_real_answer() {
        let mut s = session(1);
        s.select_option(2).unwrap();
        s.lock_answer();
        assert_eq!(s.current_state(), AnswerState::Answered(2));
    }

    #[test]
    fn manual_lock_and_timeout_are_distinct() {
        let mut s = session(2);
        s.lock_answer();
        assert_eq!(s.current_state(), AnswerState::Skipped(SkipReason::Locked));

        s.next().unwrap();
        expire(&mut s);
        assert_eq!(s.current_state(), AnswerState::Skipped(SkipReason::TimedOut));
    }

    #[test]
    fn timer_counts_down_and_expires_once() {
        let mut s = session(1);
        let epoch = s.timer_epoch();
        assert_eq!(s.timer_tick(epoch), TimerTick::Running(TIMER_SECONDS - 1));
        for _ in 1..TIMER_SECONDS - 1 {
            s.timer_tick(epoch);
        }
        assert_eq!(s.seconds_remaining(), 1);
        assert_eq!(s.timer_tick(epoch), TimerTick::Expired);
        assert_eq!(s.seconds_remaining(), 0);
        assert_eq!(s.timer_tick(epoch), TimerTick::Idle);
        assert!(!s.timer_active());
    }

    #[test]
    fn timer_stops_once_answered() {
        let mut s = session(1);
        let epoch = s.timer_epoch();
        s.timer_tick(epoch);
        s.select_option(0).unwrap();
        assert!(!s.timer_active());
        assert_eq!(s.timer_tick(epoch), TimerTick::Idle);
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS - 1);
    }

    #[test]
    fn ticks_from_previous_question_are_ignored() {
        let mut s = session(2);
        let first_epoch = s.timer_epoch();
        s.select_option(0).unwrap();
        s.next().unwrap();

        assert_eq!(s.timer_tick(first_epoch), TimerTick::Stale);
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS);
    }

    #[test]
    fn next_and_previous_reset_timer() {
        let mut s = session(3);
        let epoch = s.timer_epoch();
        for _ in 0..5 {
            s.timer_tick(epoch);
        }
        s.select_option(0).unwrap();
        s.next().unwrap();
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS);

        let epoch = s.timer_epoch();
        s.timer_tick(epoch);
        assert!(s.previous());
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS);
        assert_eq!(s.current_state(), AnswerState::Answered(0));
    }

    #[test]
    fn previous_on_first_question_is_a_no_op() {
        let mut s = session(2);
        let epoch = s.timer_epoch();
        s.timer_tick(epoch);
        assert!(!s.previous());
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS - 1);
        assert_eq!(s.timer_epoch(), epoch);
    }

    #[test]
    fn previous_does_not_require_a_record() {
        let mut s = session(3);
        s.select_option(0).unwrap();
        s.next().unwrap();
        assert!(!s.can_advance());
        assert!(s.previous());
        s.next().unwrap();
        assert!(s.current_answer().is_none());
    }

    #[test]
    fn last_question_reports_finished() {
        let mut s = session(2);
        s.select_option(0).unwrap();
        s.next().unwrap();
        s.select_option(1).unwrap();
        assert!(s.is_last());
        assert_eq!(s.next().unwrap(), Advance::Finished);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn restart_keeps_batch_and_clears_answers() {
        let mut s = session(3);
        s.select_option(0).unwrap();
        s.next().unwrap();
        s.lock_answer();
        let epoch = s.timer_epoch();

        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.total(), 3);
        assert!(s.current_answer().is_none());
        assert_eq!(s.progress().answered, 0);
        assert_eq!(s.seconds_remaining(), TIMER_SECONDS);
        assert_ne!(s.timer_epoch(), epoch);
    }

    #[test]
    fn finish_is_terminal() {
        let mut s = session(2);
        s.select_option(0).unwrap();
        let payload = s.finish(fixed_now()).unwrap();
        assert_eq!(payload.total, 2);
        assert_eq!(payload.score, 1);
        assert_eq!(payload.items[1].answer, AnswerState::Unanswered);

        assert!(s.is_finished());
        assert!(matches!(s.select_option(1), Err(QuizError::Finished)));
        assert!(matches!(s.next(), Err(QuizError::Finished)));
        assert!(matches!(s.finish(fixed_now()), Err(QuizError::Finished)));
        assert!(!s.timer_active());
    }

    #[test]
    fn progress_reports_rounded_percent() {
        let mut s = session(3);
        assert_eq!(s.progress().percent, 33);
        s.select_option(0).unwrap();
        s.next().unwrap();
        assert_eq!(s.progress().percent, 67);
        assert_eq!(s.progress().answered, 1);
        s.lock_answer();
        s.next().unwrap();
        let progress = s.progress();
        assert_eq!(progress.percent, 100);
        assert!(progress.is_last);
    }
}
