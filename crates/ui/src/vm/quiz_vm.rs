use services::QuizSession;

use super::html::sanitize_html;
use super::time_fmt::format_countdown;

/// The countdown label switches to its warning style at or below this many seconds.
pub const TIMER_WARNING_SECONDS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub html: String,
    pub selected: bool,
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub question_id: String,
    pub question_html: String,
    pub options: Vec<OptionVm>,
    pub position_label: String,
    pub progress_percent: u8,
    pub timer_label: String,
    pub timer_warning: bool,
    pub can_go_previous: bool,
    pub can_lock: bool,
    pub can_advance: bool,
    pub is_last: bool,
}

impl QuizVm {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let question = session.current_question();
        let selected = session.current_state().selected_index();
        let progress = session.progress();
        let seconds = session.seconds_remaining();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                html: sanitize_html(text),
                selected: selected == Some(index),
            })
            .collect();

        Self {
            question_id: question.id().to_string(),
            question_html: sanitize_html(question.text()),
            options,
            position_label: format!("Question {} / {}", progress.index + 1, progress.total),
            progress_percent: progress.percent,
            timer_label: format_countdown(seconds),
            timer_warning: seconds <= TIMER_WARNING_SECONDS,
            can_go_previous: progress.index > 0,
            can_lock: !session.can_advance(),
            can_advance: session.can_advance(),
            is_last: progress.is_last,
        }
    }

    #[must_use]
    pub fn advance_label(&self) -> &'static str {
        if self.is_last { "Finish" } else { "Next" }
    }
}

#[must_use]
pub fn high_score_label(best: Option<u32>) -> String {
    format!("🏆 High Score: {}", best.unwrap_or(0))
}
