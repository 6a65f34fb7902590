mod question_card;
mod quiz;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use question_card::QuestionCard;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
