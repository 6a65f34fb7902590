mod controller;
mod results;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use controller::{
    LOAD_FAILED_MESSAGE, LoadApplied, LoadFailure, LoadFailureKind, LoadTicket,
    NO_QUESTIONS_MESSAGE, QuizController, QuizPhase,
};
pub use results::ResultsService;
pub use session::{Advance, QuizProgress, QuizSession, TimerTick};
pub use workflow::{FinishOutcome, QuizLoopService};
