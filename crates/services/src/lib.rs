#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod questions;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionSourceError, QuizError};
pub use questions::{
    LocalProvider, OpenTdbProvider, QuestionProvider, QuestionSources, TriviaConfig,
};
pub use quiz::{
    Advance, FinishOutcome, LOAD_FAILED_MESSAGE, LoadApplied, LoadFailure, LoadFailureKind,
    LoadTicket, NO_QUESTIONS_MESSAGE, QuizController, QuizLoopService, QuizPhase, QuizProgress,
    QuizSession, ResultsService, TimerTick,
};
