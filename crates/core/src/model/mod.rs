mod answer;
mod ids;
mod question;
mod result;
mod source;

pub use answer::{AnswerRecord, AnswerState, SkipReason};
pub use ids::{ParseIdError, QuestionId};
pub use question::{Difficulty, ParseDifficultyError, Question, QuestionError};
pub use result::{ResultItem, ResultPayload};
pub use source::QuestionSource;
