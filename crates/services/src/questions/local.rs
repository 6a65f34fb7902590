use async_trait::async_trait;

use quiz_core::model::Question;

use super::QuestionProvider;
use crate::error::QuestionSourceError;

const BUNDLED_QUESTIONS: &str = include_str!("../../assets/questions.json");

/// Offline question source reading an already-normalized list.
#[derive(Clone, Debug)]
pub struct LocalProvider {
    raw: &'static str,
}

impl LocalProvider {
    /// The dataset compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            raw: BUNDLED_QUESTIONS,
        }
    }

    /// A provider over a caller-supplied JSON list.
    #[must_use]
    pub fn from_json(raw: &'static str) -> Self {
        Self { raw }
    }

    /// The first `amount` questions, verbatim.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError::MalformedResponse` if the dataset is not a
    /// list of questions, or `InvalidQuestion` if an entry breaks an invariant.
    pub fn load(&self, amount: usize) -> Result<Vec<Question>, QuestionSourceError> {
        let mut questions: Vec<Question> = serde_json::from_str(self.raw)
            .map_err(|err| QuestionSourceError::MalformedResponse(err.to_string()))?;
        questions.truncate(amount);
        for question in &questions {
            question.validate()?;
        }
        Ok(questions)
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::bundled()
    }
}

#[async_trait]
impl QuestionProvider for LocalProvider {
    async fn fetch_batch(&self, amount: usize) -> Result<Vec<Question>, QuestionSourceError> {
        self.load(amount)
    }
}
