//! Question Source Adapter: remote trivia API and bundled dataset behind one shape.

mod local;
mod normalize;
mod opentdb;

use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionSource};

use crate::error::QuestionSourceError;

pub use local::LocalProvider;
pub use normalize::{REMOTE_ID_PREFIX, RawQuestion, decode_html, normalize};
pub use opentdb::{
    DEFAULT_TRIVIA_URL, OpenTdbProvider, TriviaConfig, TriviaResponse, parse_response,
};

/// Something that can hand out a batch of normalized questions.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch up to `amount` questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when the source is unreachable or its data
    /// has an unexpected shape.
    async fn fetch_batch(&self, amount: usize) -> Result<Vec<Question>, QuestionSourceError>;
}

/// Both adapters, selected by `QuestionSource`.
#[derive(Clone)]
pub struct QuestionSources {
    remote: Arc<dyn QuestionProvider>,
    local: Arc<dyn QuestionProvider>,
}

impl QuestionSources {
    #[must_use]
    pub fn new(remote: Arc<dyn QuestionProvider>, local: Arc<dyn QuestionProvider>) -> Self {
        Self { remote, local }
    }

    /// Open Trivia DB plus the bundled dataset.
    #[must_use]
    pub fn standard(config: TriviaConfig) -> Self {
        Self::new(
            Arc::new(OpenTdbProvider::new(config)),
            Arc::new(LocalProvider::bundled()),
        )
    }

    #[must_use]
    pub fn provider(&self, source: QuestionSource) -> &dyn QuestionProvider {
        match source {
            QuestionSource::Remote => self.remote.as_ref(),
            QuestionSource::Local => self.local.as_ref(),
        }
    }

    /// # Errors
    ///
    /// Propagates the selected provider's `QuestionSourceError`.
    pub async fn load(
        &self,
        source: QuestionSource,
        amount: usize,
    ) -> Result<Vec<Question>, QuestionSourceError> {
        self.provider(source).fetch_batch(amount).await
    }
}
