use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::questions::{QuestionSources, TriviaConfig};
use crate::quiz::{QuizLoopService, ResultsService};

/// Assembles app-facing services over one storage aggregate.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    results: Arc<ResultsService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, sources: QuestionSources) -> Self {
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            sources,
            storage.best_score(),
            storage.results(),
        ));
        let results = Arc::new(ResultsService::new(storage.results()));
        Self { quiz_loop, results }
    }

    /// Build services backed by `SQLite` storage and the standard question sources.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        trivia: TriviaConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock, QuestionSources::standard(trivia)))
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }
}
