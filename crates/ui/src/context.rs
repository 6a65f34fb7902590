use std::sync::Arc;

use quiz_core::model::QuestionSource;
use services::{QuizLoopService, ResultsService};

pub trait UiApp: Send + Sync {
    /// Source the quiz loads from when the screen opens.
    fn initial_source(&self) -> QuestionSource;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn results(&self) -> Arc<ResultsService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_source: QuestionSource,
    quiz_loop: Arc<QuizLoopService>,
    results: Arc<ResultsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_source: app.initial_source(),
            quiz_loop: app.quiz_loop(),
            results: app.results(),
        }
    }

    #[must_use]
    pub fn initial_source(&self) -> QuestionSource {
        self.initial_source
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
