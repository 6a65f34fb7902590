use quiz_core::model::ResultPayload;
use storage::repository::ResultSlot;

/// Read side of the result handoff.
#[derive(Clone)]
pub struct ResultsService {
    results: ResultSlot,
}

impl ResultsService {
    #[must_use]
    pub fn new(results: ResultSlot) -> Self {
        Self { results }
    }

    /// Results of the most recently finished quiz.
    ///
    /// An empty slot, an unreadable store, or a payload that does not decode
    /// all read as `None`.
    pub async fn latest(&self) -> Option<ResultPayload> {
        match self.results.read().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unreadable result payload");
                None
            }
        }
    }
}
