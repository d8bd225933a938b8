use std::sync::Arc;

use tracing::debug;

use crate::orchestrator::{FetchOutcome, Orchestrator};
use crate::url_state::set;

/// Free-text search input.
#[derive(Debug, Clone)]
pub struct SearchBox {
    orchestrator: Arc<Orchestrator>,
}

impl SearchBox {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Text currently reflected in the URL.
    pub fn value(&self) -> String {
        self.orchestrator.url_state().get_param("q", "")
    }

    /// Write `{q, page=1}` and search right away. Blank input clears `q`
    /// instead; the orchestrator then restores the unfiltered page when it
    /// processes the URL change.
    pub async fn submit(&self, text: &str) -> Option<FetchOutcome> {
        let query = text.trim();
        let url_state = self.orchestrator.url_state();

        if query.is_empty() {
            debug!("[SearchBox] Clearing search");
            url_state.update_params([("q", None), ("page", set(1))]);
            return None;
        }

        url_state.update_params([("q", set(query)), ("page", set(1))]);
        Some(self.orchestrator.search_now(query).await)
    }

    pub async fn clear(&self) -> Option<FetchOutcome> {
        self.submit("").await
    }
}
