//! Data fetch orchestrator.
//!
//! Bridges the URL state to the catalog backend: every URL change is
//! queued, then turned into a [`ListRequest`] derived from the current
//! snapshot, fetched, and written into the media store.
//!
//! Overlapping fetches are sequenced with [`RequestToken`]s. A response is
//! applied only if its token is still the newest one issued, so the latest
//! *issued* request wins regardless of the order responses arrive in.

mod sequence;

pub use sequence::{RequestSequencer, RequestToken};

use std::fmt;
use std::sync::Arc;

use marquee_model::MediaPage;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::CatalogApi;
use crate::query::{FilterParams, ListRequest};
use crate::signal::Subscription;
use crate::store::MediaStore;
use crate::url_state::UrlState;

/// What a load attempt did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Server-provided data was written without a network call.
    Seeded,
    /// A response was written.
    Applied(RequestToken),
    /// The cached pre-search page was written back without a network call.
    Restored,
    /// The request equals the one already issued; nothing to do.
    Skipped,
    /// A newer request was issued while this one was in flight.
    Stale(RequestToken),
    /// The backend rejected the request; prior state is untouched.
    Failed { token: RequestToken, reason: String },
}

#[derive(Debug, Default)]
struct Tracking {
    last_issued: Option<ListRequest>,
    /// Last non-search page written, restored when a search is cleared.
    browse_cache: Option<(ListRequest, MediaPage)>,
}

/// Reacts to URL changes by querying the catalog and updating the store.
pub struct Orchestrator {
    url_state: UrlState,
    store: Arc<dyn MediaStore>,
    api: Arc<dyn CatalogApi>,
    sequencer: RequestSequencer,
    tracking: Mutex<Tracking>,
    signals: AsyncMutex<mpsc::UnboundedReceiver<()>>,
    _subscription: Subscription,
}

impl Orchestrator {
    pub fn new(
        url_state: UrlState,
        store: Arc<dyn MediaStore>,
        api: Arc<dyn CatalogApi>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = url_state.subscribe(move |_| {
            let _ = tx.send(());
        });

        Self {
            url_state,
            store,
            api,
            sequencer: RequestSequencer::new(),
            tracking: Mutex::new(Tracking::default()),
            signals: AsyncMutex::new(rx),
            _subscription: subscription,
        }
    }

    pub fn url_state(&self) -> &UrlState {
        &self.url_state
    }

    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    /// Request derived from the current URL snapshot.
    pub fn current_request(&self) -> ListRequest {
        FilterParams::from_params(&self.url_state.snapshot()).to_request()
    }

    /// First load. Seeds the store from `initial` when the server already
    /// rendered the page; fetches when there is nothing to seed or the URL
    /// carries filter parameters the seed may not reflect.
    pub async fn mount(&self, initial: Option<MediaPage>) -> FetchOutcome {
        let carries_filters =
            FilterParams::carried_by(&self.url_state.snapshot());

        if let Some(page) = initial {
            let request = self.current_request();
            self.show(&request, &page);
            if !carries_filters {
                info!(
                    "[Orchestrator] Seeded {} items from initial data",
                    page.items.len()
                );
                let mut tracking = self.tracking.lock();
                tracking.last_issued = Some(request.clone());
                tracking.browse_cache = Some((request, page));
                return FetchOutcome::Seeded;
            }
        }

        self.refresh().await
    }

    /// Load whatever the URL currently describes.
    pub async fn refresh(&self) -> FetchOutcome {
        let request = self.current_request();
        self.load(request).await
    }

    /// Immediate search for the search box, without waiting for the URL
    /// signal round-trip. The queued signal is later skipped because the
    /// derived request is identical.
    pub async fn search_now(&self, query: &str) -> FetchOutcome {
        let mut request =
            self.current_request().with_query(Some(query.to_string()));
        request.page = 1;
        self.load(request).await
    }

    /// Drain queued URL signals and perform at most one refresh for them.
    pub async fn process_pending(&self) -> Option<FetchOutcome> {
        let pending = {
            let mut signals = self.signals.lock().await;
            let mut pending = false;
            while signals.try_recv().is_ok() {
                pending = true;
            }
            pending
        };

        if pending {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Refresh on every URL signal until `cancel` fires. The signal source
    /// lives as long as the orchestrator, so cancellation (or dropping the
    /// future) is the only way out.
    pub async fn run(&self, cancel: CancellationToken) {
        loop {
            let received = {
                let mut signals = self.signals.lock().await;
                let first = tokio::select! {
                    _ = cancel.cancelled() => break,
                    first = signals.recv() => first,
                };
                // Coalesce bursts into a single refresh.
                while signals.try_recv().is_ok() {}
                first
            };

            if received.is_none() {
                debug!("[Orchestrator] URL signal channel closed");
                break;
            }
            self.refresh().await;
        }
        debug!("[Orchestrator] Stopped following URL changes");
    }

    async fn load(&self, request: ListRequest) -> FetchOutcome {
        let token = {
            let mut tracking = self.tracking.lock();
            if tracking.last_issued.as_ref() == Some(&request) {
                debug!("[Orchestrator] Request unchanged, skipping fetch");
                return FetchOutcome::Skipped;
            }

            let token = self.sequencer.issue();
            tracking.last_issued = Some(request.clone());

            let cached = tracking
                .browse_cache
                .as_ref()
                .filter(|(key, _)| *key == request)
                .map(|(_, page)| page.clone());
            if let Some(page) = cached {
                debug!("[Orchestrator] Restoring cached page {}", page.info.page);
                self.show(&request, &page);
                return FetchOutcome::Restored;
            }

            token
        };

        self.store.set_loading(true);
        let result = if request.is_search() {
            self.api.search(&request).await
        } else {
            self.api.list(&request).await
        };

        match result {
            Ok(page) => {
                let mut tracking = self.tracking.lock();
                if !self.sequencer.is_latest(token) {
                    debug!(
                        "[Orchestrator] Discarding stale response for token {}",
                        token.value()
                    );
                    return FetchOutcome::Stale(token);
                }
                self.show(&request, &page);
                if !request.is_search() {
                    tracking.browse_cache = Some((request, page));
                }
                FetchOutcome::Applied(token)
            }
            Err(err) => {
                warn!("[Orchestrator] Catalog request failed: {}", err);
                let mut tracking = self.tracking.lock();
                if self.sequencer.is_latest(token) {
                    // Allow re-triggering the same action to retry.
                    tracking.last_issued = None;
                    self.store.set_loading(false);
                }
                FetchOutcome::Failed {
                    token,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn show(&self, request: &ListRequest, page: &MediaPage) {
        self.store.set_media_list(page.items.clone());
        self.store.set_total(page.info.total);
        self.store.set_current_page(page.info.page);
        self.store.set_page_size(page.info.page_size);
        self.store
            .set_search_query(request.query.clone().unwrap_or_default());
        self.store.set_loading(false);
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("url_state", &self.url_state)
            .field("store", &self.store)
            .field("api", &self.api)
            .field("latest_token", &self.sequencer.latest())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryCatalog;
    use crate::store::CatalogStore;
    use crate::url_state::set;

    fn setup(href: &str) -> (Orchestrator, Arc<InMemoryCatalog>) {
        let (url_state, _history) = UrlState::in_memory(href);
        let api = Arc::new(InMemoryCatalog::sample());
        let orchestrator = Orchestrator::new(
            url_state,
            CatalogStore::shared(),
            Arc::clone(&api) as Arc<dyn CatalogApi>,
        );
        (orchestrator, api)
    }

    #[tokio::test]
    async fn mount_without_initial_data_fetches() {
        let (orchestrator, api) = setup("/en/media");
        let outcome = orchestrator.mount(None).await;

        assert!(matches!(outcome, FetchOutcome::Applied(_)));
        assert_eq!(api.call_count(), 1);
        assert_eq!(orchestrator.store().media_list().len(), 12);
        assert_eq!(orchestrator.store().total(), 16);
    }

    #[tokio::test]
    async fn run_follows_url_changes_until_cancelled() {
        let (orchestrator, api) = setup("/en/media");
        let orchestrator = Arc::new(orchestrator);
        orchestrator.mount(None).await;

        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let orchestrator = Arc::clone(&orchestrator);
            let cancel = cancel.clone();
            async move { orchestrator.run(cancel).await }
        });

        orchestrator.url_state().update_params([("page", set(2))]);
        while orchestrator.store().current_page() != 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(api.call_count(), 2);

        cancel.cancel();
        task.await.unwrap();

        orchestrator.url_state().update_params([("page", set(3))]);
        tokio::task::yield_now().await;
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn mount_with_filters_refetches_over_the_seed() {
        let (orchestrator, api) = setup("/en/media?type=tv-show");
        let seed = api.query(&ListRequest::default());

        let outcome = orchestrator.mount(Some(seed)).await;

        assert!(matches!(outcome, FetchOutcome::Applied(_)));
        assert_eq!(api.call_count(), 1);
        assert!(orchestrator.store().media_list().iter().all(|item| {
            item.media_type == marquee_model::MediaType::TvShow
        }));
    }

    #[tokio::test]
    async fn failure_keeps_prior_state_and_allows_retry() {
        let (orchestrator, api) = setup("/en/media");
        orchestrator.mount(None).await;
        let before = orchestrator.store().snapshot();

        api.fail_next("backend down");
        orchestrator.url_state().update_params([("page", set(2))]);
        let outcome = orchestrator.process_pending().await;
        assert!(matches!(outcome, Some(FetchOutcome::Failed { .. })));

        let after = orchestrator.store().snapshot();
        assert_eq!(after.media_list, before.media_list);
        assert!(!after.loading);

        let retried = orchestrator.refresh().await;
        assert!(matches!(retried, FetchOutcome::Applied(_)));
        assert_eq!(orchestrator.store().current_page(), 2);
    }

    #[tokio::test]
    async fn bursts_of_url_changes_coalesce() {
        let (orchestrator, api) = setup("/en/media");
        orchestrator.mount(None).await;

        let url = orchestrator.url_state().clone();
        url.update_params([("sortBy", set("rating"))]);
        url.update_params([("order", set("ASC"))]);
        url.update_params([("page", set(2))]);

        assert!(orchestrator.process_pending().await.is_some());
        assert!(orchestrator.process_pending().await.is_none());
        assert_eq!(api.call_count(), 2);
    }
}
