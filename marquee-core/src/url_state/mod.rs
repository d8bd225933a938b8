//! URL state store.
//!
//! The address bar's query string is the canonical, shareable state for
//! every browsing filter. [`UrlState`] keeps a parsed copy that is always
//! equal to the parse of the history's current location: mutations merge
//! into a full rewrite, replace the history entry, then notify subscribers
//! synchronously.

mod history;
mod params;

pub use history::{HistoryBackend, Location, MemoryHistory};
pub use params::QueryParams;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::signal::{Listeners, Subscription};

struct Inner {
    history: Arc<dyn HistoryBackend>,
    params: RwLock<QueryParams>,
    listeners: Listeners<QueryParams>,
}

/// Shared handle to the URL state. Cloning is cheap and every clone sees
/// the same state.
#[derive(Clone)]
pub struct UrlState {
    inner: Arc<Inner>,
}

impl UrlState {
    pub fn new(history: Arc<dyn HistoryBackend>) -> Self {
        let params = QueryParams::parse(&history.current().query);
        Self {
            inner: Arc::new(Inner {
                history,
                params: RwLock::new(params),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Convenience constructor over an in-memory history at `href`.
    pub fn in_memory(href: &str) -> (Self, Arc<MemoryHistory>) {
        let history = Arc::new(MemoryHistory::from_href(href));
        let state = Self::new(Arc::clone(&history) as Arc<dyn HistoryBackend>);
        (state, history)
    }

    pub fn get_param(&self, key: &str, default: &str) -> String {
        self.inner
            .params
            .read()
            .get(key)
            .unwrap_or(default)
            .to_string()
    }

    pub fn get_all_params(&self) -> BTreeMap<String, String> {
        self.inner.params.read().to_map()
    }

    pub fn snapshot(&self) -> QueryParams {
        self.inner.params.read().clone()
    }

    pub fn location(&self) -> Location {
        self.inner.history.current()
    }

    /// Merge `updates` into the query string, rewrite the current history
    /// entry and broadcast the new state.
    pub fn update_params<I, K>(&self, updates: I)
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let snapshot = {
            let mut params = self.inner.params.write();
            let mut next = params.clone();
            next.merge(updates);

            let current = self.inner.history.current();
            let location = Location::new(current.path, next.to_query_string());
            debug!("URL state rewrite -> {}", location);
            self.inner.history.replace(location);

            *params = next;
            params.clone()
        };

        self.inner.listeners.emit(&snapshot);
    }

    /// Navigate to a new entry (e.g. following a link) and broadcast.
    pub fn navigate(&self, location: Location) {
        self.inner.history.push(location);
        self.sync_from_history();
    }

    /// Re-parse from the history's current entry, as after a back/forward
    /// navigation, and broadcast.
    pub fn sync_from_history(&self) {
        let snapshot = {
            let mut params = self.inner.params.write();
            *params = QueryParams::parse(&self.inner.history.current().query);
            params.clone()
        };
        self.inner.listeners.emit(&snapshot);
    }

    /// Observe every change. Handlers get the full new snapshot and are
    /// expected to derive their own view from it.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&QueryParams) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(handler)
    }
}

impl fmt::Debug for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlState")
            .field("location", &self.inner.history.current().to_string())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

/// Build a `Some` update value from anything displayable.
pub fn set(value: impl ToString) -> Option<String> {
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn update_params_preserves_unrelated_keys() {
        let (state, history) = UrlState::in_memory("/en/media?ref=home&page=4");
        state.update_params([("page", set(1)), ("sortBy", set("year"))]);

        assert_eq!(
            history.current().to_string(),
            "/en/media?ref=home&page=1&sortBy=year"
        );
        assert_eq!(state.get_param("ref", ""), "home");
        assert_eq!(state.get_param("missing", "fallback"), "fallback");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn none_deletes_keys() {
        let (state, history) = UrlState::in_memory("/en/media?q=dune&page=2");
        state.update_params([("q", None), ("page", None)]);
        assert_eq!(history.current().to_string(), "/en/media");
        assert!(state.get_all_params().is_empty());
    }

    #[test]
    fn subscribers_run_after_the_rewrite() {
        let (state, history) = UrlState::in_memory("/en/media");
        let observed = Arc::new(Mutex::new(Vec::new()));

        let _sub = {
            let observed = Arc::clone(&observed);
            let history = Arc::clone(&history);
            state.subscribe(move |params| {
                observed
                    .lock()
                    .push((params.to_query_string(), history.current().query));
            })
        };

        state.update_params([("order", set("ASC"))]);
        let observed = observed.lock();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].0, "order=ASC");
        assert_eq!(observed[0].1, "order=ASC");
    }

    #[test]
    fn empty_keys_never_reach_state_or_the_address_bar() {
        let (state, history) = UrlState::in_memory("/en/media?page=2");
        state.update_params([("", set("x"))]);

        assert_eq!(history.current().to_string(), "/en/media?page=2");
        assert_eq!(
            state.snapshot(),
            QueryParams::parse(&history.current().query)
        );
    }

    #[test]
    fn random_update_sequences_match_a_map_model() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        const KEYS: &[&str] = &["page", "q", "sortBy", "type", "ref", "", "a b", "名"];
        const VALUES: &[&str] = &["1", "", "dune", "a&b=c", "50%", "沙丘", "x+y"];

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (state, history) = UrlState::in_memory("/en/media?ref=home");
            let mut model = BTreeMap::from([("ref".to_string(), "home".to_string())]);

            for _ in 0..40 {
                let updates: Vec<(String, Option<String>)> = (0..rng.random_range(1..4))
                    .map(|_| {
                        let key = KEYS[rng.random_range(0..KEYS.len())].to_string();
                        let value = rng
                            .random_bool(0.7)
                            .then(|| VALUES[rng.random_range(0..VALUES.len())].to_string());
                        (key, value)
                    })
                    .collect();

                for (key, value) in &updates {
                    if key.is_empty() {
                        continue;
                    }
                    match value {
                        Some(value) => model.insert(key.clone(), value.clone()),
                        None => model.remove(key),
                    };
                }
                state.update_params(updates);

                assert_eq!(state.get_all_params(), model, "seed {seed}");
                assert_eq!(
                    QueryParams::parse(&history.current().query).to_map(),
                    model,
                    "seed {seed}: address bar drifted from state"
                );
                assert_eq!(history.len(), 1);
            }
        }
    }

    #[test]
    fn back_navigation_reparses_state() {
        let (state, history) = UrlState::in_memory("/en/media?page=1");
        state.navigate(Location::parse("/en/media?page=2"));
        assert_eq!(state.get_param("page", ""), "2");

        assert!(history.back());
        state.sync_from_history();
        assert_eq!(state.get_param("page", ""), "1");
    }
}
