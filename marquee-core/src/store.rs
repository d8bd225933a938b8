//! Media store: the reactive container for the page currently on screen.
//!
//! Consumers receive the store by injection (`Arc<dyn MediaStore>`) and
//! only the setters below mutate it. There is no optimistic update or
//! rollback; whoever writes last wins, which is why the orchestrator
//! sequences its writes.

use std::fmt;
use std::sync::Arc;

use marquee_model::{MediaItem, PageInfo};
use parking_lot::RwLock;

use crate::query::DEFAULT_PAGE_SIZE;
use crate::signal::{Listeners, Subscription};

/// Which field a setter touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    MediaList,
    Total,
    CurrentPage,
    PageSize,
    SearchQuery,
    Loading,
}

/// Point-in-time copy of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub media_list: Vec<MediaItem>,
    pub total: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub search_query: String,
    pub loading: bool,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            media_list: Vec::new(),
            total: 0,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_query: String::new(),
            loading: false,
        }
    }
}

impl StoreSnapshot {
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.current_page, self.page_size, self.total)
    }
}

/// Typed getters and setters over the displayed result page.
pub trait MediaStore: Send + Sync + fmt::Debug {
    fn snapshot(&self) -> StoreSnapshot;

    fn media_list(&self) -> Vec<MediaItem> {
        self.snapshot().media_list
    }

    fn total(&self) -> u64 {
        self.snapshot().total
    }

    fn current_page(&self) -> u32 {
        self.snapshot().current_page
    }

    fn page_size(&self) -> u32 {
        self.snapshot().page_size
    }

    fn search_query(&self) -> String {
        self.snapshot().search_query
    }

    fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    fn page_info(&self) -> PageInfo {
        self.snapshot().page_info()
    }

    fn set_media_list(&self, items: Vec<MediaItem>);
    fn set_total(&self, total: u64);
    fn set_current_page(&self, page: u32);
    fn set_page_size(&self, page_size: u32);
    fn set_search_query(&self, query: String);
    fn set_loading(&self, loading: bool);

    fn subscribe(
        &self,
        handler: Box<dyn Fn(&StoreChange) + Send + Sync>,
    ) -> Subscription;
}

/// Shared, lock-protected [`MediaStore`].
pub struct CatalogStore {
    state: RwLock<StoreSnapshot>,
    listeners: Listeners<StoreChange>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreSnapshot::default()),
            listeners: Listeners::new(),
        }
    }

    pub fn shared() -> Arc<dyn MediaStore> {
        Arc::new(Self::new())
    }

    fn write(&self, change: StoreChange, apply: impl FnOnce(&mut StoreSnapshot)) {
        apply(&mut self.state.write());
        self.listeners.emit(&change);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStore for CatalogStore {
    fn snapshot(&self) -> StoreSnapshot {
        self.state.read().clone()
    }

    fn total(&self) -> u64 {
        self.state.read().total
    }

    fn current_page(&self) -> u32 {
        self.state.read().current_page
    }

    fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    fn set_media_list(&self, items: Vec<MediaItem>) {
        self.write(StoreChange::MediaList, |s| s.media_list = items);
    }

    fn set_total(&self, total: u64) {
        self.write(StoreChange::Total, |s| s.total = total);
    }

    fn set_current_page(&self, page: u32) {
        self.write(StoreChange::CurrentPage, |s| s.current_page = page.max(1));
    }

    fn set_page_size(&self, page_size: u32) {
        self.write(StoreChange::PageSize, |s| s.page_size = page_size.max(1));
    }

    fn set_search_query(&self, query: String) {
        self.write(StoreChange::SearchQuery, |s| s.search_query = query);
    }

    fn set_loading(&self, loading: bool) {
        self.write(StoreChange::Loading, |s| s.loading = loading);
    }

    fn subscribe(
        &self,
        handler: Box<dyn Fn(&StoreChange) + Send + Sync>,
    ) -> Subscription {
        self.listeners.subscribe(handler)
    }
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CatalogStore")
            .field("media_count", &state.media_list.len())
            .field("total", &state.total)
            .field("current_page", &state.current_page)
            .field("loading", &state.loading)
            .field("subscriber_count", &self.listeners.len())
            .finish()
    }
}
