use std::sync::Arc;

use marquee_model::PageInfo;

use crate::query::{FilterParams, MAX_PAGE_SIZE};
use crate::store::MediaStore;
use crate::url_state::{UrlState, set};

/// Page navigation. Reads the page bounds from the store and writes the
/// target page to the URL.
#[derive(Debug, Clone)]
pub struct Paginator {
    url_state: UrlState,
    store: Arc<dyn MediaStore>,
}

impl Paginator {
    pub fn new(url_state: UrlState, store: Arc<dyn MediaStore>) -> Self {
        Self { url_state, store }
    }

    pub fn info(&self) -> PageInfo {
        self.store.page_info()
    }

    pub fn current_page(&self) -> u32 {
        FilterParams::from_params(&self.url_state.snapshot()).page
    }

    pub fn go_to(&self, page: u32) {
        self.url_state.update_params([("page", set(page.max(1)))]);
    }

    /// Returns false when already on the last page.
    pub fn next(&self) -> bool {
        if !self.info().has_next {
            return false;
        }
        self.go_to(self.current_page() + 1);
        true
    }

    /// Returns false when already on the first page.
    pub fn prev(&self) -> bool {
        let current = self.current_page();
        if current <= 1 {
            return false;
        }
        self.go_to(current - 1);
        true
    }

    /// A new page size invalidates the current offset, so the page is
    /// reset in the same write.
    pub fn set_page_size(&self, page_size: u32) {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.url_state
            .update_params([("pageSize", set(page_size)), ("page", set(1))]);
    }
}
