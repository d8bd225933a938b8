use std::cmp::Ordering;

use async_trait::async_trait;
use marquee_model::{MediaItem, MediaPage, PageInfo, SortField, SortOrder};
use parking_lot::Mutex;

use super::CatalogApi;
use super::sample::sample_items;
use crate::error::{CatalogError, CatalogResult};
use crate::query::ListRequest;

/// Which endpoint a recorded call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    List,
    Search,
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<(CallKind, ListRequest)>,
    fail_next: Option<String>,
}

/// Catalog answered from a fixed item list: filter, sort, paginate.
#[derive(Debug)]
pub struct InMemoryCatalog {
    items: Vec<MediaItem>,
    recorder: Mutex<Recorder>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            recorder: Mutex::new(Recorder::default()),
        }
    }

    pub fn sample() -> Self {
        Self::new(sample_items())
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<(CallKind, ListRequest)> {
        self.recorder.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorder.lock().calls.len()
    }

    /// Make the next call fail with [`CatalogError::Unavailable`].
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.recorder.lock().fail_next = Some(reason.into());
    }

    /// Run the query without recording it.
    pub fn query(&self, request: &ListRequest) -> MediaPage {
        let mut matched: Vec<&MediaItem> =
            self.items.iter().filter(|item| matches(item, request)).collect();

        if let Some(field) = request.sort_by {
            let order = request.order.unwrap_or_default();
            matched.sort_by(|a, b| compare(a, b, field, order));
        }

        let info = PageInfo::new(
            request.page,
            request.page_size,
            matched.len() as u64,
        );
        let items = matched
            .into_iter()
            .skip(info.offset())
            .take(info.page_size as usize)
            .cloned()
            .collect();

        MediaPage::new(items, info)
    }

    fn record(&self, kind: CallKind, request: &ListRequest) -> CatalogResult<()> {
        let mut recorder = self.recorder.lock();
        recorder.calls.push((kind, request.clone()));
        match recorder.fail_next.take() {
            Some(reason) => Err(CatalogError::Unavailable(reason)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list(&self, request: &ListRequest) -> CatalogResult<MediaPage> {
        self.record(CallKind::List, request)?;
        Ok(self.query(request))
    }

    async fn search(&self, request: &ListRequest) -> CatalogResult<MediaPage> {
        if !request.is_search() {
            return Err(CatalogError::EmptySearch);
        }
        self.record(CallKind::Search, request)?;
        Ok(self.query(request))
    }
}

fn matches(item: &MediaItem, request: &ListRequest) -> bool {
    if let Some(media_type) = request.media_type
        && item.media_type != media_type
    {
        return false;
    }
    if let Some(status) = request.status
        && item.status != status
    {
        return false;
    }
    if let Some(year) = request.year
        && item.year != year
    {
        return false;
    }
    if let Some(rating) = request.min_rating
        && item.rating < rating
    {
        return false;
    }
    if let Some(genre) = &request.genre
        && !item.has_genre(genre)
    {
        return false;
    }
    if let Some(query) = &request.query {
        let needle = query.to_lowercase();
        let in_title = item.title.contains_ignore_case(query);
        let in_cast = item
            .cast
            .iter()
            .any(|member| member.name.to_lowercase().contains(&needle));
        if !in_title && !in_cast {
            return false;
        }
    }
    true
}

fn compare(a: &MediaItem, b: &MediaItem, field: SortField, order: SortOrder) -> Ordering {
    let primary = match field {
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Title => a.title.en.to_lowercase().cmp(&b.title.en.to_lowercase()),
    };
    let primary = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    // Ties keep a stable, order-independent sequence.
    primary.then_with(|| a.id.cmp(&b.id))
}
