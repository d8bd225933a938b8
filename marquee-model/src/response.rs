//! Normalization of the backend's list payloads.
//!
//! Depending on the endpoint the backend answers either
//! `{ data, total, page, totalPages, hasNext, hasPrev }` or
//! `{ items, meta: { total } }`. Both collapse into a [`MediaPage`]; absent,
//! `null` or malformed fields default to zero/empty and are re-derived from
//! the request.

use serde::Deserialize;

use crate::lenient::or_default;
use crate::media::MediaItem;
use crate::page::{MediaPage, PageInfo};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paged(PagedBody),
    WithMeta(MetaBody),
    Bare(Vec<MediaItem>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedBody {
    /// Required so the untagged match can tell the two shapes apart.
    #[serde(deserialize_with = "or_default")]
    pub data: Vec<MediaItem>,
    #[serde(default, deserialize_with = "or_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "or_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "or_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "or_default")]
    pub has_next: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub has_prev: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaBody {
    #[serde(deserialize_with = "or_default")]
    pub items: Vec<MediaItem>,
    #[serde(default, deserialize_with = "or_default")]
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(deserialize_with = "or_default")]
    pub total: u64,
    #[serde(deserialize_with = "or_default")]
    pub page: u32,
}

impl ListResponse {
    /// Collapse into a page, using the requested page/size when the body
    /// leaves them out.
    pub fn into_page(self, requested_page: u32, page_size: u32) -> MediaPage {
        let (items, total, page) = match self {
            ListResponse::Paged(body) => (body.data, body.total, body.page),
            ListResponse::WithMeta(body) => {
                (body.items, body.meta.total, body.meta.page)
            }
            ListResponse::Bare(items) => (items, 0, 0),
        };

        let page = if page == 0 { requested_page } else { page };
        // A body without a total still tells us at least this much exists.
        let floor = PageInfo::new(page, page_size, 0).offset() + items.len();
        let total = total.max(floor as u64);

        MediaPage::new(items, PageInfo::new(page, page_size, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_paged_shape() {
        let raw = r#"{"data":[{"id":"1"},{"id":"2"}],"total":14,"page":2,"totalPages":2,"hasNext":false,"hasPrev":true}"#;
        let page = serde_json::from_str::<ListResponse>(raw)
            .unwrap()
            .into_page(1, 12);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.info.page, 2);
        assert_eq!(page.info.total, 14);
        assert!(page.info.has_prev);
    }

    #[test]
    fn normalizes_meta_shape() {
        let raw = r#"{"items":[{"id":"9"}],"meta":{"total":40}}"#;
        let page = serde_json::from_str::<ListResponse>(raw)
            .unwrap()
            .into_page(3, 12);
        assert_eq!(page.info.page, 3);
        assert_eq!(page.info.total, 40);
        assert_eq!(page.info.total_pages, 4);
    }

    #[test]
    fn missing_totals_default_to_what_was_returned() {
        let raw = r#"{"items":[{"id":"1"},{"id":"2"}]}"#;
        let page = serde_json::from_str::<ListResponse>(raw)
            .unwrap()
            .into_page(1, 12);
        assert_eq!(page.info.total, 2);
        assert!(!page.info.has_next);

        let bare = serde_json::from_str::<ListResponse>("[]")
            .unwrap()
            .into_page(1, 12);
        assert!(bare.is_empty());
        assert_eq!(bare.info.total, 0);
    }

    #[test]
    fn null_and_malformed_fields_fall_back_to_defaults() {
        let raw = r#"{"data":[{"id":1,"title":{"en":"Dune","zh":null},"rating":null,"year":2021,"genres":null,"type":"documentary"}],"total":null,"page":"2"}"#;
        let page = serde_json::from_str::<ListResponse>(raw)
            .unwrap()
            .into_page(1, 12);

        let item = &page.items[0];
        assert_eq!(item.id.as_str(), "1");
        assert_eq!(item.title.en, "Dune");
        assert_eq!(item.title.zh, "");
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.year, 2021);
        assert!(item.genres.is_empty());
        assert_eq!(item.media_type, crate::MediaType::Movie);
        assert_eq!(page.info.page, 1);
        assert_eq!(page.info.total, 1);
    }

    #[test]
    fn null_meta_and_items_collapse_to_an_empty_page() {
        let raw = r#"{"items":null,"meta":{"total":null}}"#;
        let page = serde_json::from_str::<ListResponse>(raw)
            .unwrap()
            .into_page(1, 12);
        assert!(page.is_empty());
        assert_eq!(page.info.total, 0);
    }
}
