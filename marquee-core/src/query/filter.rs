use marquee_model::{MediaStatus, MediaType, SortField, SortOrder};

use super::request::{
    DEFAULT_PAGE_SIZE, ListRequest, MAX_PAGE_SIZE, normalize_query,
};
use crate::url_state::QueryParams;

/// Query-string keys consumers recognize. Anything else is left alone.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "type", "sortBy", "order", "q", "page", "pageSize", "year", "rating",
    "status", "genre",
];

/// Typed projection of the URL state limited to [`RECOGNIZED_KEYS`].
/// Values that fail to parse are treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub media_type: Option<MediaType>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub query: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub year: Option<u16>,
    pub rating: Option<f32>,
    pub status: Option<MediaStatus>,
    pub genre: Option<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            media_type: None,
            sort_by: None,
            order: None,
            query: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            year: None,
            rating: None,
            status: None,
            genre: None,
        }
    }
}

impl FilterParams {
    pub fn from_params(params: &QueryParams) -> Self {
        let parse = |key: &str| params.get(key).map(str::trim).filter(|v| !v.is_empty());

        Self {
            media_type: parse("type").and_then(|v| v.parse().ok()),
            sort_by: parse("sortBy").and_then(|v| v.parse().ok()),
            order: parse("order").and_then(|v| v.parse().ok()),
            query: normalize_query(parse("q").map(str::to_string)),
            page: parse("page")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|p| *p >= 1)
                .unwrap_or(1),
            page_size: parse("pageSize")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|s| *s >= 1)
                .map(|s| s.min(MAX_PAGE_SIZE))
                .unwrap_or(DEFAULT_PAGE_SIZE),
            year: parse("year").and_then(|v| v.parse().ok()),
            rating: parse("rating")
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|r| r.is_finite()),
            status: parse("status").and_then(|v| v.parse().ok()),
            genre: parse("genre").map(str::to_string),
        }
    }

    /// True when the URL carries any recognized key.
    pub fn carried_by(params: &QueryParams) -> bool {
        RECOGNIZED_KEYS.iter().any(|key| params.contains(key))
    }

    pub fn to_request(&self) -> ListRequest {
        ListRequest {
            page: self.page,
            page_size: self.page_size,
            query: self.query.clone(),
            sort_by: self.sort_by,
            order: self.order,
            media_type: self.media_type,
            genre: self.genre.clone(),
            year: self.year,
            min_rating: self.rating,
            status: self.status,
        }
    }
}
