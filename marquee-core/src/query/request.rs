use marquee_model::{MediaStatus, MediaType, SortField, SortOrder};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_QUERY_CHARS: usize = 100;

/// Parameter dialect for the two backend call sites. The list endpoint
/// takes `pageSize`/`order` (upper-case), search takes `limit`/`sortOrder`
/// (lower-case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    List,
    Search,
}

/// Typed request sent to the catalog backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub page: u32,
    pub page_size: u32,
    pub query: Option<String>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub media_type: Option<MediaType>,
    pub genre: Option<String>,
    pub year: Option<u16>,
    pub min_rating: Option<f32>,
    pub status: Option<MediaStatus>,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            query: None,
            sort_by: None,
            order: None,
            media_type: None,
            genre: None,
            year: None,
            min_rating: None,
            status: None,
        }
    }
}

impl ListRequest {
    pub fn builder() -> ListRequestBuilder {
        ListRequestBuilder::new()
    }

    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    /// Same request with the free-text query replaced.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = normalize_query(query);
        self
    }

    pub fn query_pairs(&self, style: QueryStyle) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];

        match style {
            QueryStyle::List => pairs.push(("pageSize", self.page_size.to_string())),
            QueryStyle::Search => pairs.push(("limit", self.page_size.to_string())),
        }
        if let Some(query) = &self.query {
            pairs.push(("q", query.clone()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_param().to_string()));
        }
        if let Some(order) = self.order {
            match style {
                QueryStyle::List => pairs.push(("order", order.as_param().to_string())),
                QueryStyle::Search => pairs.push((
                    "sortOrder",
                    order.as_param().to_ascii_lowercase(),
                )),
            }
        }
        if let Some(media_type) = self.media_type {
            pairs.push(("type", media_type.as_param().to_string()));
        }
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(rating) = self.min_rating {
            pairs.push(("rating", rating.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_param().to_string()));
        }

        pairs
    }
}

/// Trim, drop empty strings and cap at [`MAX_QUERY_CHARS`] characters.
pub fn normalize_query(query: Option<String>) -> Option<String> {
    let query = query?;
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_QUERY_CHARS).collect())
}

/// Fluent API for building list requests
#[derive(Debug, Clone, Default)]
pub struct ListRequestBuilder {
    request: ListRequest,
}

impl ListRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page number, 1-based; 0 is treated as 1
    pub fn page(mut self, page: u32) -> Self {
        self.request.page = page.max(1);
        self
    }

    /// Page size, clamped to `1..=100`
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.request.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.request.query = normalize_query(Some(text.into()));
        self
    }

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.request.sort_by = Some(field);
        self.request.order = Some(order);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.request.order = Some(order);
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.request.media_type = Some(media_type);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.request.genre = Some(genre.into());
        self
    }

    pub fn year(mut self, year: u16) -> Self {
        self.request.year = Some(year);
        self
    }

    pub fn min_rating(mut self, rating: f32) -> Self {
        self.request.min_rating = Some(rating);
        self
    }

    pub fn status(mut self, status: MediaStatus) -> Self {
        self.request.status = Some(status);
        self
    }

    pub fn build(self) -> ListRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_and_normalizes() {
        let request = ListRequest::builder()
            .page(0)
            .page_size(500)
            .search(format!("  {}  ", "x".repeat(150)))
            .build();

        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, MAX_PAGE_SIZE);
        assert_eq!(request.query.as_deref().map(str::len), Some(MAX_QUERY_CHARS));
    }

    #[test]
    fn blank_search_is_no_search() {
        let request = ListRequest::builder().search("   ").build();
        assert!(!request.is_search());
    }

    #[test]
    fn list_and_search_dialects() {
        let request = ListRequest::builder()
            .page(2)
            .page_size(24)
            .sort_by(SortField::Year, SortOrder::Asc)
            .search("dune")
            .build();

        let list = request.query_pairs(QueryStyle::List);
        assert!(list.contains(&("pageSize", "24".to_string())));
        assert!(list.contains(&("order", "ASC".to_string())));

        let search = request.query_pairs(QueryStyle::Search);
        assert!(search.contains(&("limit", "24".to_string())));
        assert!(search.contains(&("sortOrder", "asc".to_string())));
        assert!(search.contains(&("q", "dune".to_string())));
    }
}
