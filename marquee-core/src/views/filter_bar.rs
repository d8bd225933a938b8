use marquee_model::{MediaStatus, MediaType, SortField, SortOption, SortOrder};

use crate::query::FilterParams;
use crate::url_state::{UrlState, set};

/// URL keys the filter bar owns besides the sort pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Type,
    Genre,
    Year,
    Rating,
    Status,
}

impl FilterKey {
    pub fn all() -> &'static [FilterKey] {
        &[
            FilterKey::Type,
            FilterKey::Genre,
            FilterKey::Year,
            FilterKey::Rating,
            FilterKey::Status,
        ]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            FilterKey::Type => "type",
            FilterKey::Genre => "genre",
            FilterKey::Year => "year",
            FilterKey::Rating => "rating",
            FilterKey::Status => "status",
        }
    }
}

/// Sort menu and filter selectors.
#[derive(Debug, Clone)]
pub struct FilterBar {
    url_state: UrlState,
}

impl FilterBar {
    pub fn new(url_state: UrlState) -> Self {
        Self { url_state }
    }

    pub fn current(&self) -> FilterParams {
        FilterParams::from_params(&self.url_state.snapshot())
    }

    /// The preset matching the URL, if a sort is active. A bare `sortBy`
    /// without `order` reads as descending.
    pub fn current_sort(&self) -> Option<SortOption> {
        let filters = self.current();
        filters.sort_by.map(|field| SortOption {
            field,
            order: filters.order.unwrap_or_default(),
        })
    }

    /// Writes exactly the `sortBy` and `order` keys.
    pub fn set_sort(&self, field: SortField, order: SortOrder) {
        self.url_state.update_params([
            ("sortBy", set(field.as_param())),
            ("order", set(order.as_param())),
        ]);
    }

    /// Set or clear one filter. Narrowing the result set always returns
    /// to the first page.
    pub fn set_filter(&self, key: FilterKey, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self.url_state
            .update_params([(key.as_param(), value), ("page", set(1))]);
    }

    pub fn set_media_type(&self, media_type: Option<MediaType>) {
        self.set_filter(FilterKey::Type, media_type.map(|t| t.as_param().to_string()));
    }

    pub fn set_status(&self, status: Option<MediaStatus>) {
        self.set_filter(FilterKey::Status, status.map(|s| s.as_param().to_string()));
    }

    pub fn set_genre(&self, genre: Option<&str>) {
        self.set_filter(FilterKey::Genre, genre.map(str::to_string));
    }

    pub fn set_year(&self, year: Option<u16>) {
        self.set_filter(FilterKey::Year, year.map(|y| y.to_string()));
    }

    pub fn set_min_rating(&self, rating: Option<f32>) {
        self.set_filter(FilterKey::Rating, rating.map(|r| r.to_string()));
    }

    /// Drop every filter and the sort, back to page one. Other keys
    /// (search text, page size, foreign parameters) survive.
    pub fn clear_filters(&self) {
        let mut updates: Vec<(&str, Option<String>)> = FilterKey::all()
            .iter()
            .map(|key| (key.as_param(), None))
            .collect();
        updates.push(("sortBy", None));
        updates.push(("order", None));
        updates.push(("page", set(1)));
        self.url_state.update_params(updates);
    }
}
