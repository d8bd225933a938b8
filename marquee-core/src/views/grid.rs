use std::sync::Arc;

use marquee_model::{Locale, MediaId, MediaStatus, MediaType};

use crate::i18n::Strings;
use crate::store::MediaStore;

/// One rendered card of the result grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: MediaId,
    pub title: String,
    pub year: u16,
    pub rating: f32,
    pub media_type: MediaType,
    pub status: MediaStatus,
    pub poster: String,
}

/// Read-only projection of the store for display.
#[derive(Debug, Clone)]
pub struct GridView {
    store: Arc<dyn MediaStore>,
}

impl GridView {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    pub fn rows(&self, locale: Locale) -> Vec<GridRow> {
        self.store
            .media_list()
            .into_iter()
            .map(|item| GridRow {
                title: item.title.get(locale).to_string(),
                id: item.id,
                year: item.year,
                rating: item.rating,
                media_type: item.media_type,
                status: item.status,
                poster: item.poster,
            })
            .collect()
    }

    /// Footer text, or the loading/empty placeholder.
    pub fn status_line(&self, strings: &Strings) -> String {
        let snapshot = self.store.snapshot();
        if snapshot.loading {
            return strings.loading.to_string();
        }
        if snapshot.media_list.is_empty() {
            return strings.empty_results.to_string();
        }
        strings.page_label(&snapshot.page_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::sample_items;
    use crate::i18n::{EN, ZH};
    use crate::store::CatalogStore;

    #[test]
    fn rows_use_the_requested_locale() {
        let store = CatalogStore::shared();
        store.set_media_list(sample_items().into_iter().take(2).collect());
        store.set_total(16);
        let grid = GridView::new(Arc::clone(&store));

        let titles: Vec<String> =
            grid.rows(Locale::Zh).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["沙丘", "沙丘2"]);
        assert_eq!(grid.status_line(&EN), "Page 1 of 2 (16 titles)");
    }

    #[test]
    fn empty_and_loading_placeholders() {
        let store = CatalogStore::shared();
        let grid = GridView::new(Arc::clone(&store));
        assert_eq!(grid.status_line(&ZH), ZH.empty_results);

        store.set_loading(true);
        assert_eq!(grid.status_line(&EN), EN.loading);
    }
}
