//! Per-locale string tables.
//!
//! Every locale provides the full [`Strings`] struct, so a missing
//! translation is a compile error rather than a runtime fallback. The
//! dotted-key [`Strings::lookup`] exists for callers that only have a key
//! (e.g. [`SortOption::label_key`]).

use marquee_model::{Locale, MediaStatus, MediaType, PageInfo, SortOption};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no string for key `{key}` in locale {}", .locale.code())]
pub struct MissingKey {
    pub key: String,
    pub locale: Locale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub locale: Locale,
    pub app_title: &'static str,
    pub search_placeholder: &'static str,
    pub filter_all: &'static str,
    pub filter_type: &'static str,
    pub filter_genre: &'static str,
    pub filter_status: &'static str,
    pub sort_label: &'static str,
    pub sort_rating_desc: &'static str,
    pub sort_rating_asc: &'static str,
    pub sort_year_desc: &'static str,
    pub sort_year_asc: &'static str,
    pub sort_title_asc: &'static str,
    pub sort_title_desc: &'static str,
    pub type_movie: &'static str,
    pub type_tv_show: &'static str,
    pub status_released: &'static str,
    pub status_ongoing: &'static str,
    pub status_upcoming: &'static str,
    pub empty_results: &'static str,
    pub loading: &'static str,
    /// `{page}`, `{pages}` and `{total}` are substituted.
    pub page_label: &'static str,
    /// `{count}` is substituted.
    pub monitor_update: &'static str,
    /// `{processed}` is substituted.
    pub sync_complete: &'static str,
}

pub static EN: Strings = Strings {
    locale: Locale::En,
    app_title: "Marquee",
    search_placeholder: "Search titles or cast",
    filter_all: "All",
    filter_type: "Type",
    filter_genre: "Genre",
    filter_status: "Status",
    sort_label: "Sort by",
    sort_rating_desc: "Highest rated",
    sort_rating_asc: "Lowest rated",
    sort_year_desc: "Newest",
    sort_year_asc: "Oldest",
    sort_title_asc: "Title A-Z",
    sort_title_desc: "Title Z-A",
    type_movie: "Movie",
    type_tv_show: "TV Show",
    status_released: "Released",
    status_ongoing: "Ongoing",
    status_upcoming: "Upcoming",
    empty_results: "No titles match the current filters",
    loading: "Loading...",
    page_label: "Page {page} of {pages} ({total} titles)",
    monitor_update: "{count} new updates from monitored sources",
    sync_complete: "Sync finished: {processed} items processed",
};

pub static ZH: Strings = Strings {
    locale: Locale::Zh,
    app_title: "影视库",
    search_placeholder: "搜索片名或演员",
    filter_all: "全部",
    filter_type: "类型",
    filter_genre: "题材",
    filter_status: "状态",
    sort_label: "排序",
    sort_rating_desc: "评分最高",
    sort_rating_asc: "评分最低",
    sort_year_desc: "最新上映",
    sort_year_asc: "最早上映",
    sort_title_asc: "片名 A-Z",
    sort_title_desc: "片名 Z-A",
    type_movie: "电影",
    type_tv_show: "剧集",
    status_released: "已上映",
    status_ongoing: "连载中",
    status_upcoming: "即将上映",
    empty_results: "没有符合条件的作品",
    loading: "加载中...",
    page_label: "第 {page} / {pages} 页（共 {total} 部）",
    monitor_update: "监控源有 {count} 条新更新",
    sync_complete: "同步完成：已处理 {processed} 项",
};

impl Strings {
    pub fn for_locale(locale: Locale) -> &'static Strings {
        match locale {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }

    /// Resolve a dotted key such as `sort.year.asc` or `type.movie`.
    pub fn lookup(&self, key: &str) -> Result<&'static str, MissingKey> {
        let value = match key {
            "app.title" => self.app_title,
            "search.placeholder" => self.search_placeholder,
            "filter.all" => self.filter_all,
            "filter.type" => self.filter_type,
            "filter.genre" => self.filter_genre,
            "filter.status" => self.filter_status,
            "sort.label" => self.sort_label,
            "sort.rating.desc" => self.sort_rating_desc,
            "sort.rating.asc" => self.sort_rating_asc,
            "sort.year.desc" => self.sort_year_desc,
            "sort.year.asc" => self.sort_year_asc,
            "sort.title.asc" => self.sort_title_asc,
            "sort.title.desc" => self.sort_title_desc,
            "type.movie" => self.type_movie,
            "type.tv-show" => self.type_tv_show,
            "status.released" => self.status_released,
            "status.ongoing" => self.status_ongoing,
            "status.upcoming" => self.status_upcoming,
            "results.empty" => self.empty_results,
            "results.loading" => self.loading,
            _ => {
                return Err(MissingKey {
                    key: key.to_string(),
                    locale: self.locale,
                });
            }
        };
        Ok(value)
    }

    pub fn sort_option(&self, option: SortOption) -> &'static str {
        use marquee_model::SortField::*;
        use marquee_model::SortOrder::*;
        match (option.field, option.order) {
            (Rating, Desc) => self.sort_rating_desc,
            (Rating, Asc) => self.sort_rating_asc,
            (Year, Desc) => self.sort_year_desc,
            (Year, Asc) => self.sort_year_asc,
            (Title, Asc) => self.sort_title_asc,
            (Title, Desc) => self.sort_title_desc,
        }
    }

    pub fn media_type(&self, media_type: MediaType) -> &'static str {
        match media_type {
            MediaType::Movie => self.type_movie,
            MediaType::TvShow => self.type_tv_show,
        }
    }

    pub fn status(&self, status: MediaStatus) -> &'static str {
        match status {
            MediaStatus::Released => self.status_released,
            MediaStatus::Ongoing => self.status_ongoing,
            MediaStatus::Upcoming => self.status_upcoming,
        }
    }

    pub fn page_label(&self, info: &PageInfo) -> String {
        fill(
            self.page_label,
            &[
                ("page", info.page.to_string()),
                ("pages", info.total_pages.max(1).to_string()),
                ("total", info.total.to_string()),
            ],
        )
    }

    pub fn monitor_update_message(&self, count: u64) -> String {
        fill(self.monitor_update, &[("count", count.to_string())])
    }

    pub fn sync_complete_message(&self, processed: u64) -> String {
        fill(self.sync_complete, &[("processed", processed.to_string())])
    }
}

fn fill(template: &str, values: &[(&str, String)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sort_option_has_a_label_in_every_locale() {
        for locale in Locale::all() {
            let strings = Strings::for_locale(*locale);
            for option in SortOption::all() {
                let by_key = strings.lookup(&option.label_key()).unwrap();
                assert_eq!(by_key, strings.sort_option(*option));
            }
        }
    }

    #[test]
    fn unknown_keys_are_reported() {
        let err = ZH.lookup("nav.home").unwrap_err();
        assert_eq!(err.key, "nav.home");
        assert_eq!(err.to_string(), "no string for key `nav.home` in locale zh");
    }

    #[test]
    fn templates_are_filled() {
        let info = PageInfo::new(2, 12, 16);
        assert_eq!(EN.page_label(&info), "Page 2 of 2 (16 titles)");
        assert_eq!(EN.monitor_update_message(3), "3 new updates from monitored sources");
        assert_eq!(ZH.sync_complete_message(5), "同步完成：已处理 5 项");
    }
}
