use crate::media::MediaItem;

/// Pagination metadata derived from the page, page size and total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages =
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    pub info: PageInfo,
}

impl MediaPage {
    pub fn new(items: Vec<MediaItem>, info: PageInfo) -> Self {
        Self { items, info }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_navigation_flags() {
        let info = PageInfo::new(2, 12, 30);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.offset(), 12);

        let last = PageInfo::new(3, 12, 30);
        assert!(!last.has_next);
    }

    #[test]
    fn huge_totals_saturate_the_page_count() {
        let info = PageInfo::new(1, 1, u64::MAX);
        assert_eq!(info.total_pages, u32::MAX);
        assert!(info.has_next);

        let info = PageInfo::new(1, 1, u64::from(u32::MAX) + 1);
        assert_eq!(info.total_pages, u32::MAX);
    }

    #[test]
    fn empty_total_has_no_pages() {
        let info = PageInfo::new(1, 12, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn zero_inputs_are_clamped() {
        let info = PageInfo::new(0, 0, 5);
        assert_eq!(info.page, 1);
        assert_eq!(info.page_size, 1);
        assert_eq!(info.total_pages, 5);
    }
}
