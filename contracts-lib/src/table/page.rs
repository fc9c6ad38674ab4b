//! Pagination configuration and the pagination engine.

use std::fmt;

use serde::Serialize;
use serde::Serializer;

/// Pager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Current page, 1-based.
    pub current: usize,
    pub page_size: usize,
    /// Total shown in the pager, when the caller supplies one.
    pub total: Option<usize>,
    /// Total rows of an externally paged data source; `0` means unknown.
    pub total_rows: usize,
    pub page_size_options: Vec<usize>,
    pub show_size_changer: bool,
    pub show_quick_jumper: bool,
    /// Hides the pager when there is at most one page.
    pub hide_on_single_page: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 10,
            total: None,
            total_rows: 0,
            page_size_options: vec![10, 20, 50, 100],
            show_size_changer: false,
            show_quick_jumper: false,
            hide_on_single_page: false,
        }
    }
}

impl PaginationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_current(mut self, current: usize) -> Self {
        self.current = current;
        self
    }

    pub fn with_total_rows(mut self, total_rows: usize) -> Self {
        self.total_rows = total_rows;
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn with_size_changer(mut self) -> Self {
        self.show_size_changer = true;
        self
    }

    pub fn with_quick_jumper(mut self) -> Self {
        self.show_quick_jumper = true;
        self
    }

    pub fn hide_on_single_page(mut self) -> Self {
        self.hide_on_single_page = true;
        self
    }
}

/// Pagination of a table: off, or on with its settings.
///
/// Serializes to `false` when disabled and to the settings object otherwise,
/// which is the shape carried by change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    Disabled,
    Enabled(PaginationConfig),
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::Enabled(PaginationConfig::default())
    }
}

impl Pagination {
    pub fn config(&self) -> Option<&PaginationConfig> {
        match self {
            Pagination::Disabled => None,
            Pagination::Enabled(config) => Some(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Pagination::Enabled(_))
    }
}

impl Serialize for Pagination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pagination::Disabled => serializer.serialize_bool(false),
            Pagination::Enabled(config) => config.serialize(serializer),
        }
    }
}

/// Returns the 1-based `page` of `items` holding `page_size` items per page.
///
/// The window is `[(page - 1) * page_size, page * page_size)`, clipped to the
/// input; a page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}

/// Number of pages needed for `total` rows, rounding up.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// One entry of the pager's page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// Gap between the first page and the window around the current page.
    EllipsisBefore,
    /// Gap between the window around the current page and the last page.
    EllipsisAfter,
}

impl PageItem {
    /// Page number, with `-1` standing for an ellipsis.
    pub fn as_number(self) -> i64 {
        match self {
            PageItem::Page(n) => n as i64,
            PageItem::EllipsisBefore | PageItem::EllipsisAfter => -1,
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::EllipsisBefore | PageItem::EllipsisAfter => f.write_str("..."),
        }
    }
}

/// Page list shown by the pager.
///
/// Up to seven pages are listed in full. Beyond that the list keeps the
/// first and last page and a window of one page around `current`, with
/// ellipses for the gaps.
pub fn page_numbers(total_pages: usize, current: usize) -> Vec<PageItem> {
    if total_pages <= 7 {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::EllipsisBefore);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total_pages - 1);
    items.extend((start..=end).map(PageItem::Page));
    if current + 2 < total_pages {
        items.push(PageItem::EllipsisAfter);
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Rows shown on the current page, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageRange {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        if total == 0 || page_size == 0 {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        let first = page.saturating_sub(1).saturating_mul(page_size) + 1;
        let last = page.saturating_mul(page_size).min(total);
        if first > total {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        Self { first, last, total }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mostrando {}-{} de {} registros",
            self.first, self.last, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_window() {
        let rows: Vec<usize> = (1..=12).collect();
        assert_eq!(paginate(rows.clone(), 1, 5), [1, 2, 3, 4, 5]);
        assert_eq!(paginate(rows.clone(), 3, 5), [11, 12]);
        assert!(paginate(rows.clone(), 4, 5).is_empty());
        assert!(paginate(rows, 0, 5).len() == 5);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(3, 0), 0);
    }

    #[test]
    fn test_page_numbers_short() {
        let items = page_numbers(5, 2);
        assert_eq!(items.iter().map(|i| i.as_number()).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_numbers_middle() {
        let items: Vec<i64> = page_numbers(10, 5).into_iter().map(PageItem::as_number).collect();
        assert_eq!(items, [1, -1, 4, 5, 6, -1, 10]);
    }

    #[test]
    fn test_page_numbers_edges() {
        let start: Vec<i64> = page_numbers(10, 1).into_iter().map(PageItem::as_number).collect();
        assert_eq!(start, [1, 2, -1, 10]);
        let end: Vec<i64> = page_numbers(10, 10).into_iter().map(PageItem::as_number).collect();
        assert_eq!(end, [1, -1, 9, 10]);

        let numbers = |current| -> Vec<i64> {
            page_numbers(10, current).into_iter().map(PageItem::as_number).collect()
        };
        // Leading gap first appears at page 4.
        assert_eq!(numbers(3), [1, 2, 3, 4, -1, 10]);
        assert_eq!(numbers(4), [1, -1, 3, 4, 5, -1, 10]);
        // Trailing gap last appears at page 7.
        assert_eq!(numbers(7), [1, -1, 6, 7, 8, -1, 10]);
        assert_eq!(numbers(8), [1, -1, 7, 8, 9, 10]);
    }

    #[test]
    fn test_disabled_serializes_false() {
        assert_eq!(serde_json::to_value(Pagination::Disabled).unwrap(), serde_json::json!(false));
        let enabled = serde_json::to_value(Pagination::default()).unwrap();
        assert_eq!(enabled["pageSize"], 10);
        assert_eq!(enabled["current"], 1);
    }

    #[test]
    fn test_range_label() {
        assert_eq!(PageRange::new(3, 5, 12).to_string(), "Mostrando 11-12 de 12 registros");
        assert_eq!(PageRange::new(1, 10, 0), PageRange { first: 0, last: 0, total: 0 });
    }
}
