use std::ops::{Range, RangeInclusive};

pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// One page of a result set held entirely in memory. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(current_page: usize, page_size: usize, total: usize) -> Self {
        Self {
            current_page,
            page_size,
            total,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Indices of the records on the current page, clamped to the result set.
    pub fn range(&self) -> Range<usize> {
        let end = self.current_page.saturating_mul(self.page_size);
        let start = end.saturating_sub(self.page_size);
        start.min(self.total)..end.min(self.total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    pub fn contains_page(&self, page: usize) -> bool {
        (1..=self.total_pages()).contains(&page)
    }

    pub fn previous_disabled(&self) -> bool {
        self.current_page == 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current_page == self.total_pages()
    }

    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    /// "Showing a-b of n players", with 1-based inclusive bounds.
    pub fn summary(&self) -> String {
        let range = self.range();
        format!(
            "Showing {}-{} of {} players",
            range.start + 1,
            range.end,
            self.total
        )
    }
}
