//! Page navigation: the current page index, always within `[1, page_count]`.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::ops::RangeInclusive;

/// Tracks the current page of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: u32,
    page_count: u32,
}

impl Navigator {
    /// Start on page 1. Returns `None` for a document with no pages.
    #[must_use]
    pub fn new(page_count: u32) -> Option<Self> {
        if page_count == 0 {
            return None;
        }
        Some(Self { current: 1, page_count })
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Jump to page `n`, clamped to `[1, page_count]`.
    ///
    /// Returns `true` if the current page changed.
    pub fn go_to_page(&mut self, n: i64) -> bool {
        let target = n.clamp(1, i64::from(self.page_count));
        let target = u32::try_from(target).unwrap_or(self.current);
        if target == self.current {
            return false;
        }
        tracing::debug!(from = self.current, to = target, "page change");
        self.current = target;
        true
    }

    /// Advance one page; stays on the last page.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(i64::from(self.current) + 1)
    }

    /// Go back one page; stays on page 1.
    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(i64::from(self.current) - 1)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current < self.page_count
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.current > 1
    }

    /// Every page index, for a page-jump selector.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.page_count
    }
}
