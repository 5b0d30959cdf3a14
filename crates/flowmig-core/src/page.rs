//! Paging for bounded list queries

use serde::{Deserialize, Serialize};

/// Offset/limit window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based offset into the result set
    pub first_result: usize,
    /// Maximum rows returned
    pub max_results: usize,
}

impl Page {
    /// Create new page window
    #[inline]
    #[must_use]
    pub fn new(first_result: usize, max_results: usize) -> Self {
        Self {
            first_result,
            max_results,
        }
    }

    /// First page of the given size
    #[inline]
    #[must_use]
    pub fn first(max_results: usize) -> Self {
        Self::new(0, max_results)
    }

    /// Apply this window to a slice
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.first_result.min(items.len());
        let end = start.saturating_add(self.max_results).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slice_within_bounds() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(Page::new(1, 2).slice(&items), &[2, 3]);
    }

    #[test]
    fn page_slice_past_end_is_empty() {
        let items = [1, 2];
        assert!(Page::new(5, 2).slice(&items).is_empty());
    }

    #[test]
    fn page_slice_truncates_at_end() {
        let items = [1, 2, 3];
        assert_eq!(Page::new(2, 10).slice(&items), &[3]);
    }
}
