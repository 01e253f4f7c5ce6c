//! Pager — "view all", one page of lines at a time.
//!
//! The pager walks the whole document in pages of a fixed number of lines.
//! Each page is shown under a `view NNNN/MMMM` header until a key is
//! pressed. Paging never moves the edit cursor.

use std::ops::Range;

use tracing::debug;

use crate::status::EditError;

/// Position within a "view all" run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    total: usize,
    start: usize,
}

impl Pager {
    /// Start paging `total` lines, `page_size` per page.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingToDo`] if `page_size <= 0`.
    pub fn new(page_size: i64, total: usize) -> Result<Self, EditError> {
        if page_size <= 0 {
            return Err(EditError::NothingToDo);
        }
        let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);
        debug!(page_size, total, "view all");
        Ok(Self {
            page_size,
            total,
            start: 0,
        })
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Line indices shown on the current page.
    #[must_use]
    pub fn page(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.page_size).min(self.total)
    }

    /// `view NNNN/MMMM`: first line number on the page, total line count.
    #[must_use]
    pub fn header(&self) -> String {
        format!("view {:04}/{:04}", self.start + 1, self.total)
    }

    /// Move to the next page. Returns `false` when the last page has been
    /// shown and the pager is done.
    pub fn advance(&mut self) -> bool {
        let next = self.page().end;
        if next >= self.total {
            return false;
        }
        self.start = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_non_positive_page_size() {
        assert!(matches!(Pager::new(0, 5), Err(EditError::NothingToDo)));
        assert!(matches!(Pager::new(-3, 5), Err(EditError::NothingToDo)));
    }

    #[test]
    fn walks_pages_in_order() {
        let mut pager = Pager::new(20, 45).unwrap();
        assert_eq!(pager.page(), 0..20);
        assert_eq!(pager.header(), "view 0001/0045");

        assert!(pager.advance());
        assert_eq!(pager.page(), 20..40);
        assert_eq!(pager.header(), "view 0021/0045");

        assert!(pager.advance());
        assert_eq!(pager.page(), 40..45);
        assert!(!pager.advance());
        assert_eq!(pager.page(), 40..45);
    }

    #[test]
    fn exact_multiple_has_no_empty_trailing_page() {
        let mut pager = Pager::new(2, 4).unwrap();
        assert!(pager.advance());
        assert_eq!(pager.page(), 2..4);
        assert!(!pager.advance());
    }

    #[test]
    fn single_line_document_is_one_page() {
        let mut pager = Pager::new(20, 1).unwrap();
        assert_eq!(pager.page(), 0..1);
        assert!(!pager.advance());
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        let pager = Pager::new(i64::MAX, 3).unwrap();
        assert_eq!(pager.page(), 0..3);
    }
}
