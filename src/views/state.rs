//! Per-view state: query, page, and page size.

use crate::error::{ConsoleError, Result};
use crate::views::engine::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

/// Presentation state for one paginated view.
///
/// `page` and `page_size` are independent pieces of state, not derived
/// from each other. Changing the page size always resets the page to 1;
/// changing the query never does. That asymmetry is deliberate and is
/// relied on by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    query: String,
    page: usize,
    page_size: usize,
}

impl ViewState {
    /// Fresh view: no query, page 1, default page size.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Current filter query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-indexed page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the filter query. Leaves the page untouched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Navigate to a page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size. Always resets the page to 1.
    ///
    /// Sizes outside [`PAGE_SIZE_OPTIONS`] are rejected and leave the
    /// state unchanged.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConsoleError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
