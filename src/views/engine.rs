//! Pure view derivation: substring filtering and pagination.

use crate::types::Mapping;
use serde::{Deserialize, Serialize};

/// Page sizes the presentation layer may select.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Page size a fresh view starts with.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One display slice of a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in input order.
    pub items: Vec<T>,

    /// 1-indexed page number that was requested.
    pub page: usize,

    /// Requested page size.
    pub page_size: usize,

    /// Total items across all pages (after filtering).
    pub total_items: usize,

    /// ceil(total_items / page_size); 0 when there are no items.
    pub total_pages: usize,
}

/// Case-insensitive substring filter over key and url.
///
/// A mapping is included if either field contains `query`; the empty
/// query includes everything. Input order is preserved.
pub fn filter_mappings(mappings: &[Mapping], query: &str) -> Vec<Mapping> {
    if query.is_empty() {
        return mappings.to_vec();
    }

    let needle = query.to_lowercase();
    mappings
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&needle) || m.url.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Slice `items` into the requested 1-indexed page.
///
/// Never errors: a page past the end (or page 0) yields an empty slice
/// with the totals still filled in. Page-size membership in
/// [`PAGE_SIZE_OPTIONS`] is the view-state owner's job, not enforced here.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if total_items == 0 {
        0
    } else {
        (total_items + page_size - 1) / page_size
    };

    let slice = if page == 0 || page > total_pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: slice,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
