//! View engine: pure filtering and pagination over collection snapshots,
//! plus the per-view state object the presentation layer drives.

pub mod engine;
pub mod state;

pub use engine::{filter_mappings, paginate, Page, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use state::ViewState;
