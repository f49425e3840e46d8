//! # Golinks
//!
//! In-memory management core for a key→URL redirect table with an audit
//! trail.
//!
//! ## Core Concepts
//!
//! - **Mappings**: Key-unique redirects, validated before every mutation
//! - **Activity**: Append-only audit records, one per accepted mutation
//! - **Views**: Deterministic filtered + paginated projections
//! - **Events**: Live mutation broadcast for the presentation layer
//!
//! ## Example
//!
//! ```
//! use golinks::{Console, ConsoleConfig, ViewState};
//!
//! let console = Console::new(ConsoleConfig::default());
//!
//! // Mutate; the audit record is appended automatically.
//! console.create_mapping("swe", "https://a.example")?;
//! console.update_mapping("swe", "https://b.example")?;
//!
//! // Derive a display slice.
//! let mut view = ViewState::new();
//! view.set_query("swe");
//! let page = console.mappings_view(&view);
//! assert_eq!(page.total_items, 1);
//! # Ok::<(), golinks::ConsoleError>(())
//! ```

pub mod audit;
pub mod console;
pub mod error;
pub mod events;
pub mod mappings;
pub mod storage;
pub mod types;
pub mod views;

// Re-exports
pub use audit::AuditLog;
pub use console::{Console, ConsoleConfig};
pub use error::{ConsoleError, FieldError, FieldErrors, Result};
pub use events::{ConsoleEvent, DropReason, EventBus, EventFilter, EventSubscription, SubscriberId};
pub use mappings::{MappingStore, MAX_KEY_CHARS, MAX_URL_CHARS};
pub use storage::{MemoryBackend, Snapshot, StorageBackend};
pub use types::*;
pub use views::{
    filter_mappings, paginate, Page, ViewState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
