//! Per-player browsing state: navigation history, bookmarks and the session table.

/// Recipe bookmarks and bookmark collections.
pub mod bookmark;
/// Bounded backward/forward navigation stacks.
pub mod history;
/// Per-player session table.
pub mod sessions;

pub use bookmark::{Bookmark, BookmarkCollection, ServerBookmarkRegistry};
pub use history::{DEFAULT_MAX_ENTRIES, NavigationHistory, ReaderHistory};
pub use sessions::{PlayerSession, PlayerSessions};
