use indexmap::IndexSet;
use parking_lot::RwLock;

use super::Bookmark;

/// Insertion-ordered set of bookmarks, shareable across threads.
#[derive(Debug, Default)]
pub struct BookmarkCollection {
	entries: RwLock<IndexSet<Bookmark>>,
}

impl BookmarkCollection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns false if an equal bookmark is already present.
	pub fn add(&self, bookmark: Bookmark) -> bool {
		self.entries.write().insert(bookmark)
	}

	pub fn remove(&self, bookmark: &Bookmark) -> bool {
		self.entries.write().shift_remove(bookmark)
	}

	/// Removes `bookmark` if present, adds it otherwise. Returns true if it is now present.
	pub fn toggle(&self, bookmark: Bookmark) -> bool {
		let mut entries = self.entries.write();
		if entries.shift_remove(&bookmark) {
			return false;
		}
		entries.insert(bookmark);
		true
	}

	pub fn contains(&self, bookmark: &Bookmark) -> bool {
		self.entries.read().contains(bookmark)
	}

	pub fn get(&self, position: usize) -> Option<Bookmark> {
		self.entries.read().get_index(position).cloned()
	}

	/// Snapshot of every bookmark in insertion order.
	pub fn list(&self) -> Vec<Bookmark> {
		self.entries.read().iter().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	pub fn clear(&self) {
		self.entries.write().clear();
	}
}

/// Bookmarks shared by every player on the server.
#[derive(Debug, Default)]
pub struct ServerBookmarkRegistry {
	bookmarks: BookmarkCollection,
}

impl ServerBookmarkRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&self, bookmark: Bookmark) -> bool {
		let grouping = bookmark.grouping().to_string();
		let added = self.bookmarks.add(bookmark);
		if added {
			tracing::debug!(%grouping, "server bookmark added");
		}
		added
	}

	pub fn remove(&self, bookmark: &Bookmark) -> bool {
		let removed = self.bookmarks.remove(bookmark);
		if removed {
			tracing::debug!(grouping = %bookmark.grouping(), "server bookmark removed");
		}
		removed
	}

	pub fn toggle(&self, bookmark: Bookmark) -> bool {
		let grouping = bookmark.grouping().to_string();
		let present = self.bookmarks.toggle(bookmark);
		tracing::debug!(%grouping, present, "server bookmark toggled");
		present
	}

	pub fn contains(&self, bookmark: &Bookmark) -> bool {
		self.bookmarks.contains(bookmark)
	}

	pub fn list(&self) -> Vec<Bookmark> {
		self.bookmarks.list()
	}

	pub fn len(&self) -> usize {
		self.bookmarks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bookmarks.is_empty()
	}

	pub fn clear(&self) {
		self.bookmarks.clear();
		tracing::debug!("server bookmarks cleared");
	}
}
