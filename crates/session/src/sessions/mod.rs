//! Per-player session table.
//!
//! Sessions are created on first use and dropped when the player leaves. Each session
//! owns its navigation history and personal bookmarks; the table hands out shared
//! handles so a session can be used without holding the table lock.

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::{BookmarkCollection, DEFAULT_MAX_ENTRIES, ReaderHistory};

/// Browsing state of one player.
#[derive(Debug)]
pub struct PlayerSession {
	player: Uuid,
	history: Mutex<ReaderHistory>,
	bookmarks: BookmarkCollection,
}

impl PlayerSession {
	pub fn new(player: Uuid, history_capacity: NonZeroUsize) -> Self {
		Self {
			player,
			history: Mutex::new(ReaderHistory::new(history_capacity)),
			bookmarks: BookmarkCollection::new(),
		}
	}

	pub fn player(&self) -> Uuid {
		self.player
	}

	/// Runs `f` with exclusive access to the navigation history.
	pub fn with_history<R>(&self, f: impl FnOnce(&mut ReaderHistory) -> R) -> R {
		f(&mut self.history.lock())
	}

	pub fn bookmarks(&self) -> &BookmarkCollection {
		&self.bookmarks
	}
}

/// Sessions of the players currently browsing.
#[derive(Debug)]
pub struct PlayerSessions {
	history_capacity: NonZeroUsize,
	sessions: Mutex<FxHashMap<Uuid, Arc<PlayerSession>>>,
}

impl Default for PlayerSessions {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_ENTRIES)
	}
}

impl PlayerSessions {
	/// New sessions keep at most `history_capacity` backward entries.
	pub fn new(history_capacity: NonZeroUsize) -> Self {
		Self {
			history_capacity,
			sessions: Mutex::new(FxHashMap::default()),
		}
	}

	pub fn get_or_create(&self, player: Uuid) -> Arc<PlayerSession> {
		let mut sessions = self.sessions.lock();
		let session = sessions.entry(player).or_insert_with(|| {
			tracing::debug!(%player, "session created");
			Arc::new(PlayerSession::new(player, self.history_capacity))
		});
		Arc::clone(session)
	}

	pub fn get(&self, player: Uuid) -> Option<Arc<PlayerSession>> {
		self.sessions.lock().get(&player).cloned()
	}

	/// Drops the player's session. Handles already given out stay usable.
	pub fn remove(&self, player: Uuid) -> Option<Arc<PlayerSession>> {
		let removed = self.sessions.lock().remove(&player);
		if removed.is_some() {
			tracing::debug!(%player, "session removed");
		}
		removed
	}

	pub fn count(&self) -> usize {
		self.sessions.lock().len()
	}

	pub fn clear_all(&self) {
		let mut sessions = self.sessions.lock();
		tracing::debug!(count = sessions.len(), "sessions cleared");
		sessions.clear();
	}
}
