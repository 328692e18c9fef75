//! Navigation history.
//!
//! # Role
//!
//! Remembers where a player came from so the recipe view can step back and forth.
//! Entries are reader snapshots; the caller hands over an owned copy, so later moves
//! of the live reader never change what the history holds.
//!
//! # Invariants
//!
//! - The backward stack never holds more than the configured capacity; the oldest
//!   entry is evicted first.
//!   - Enforced in: `NavigationHistory::push_backward`
//!   - Tested by: `tests::test_capacity_evicts_oldest`
//! - A navigation push never duplicates the newest backward entry and never records a
//!   move to the same place.
//!   - Enforced in: [`NavigationHistory::push_for_navigation`]
//!   - Tested by: `tests::test_push_suppresses_duplicates`
//! - Stepping backward keeps the forward stack; a fresh navigation clears it.
//!   - Tested by: `tests::test_new_navigation_clears_forward`

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use quern_index::MultiProcessRecipeReader;

/// Backward entries kept when no capacity is configured.
pub const DEFAULT_MAX_ENTRIES: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// History of recipe views.
pub type ReaderHistory = NavigationHistory<MultiProcessRecipeReader>;

/// Bounded backward stack and forward stack of snapshots.
#[derive(Debug, Clone)]
pub struct NavigationHistory<T> {
	backward: VecDeque<T>,
	forward: Vec<T>,
	capacity: NonZeroUsize,
}

impl<T> Default for NavigationHistory<T> {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_ENTRIES)
	}
}

impl<T: PartialEq> NavigationHistory<T> {
	/// Records a move from `current` to `target`.
	///
	/// Pushes `current` and clears the forward stack, unless `current` is already the
	/// newest backward entry or the move goes nowhere. Returns true if it pushed.
	pub fn push_for_navigation(&mut self, current: T, target: &T) -> bool {
		if &current == target || self.backward.back() == Some(&current) {
			return false;
		}
		self.push_backward(current);
		self.forward.clear();
		true
	}

	/// Steps back: returns the newest backward entry and remembers `current` as the way
	/// forward. Returns `None` and drops `current` if there is nothing behind.
	pub fn go_backward(&mut self, current: T) -> Option<T> {
		let previous = self.backward.pop_back()?;
		self.forward.push(current);
		Some(previous)
	}

	/// Steps forward: the mirror of [`Self::go_backward`].
	pub fn go_forward(&mut self, current: T) -> Option<T> {
		let next = self.forward.pop()?;
		self.push_backward(current);
		Some(next)
	}

	fn push_backward(&mut self, entry: T) {
		if self.backward.len() == self.capacity.get() {
			self.backward.pop_front();
		}
		self.backward.push_back(entry);
	}
}

impl<T> NavigationHistory<T> {
	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			backward: VecDeque::new(),
			forward: Vec::new(),
			capacity,
		}
	}

	pub fn can_go_backward(&self) -> bool {
		!self.backward.is_empty()
	}

	pub fn can_go_forward(&self) -> bool {
		!self.forward.is_empty()
	}

	pub fn backward_len(&self) -> usize {
		self.backward.len()
	}

	pub fn forward_len(&self) -> usize {
		self.forward.len()
	}

	pub fn capacity(&self) -> NonZeroUsize {
		self.capacity
	}

	/// Newest backward entry.
	pub fn peek_backward(&self) -> Option<&T> {
		self.backward.back()
	}

	/// Newest forward entry.
	pub fn peek_forward(&self) -> Option<&T> {
		self.forward.last()
	}

	pub fn clear(&mut self) {
		self.backward.clear();
		self.forward.clear();
	}
}

#[cfg(test)]
mod tests;
