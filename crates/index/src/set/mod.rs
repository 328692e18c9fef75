//! Ordered recipe set for one process.
//!
//! # Role
//!
//! Holds every indexed recipe handled by one process, ordered by recipe key, and
//! answers the neighbour queries readers use to step forward and backward.
//!
//! # Concurrency
//!
//! The recipes live in an immutable `BTreeMap` snapshot behind an `ArcSwap`. Readers
//! load the current snapshot without locking; writers publish a modified copy with a
//! compare-and-swap loop. A reader therefore sees a recipe either fully present or
//! absent, never a partial entry.
//!
//! # Invariants
//!
//! - Every member is handled by the set's process.
//!   - Enforced in: `ProcessRecipeSet::add`, `ProcessRecipeSet::add_all`
//!   - Tested by: `tests::test_add_rejects_foreign_recipe`

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::{Key, RecipeRef};
use quern_registry::ProcessRef;

/// Recipes keyed and ordered by recipe key.
pub type RecipeTree = BTreeMap<Key, RecipeRef>;

/// Thread-safe ordered set of the recipes of one process.
pub struct ProcessRecipeSet {
	process: ProcessRef,
	recipes: ArcSwap<RecipeTree>,
}

impl ProcessRecipeSet {
	pub fn new(process: ProcessRef) -> Self {
		Self {
			process,
			recipes: ArcSwap::from_pointee(RecipeTree::new()),
		}
	}

	pub fn process(&self) -> &ProcessRef {
		&self.process
	}

	/// Inserts `recipe`, replacing any recipe with the same key.
	///
	/// Returns false and leaves the set unchanged if the process does not handle the recipe.
	pub(crate) fn add(&self, recipe: RecipeRef) -> bool {
		if !self.process.can_handle(&*recipe) {
			return false;
		}
		self.recipes.rcu(|current| {
			let mut next = RecipeTree::clone(current);
			next.insert(recipe.key().clone(), recipe.clone());
			next
		});
		true
	}

	/// Inserts every handled recipe with a single publication. Returns how many were accepted.
	pub(crate) fn add_all(&self, recipes: impl IntoIterator<Item = RecipeRef>) -> usize {
		let accepted: Vec<RecipeRef> = recipes
			.into_iter()
			.filter(|r| self.process.can_handle(&**r))
			.collect();
		if accepted.is_empty() {
			return 0;
		}
		self.recipes.rcu(|current| {
			let mut next = RecipeTree::clone(current);
			next.extend(accepted.iter().map(|r| (r.key().clone(), r.clone())));
			next
		});
		accepted.len()
	}

	pub(crate) fn remove(&self, key: &Key) -> Option<RecipeRef> {
		if !self.contains(key) {
			return None;
		}
		let mut removed = None;
		self.recipes.rcu(|current| {
			let mut next = RecipeTree::clone(current);
			removed = next.remove(key);
			next
		});
		removed
	}

	pub fn contains(&self, key: &Key) -> bool {
		self.recipes.load().contains_key(key)
	}

	pub fn get(&self, key: &Key) -> Option<RecipeRef> {
		self.recipes.load().get(key).cloned()
	}

	pub fn first(&self) -> Option<RecipeRef> {
		self.recipes.load().values().next().cloned()
	}

	pub fn last(&self) -> Option<RecipeRef> {
		self.recipes.load().values().next_back().cloned()
	}

	/// Smallest recipe strictly after `key`.
	pub fn higher(&self, key: &Key) -> Option<RecipeRef> {
		self.recipes
			.load()
			.range::<Key, _>((Bound::Excluded(key), Bound::Unbounded))
			.next()
			.map(|(_, r)| r.clone())
	}

	/// Largest recipe strictly before `key`.
	pub fn lower(&self, key: &Key) -> Option<RecipeRef> {
		self.recipes
			.load()
			.range::<Key, _>(..key)
			.next_back()
			.map(|(_, r)| r.clone())
	}

	pub fn len(&self) -> usize {
		self.recipes.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipes.load().is_empty()
	}

	/// Current contents as an immutable snapshot.
	pub fn snapshot(&self) -> Arc<RecipeTree> {
		self.recipes.load_full()
	}

	/// Independent set holding the current contents.
	///
	/// Later changes to either set are not visible in the other.
	pub fn detached(&self) -> Self {
		Self {
			process: Arc::clone(&self.process),
			recipes: ArcSwap::new(self.recipes.load_full()),
		}
	}
}

/// Same process and the same recipe keys.
impl PartialEq for ProcessRecipeSet {
	fn eq(&self, other: &Self) -> bool {
		if self.process != other.process {
			return false;
		}
		let (a, b) = (self.recipes.load(), other.recipes.load());
		Arc::ptr_eq(&a, &b) || (a.len() == b.len() && a.keys().eq(b.keys()))
	}
}

impl Eq for ProcessRecipeSet {}

impl std::fmt::Debug for ProcessRecipeSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProcessRecipeSet")
			.field("process", self.process.key())
			.field("recipes", &self.recipes.load().keys().collect::<Vec<_>>())
			.finish()
	}
}
