//! Recipes grouped by process.
//!
//! # Role
//!
//! A [`MultiProcessRecipeMap`] is the result of one query: for every process with at
//! least one matching recipe it holds that process's [`ProcessRecipeSet`]. Processes
//! are ordered by the process total order, so readers step through them
//! deterministically.
//!
//! # Invariants
//!
//! - A map never exposes an empty set after a removal; the set is pruned.
//!   - Enforced in: `MultiProcessRecipeMap::remove_recipe`
//!   - Tested by: `tests::test_remove_prunes_empty_set`
//! - The grouping tag is fixed at construction.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::{Key, RecipeRef};
use quern_registry::ProcessRef;

use crate::{Grouping, ProcessRecipeSet};

/// Sets keyed and ordered by process.
pub type ProcessTree = BTreeMap<ProcessRef, Arc<ProcessRecipeSet>>;

/// Thread-safe ordered map from process to that process's recipes.
pub struct MultiProcessRecipeMap {
	grouping: Grouping,
	sets: ArcSwap<ProcessTree>,
}

impl MultiProcessRecipeMap {
	pub fn new(grouping: Grouping) -> Self {
		Self {
			grouping,
			sets: ArcSwap::from_pointee(ProcessTree::new()),
		}
	}

	pub fn grouping(&self) -> &Grouping {
		&self.grouping
	}

	/// Adds `recipe` under `process`, creating the set on first use.
	///
	/// Returns false if the process does not handle the recipe.
	pub(crate) fn add_recipe(&self, process: &ProcessRef, recipe: RecipeRef) -> bool {
		if !process.can_handle(&*recipe) {
			return false;
		}
		self.set_or_insert(process).add(recipe)
	}

	/// Adds every handled recipe under `process` with one publication per container.
	pub(crate) fn add_recipes(&self, process: &ProcessRef, recipes: Vec<RecipeRef>) -> usize {
		if !recipes.iter().any(|r| process.can_handle(&**r)) {
			return 0;
		}
		self.set_or_insert(process).add_all(recipes)
	}

	/// Removes the recipe keyed `key` from `process`'s set, pruning the set if it empties.
	pub(crate) fn remove_recipe(&self, process: &ProcessRef, key: &Key) -> Option<RecipeRef> {
		let set = self.set(process)?;
		let removed = set.remove(key)?;
		if set.is_empty() {
			self.sets.rcu(|current| {
				let mut next = ProcessTree::clone(current);
				if next.get(process).is_some_and(|s| Arc::ptr_eq(s, &set) && s.is_empty()) {
					next.remove(process);
				}
				next
			});
		}
		Some(removed)
	}

	/// Inserts `set`, merging its recipes into an existing set for the same process.
	///
	/// A newly inserted set is shared, not copied: later changes to it are visible here.
	pub(crate) fn put_set(&self, set: Arc<ProcessRecipeSet>) {
		let process = Arc::clone(set.process());
		let mut existing = None;
		self.sets.rcu(|current| {
			existing = current.get(&process).cloned();
			let mut next = ProcessTree::clone(current);
			if existing.is_none() {
				next.insert(Arc::clone(&process), Arc::clone(&set));
			}
			next
		});
		if let Some(existing) = existing
			&& !Arc::ptr_eq(&existing, &set)
		{
			existing.add_all(set.snapshot().values().cloned());
		}
	}

	fn set_or_insert(&self, process: &ProcessRef) -> Arc<ProcessRecipeSet> {
		if let Some(set) = self.set(process) {
			return set;
		}
		let mut found = None;
		self.sets.rcu(|current| {
			found = current.get(process).cloned();
			let mut next = ProcessTree::clone(current);
			if found.is_none() {
				let set = Arc::new(ProcessRecipeSet::new(Arc::clone(process)));
				next.insert(Arc::clone(process), Arc::clone(&set));
				found = Some(set);
			}
			next
		});
		found.unwrap_or_else(|| Arc::new(ProcessRecipeSet::new(Arc::clone(process))))
	}

	pub fn set(&self, process: &ProcessRef) -> Option<Arc<ProcessRecipeSet>> {
		self.sets.load().get(process).cloned()
	}

	pub fn contains_process(&self, process: &ProcessRef) -> bool {
		self.sets.load().contains_key(process)
	}

	/// Processes with at least one recipe, in process order.
	pub fn processes(&self) -> Vec<ProcessRef> {
		self.sets.load().keys().cloned().collect()
	}

	pub fn first_process(&self) -> Option<ProcessRef> {
		self.sets.load().keys().next().cloned()
	}

	pub fn last_process(&self) -> Option<ProcessRef> {
		self.sets.load().keys().next_back().cloned()
	}

	/// Next process after `process` in process order.
	pub fn higher_process(&self, process: &ProcessRef) -> Option<ProcessRef> {
		self.sets
			.load()
			.range::<ProcessRef, _>((Bound::Excluded(process), Bound::Unbounded))
			.next()
			.map(|(p, _)| Arc::clone(p))
	}

	/// Previous process before `process` in process order.
	pub fn lower_process(&self, process: &ProcessRef) -> Option<ProcessRef> {
		self.sets
			.load()
			.range::<ProcessRef, _>(..process)
			.next_back()
			.map(|(p, _)| Arc::clone(p))
	}

	/// Every recipe, grouped by process in process order, then by key.
	pub fn all_recipes(&self) -> Vec<RecipeRef> {
		self.sets
			.load()
			.values()
			.flat_map(|set| set.snapshot().values().cloned().collect::<Vec<_>>())
			.collect()
	}

	pub fn recipe_count(&self) -> usize {
		self.sets.load().values().map(|set| set.len()).sum()
	}

	pub fn process_count(&self) -> usize {
		self.sets.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.load().values().all(|set| set.is_empty())
	}

	/// Independent copy of the map's structure.
	///
	/// Each set is detached, so the copy keeps the current recipes while the original
	/// continues to change.
	pub fn detached(&self) -> Self {
		let tree: ProcessTree = self
			.sets
			.load()
			.iter()
			.map(|(process, set)| (Arc::clone(process), Arc::new(set.detached())))
			.collect();
		Self {
			grouping: self.grouping.clone(),
			sets: ArcSwap::from_pointee(tree),
		}
	}
}

/// Same grouping, same processes, and equal sets.
impl PartialEq for MultiProcessRecipeMap {
	fn eq(&self, other: &Self) -> bool {
		if self.grouping != other.grouping {
			return false;
		}
		let (a, b) = (self.sets.load(), other.sets.load());
		Arc::ptr_eq(&a, &b)
			|| (a.len() == b.len()
				&& a.iter()
					.zip(b.iter())
					.all(|((pa, sa), (pb, sb))| pa == pb && (Arc::ptr_eq(sa, sb) || sa == sb)))
	}
}

impl Eq for MultiProcessRecipeMap {}

impl std::fmt::Debug for MultiProcessRecipeMap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MultiProcessRecipeMap")
			.field("grouping", &self.grouping)
			.field("sets", &self.sets.load().values().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests;
