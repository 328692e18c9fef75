//! The root recipe index.
//!
//! # Role
//!
//! [`RecipeIndex`] is the single source of truth for indexed recipes. Every recipe is
//! stored in:
//!
//! - the by-key map, which also records the recipe's process and extracted items so
//!   removal can find every container without re-running the extractor;
//! - the all-recipes map, grouped by process;
//! - one by-result map per result item;
//! - one by-ingredient map per ingredient item;
//! - one by-other map per other item (fuels, catalysts).
//!
//! # Concurrency
//!
//! Every container publishes immutable snapshots, so queries never block. Writers
//! take an internal mutex, which keeps compound updates (get-or-create a map, then add
//! to it) from interleaving. The five containers are not updated atomically together:
//! a concurrent query may briefly see a recipe in some containers and not others.
//!
//! # Invariants
//!
//! - After `unindex_recipe(k)`, no container exposes `k` and no empty map or set is left behind.
//!   - Enforced in: [`RecipeIndex::unindex_recipe`]
//!   - Tested by: `tests::prop_index_consistent`
//! - Re-indexing a key replaces the stored version.
//!   - Tested by: `tests::test_reindex_replaces`
//! - Recipes no extractor handles are skipped, never indexed with empty item sets.
//!   - Tested by: `tests::test_unhandled_recipe_skipped`

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use quern_primitives::{ItemStack, Key, RecipeRef};
use quern_registry::{Extraction, ExtractorRegistry, ItemSet, ProcessRef, ProcessRegistry};
use rustc_hash::FxHashMap;

use crate::{Grouping, MultiProcessRecipeMap, MultiProcessRecipeReader};

mod summary;

pub use summary::IndexSummary;

type ItemMaps = FxHashMap<ItemStack, Arc<MultiProcessRecipeMap>>;

/// Behaviour switches for a [`RecipeIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
	/// Report recipes no extractor handles as warnings instead of debug events.
	pub warn_unhandled: bool,
}

/// An indexed recipe with the data needed to remove it again.
#[derive(Debug, Clone)]
pub struct IndexedRecipe {
	pub recipe: RecipeRef,
	pub process: ProcessRef,
	pub extraction: Extraction,
}

impl IndexedRecipe {
	/// The result item readers by key are grouped under.
	///
	/// Prefers the recipe's own result when the extractor reported it.
	pub fn primary_result(&self) -> Option<&ItemStack> {
		let own = self.recipe.result();
		self.extraction
			.results
			.get(own)
			.or_else(|| self.extraction.results.first())
	}
}

/// Which item-keyed container an item belongs to.
#[derive(Debug, Clone, Copy)]
enum Role {
	Result,
	Ingredient,
	Other,
}

impl Role {
	fn grouping(self, item: ItemStack) -> Grouping {
		match self {
			Self::Result => Grouping::ByResult(item),
			Self::Ingredient => Grouping::ByIngredient(item),
			Self::Other => Grouping::ByOther(item),
		}
	}

	fn items(self, extraction: &Extraction) -> &ItemSet {
		match self {
			Self::Result => &extraction.results,
			Self::Ingredient => &extraction.ingredients,
			Self::Other => &extraction.others,
		}
	}
}

const ROLES: [Role; 3] = [Role::Result, Role::Ingredient, Role::Other];

/// Concurrent multi-key index of recipes.
pub struct RecipeIndex {
	processes: Arc<ProcessRegistry>,
	extractors: Arc<ExtractorRegistry>,
	options: IndexOptions,
	write: Mutex<()>,
	by_key: ArcSwap<BTreeMap<Key, IndexedRecipe>>,
	by_process: Arc<MultiProcessRecipeMap>,
	by_result: ArcSwap<ItemMaps>,
	by_ingredient: ArcSwap<ItemMaps>,
	by_other: ArcSwap<ItemMaps>,
}

impl RecipeIndex {
	pub fn new(processes: Arc<ProcessRegistry>, extractors: Arc<ExtractorRegistry>, options: IndexOptions) -> Self {
		Self {
			processes,
			extractors,
			options,
			write: Mutex::new(()),
			by_key: ArcSwap::from_pointee(BTreeMap::new()),
			by_process: Arc::new(MultiProcessRecipeMap::new(Grouping::AllRecipes)),
			by_result: ArcSwap::from_pointee(ItemMaps::default()),
			by_ingredient: ArcSwap::from_pointee(ItemMaps::default()),
			by_other: ArcSwap::from_pointee(ItemMaps::default()),
		}
	}

	pub fn processes(&self) -> &Arc<ProcessRegistry> {
		&self.processes
	}

	pub fn extractors(&self) -> &Arc<ExtractorRegistry> {
		&self.extractors
	}

	fn item_maps(&self, role: Role) -> &ArcSwap<ItemMaps> {
		match role {
			Role::Result => &self.by_result,
			Role::Ingredient => &self.by_ingredient,
			Role::Other => &self.by_other,
		}
	}

	/// Resolves process and items for `recipe`, or reports it as unhandled.
	fn prepare(&self, recipe: RecipeRef) -> Option<IndexedRecipe> {
		let Some(extraction) = self.extractors.extract(&*recipe) else {
			if self.options.warn_unhandled {
				tracing::warn!(recipe = %recipe.key(), "no extractor handles recipe; skipped");
			} else {
				tracing::debug!(recipe = %recipe.key(), "no extractor handles recipe; skipped");
			}
			return None;
		};
		let process = self.processes.process_for(&*recipe);
		Some(IndexedRecipe {
			recipe,
			process,
			extraction,
		})
	}

	/// Indexes one recipe. Returns false if no extractor handles it.
	pub fn index_recipe(&self, recipe: RecipeRef) -> bool {
		let Some(entry) = self.prepare(recipe) else {
			return false;
		};
		let _guard = self.write.lock();
		let key = entry.recipe.key().clone();
		if self.by_key.load().contains_key(&key) {
			self.unindex_locked(&key);
		}

		self.by_process.add_recipe(&entry.process, entry.recipe.clone());
		for role in ROLES {
			let items = role.items(&entry.extraction);
			if items.is_empty() {
				continue;
			}
			let maps = self.ensure_maps(role, items.iter());
			for item in items {
				if let Some(map) = maps.get(item) {
					map.add_recipe(&entry.process, entry.recipe.clone());
				}
			}
		}
		tracing::trace!(recipe = %key, process = %entry.process.key(), "indexed recipe");
		self.by_key.rcu(|current| {
			let mut next = BTreeMap::clone(current);
			next.insert(key.clone(), entry.clone());
			next
		});
		true
	}

	/// Indexes many recipes, publishing each container once.
	///
	/// Returns the number of recipes indexed. Unhandled recipes are skipped; when a key
	/// repeats, the last recipe wins.
	pub fn index_recipes(&self, recipes: impl IntoIterator<Item = RecipeRef>) -> usize {
		let mut batch: BTreeMap<Key, IndexedRecipe> = BTreeMap::new();
		for recipe in recipes {
			if let Some(entry) = self.prepare(recipe) {
				batch.insert(entry.recipe.key().clone(), entry);
			}
		}
		if batch.is_empty() {
			return 0;
		}

		let _guard = self.write.lock();
		let existing = self.by_key.load_full();
		for key in batch.keys().filter(|k| existing.contains_key(*k)) {
			self.unindex_locked(key);
		}

		let mut per_process: BTreeMap<ProcessRef, Vec<RecipeRef>> = BTreeMap::new();
		for entry in batch.values() {
			per_process
				.entry(Arc::clone(&entry.process))
				.or_default()
				.push(entry.recipe.clone());
		}
		for (process, recipes) in per_process {
			self.by_process.add_recipes(&process, recipes);
		}

		for role in ROLES {
			let mut per_item: FxHashMap<&ItemStack, BTreeMap<ProcessRef, Vec<RecipeRef>>> = FxHashMap::default();
			for entry in batch.values() {
				for item in role.items(&entry.extraction) {
					per_item
						.entry(item)
						.or_default()
						.entry(Arc::clone(&entry.process))
						.or_default()
						.push(entry.recipe.clone());
				}
			}
			if per_item.is_empty() {
				continue;
			}
			let maps = self.ensure_maps(role, per_item.keys().copied());
			for (item, groups) in per_item {
				let Some(map) = maps.get(item) else {
					continue;
				};
				for (process, recipes) in groups {
					map.add_recipes(&process, recipes);
				}
			}
		}

		let count = batch.len();
		self.by_key.rcu(|current| {
			let mut next = BTreeMap::clone(current);
			next.extend(batch.iter().map(|(k, e)| (k.clone(), e.clone())));
			next
		});
		tracing::debug!(count, total = self.len(), "indexed recipe batch");
		count
	}

	/// Returns the item maps after creating any that are missing, with one publication.
	fn ensure_maps<'a>(&self, role: Role, items: impl Iterator<Item = &'a ItemStack> + Clone) -> Arc<ItemMaps> {
		let maps = self.item_maps(role);
		let current = maps.load_full();
		if items.clone().all(|item| current.contains_key(item)) {
			return current;
		}
		maps.rcu(|current| {
			let mut next = ItemMaps::clone(current);
			for item in items.clone() {
				next.entry(item.clone())
					.or_insert_with(|| Arc::new(MultiProcessRecipeMap::new(role.grouping(item.clone()))));
			}
			next
		});
		maps.load_full()
	}

	/// Removes a recipe from every container. Returns the removed entry.
	pub fn unindex_recipe(&self, key: &Key) -> Option<IndexedRecipe> {
		let _guard = self.write.lock();
		self.unindex_locked(key)
	}

	fn unindex_locked(&self, key: &Key) -> Option<IndexedRecipe> {
		if !self.by_key.load().contains_key(key) {
			return None;
		}
		let mut removed = None;
		self.by_key.rcu(|current| {
			let mut next = BTreeMap::clone(current);
			removed = next.remove(key);
			next
		});
		let entry = removed?;

		self.by_process.remove_recipe(&entry.process, key);
		for role in ROLES {
			let maps = self.item_maps(role);
			let mut emptied = Vec::new();
			{
				let current = maps.load();
				for item in role.items(&entry.extraction) {
					if let Some(map) = current.get(item) {
						map.remove_recipe(&entry.process, key);
						if map.is_empty() {
							emptied.push(item.clone());
						}
					}
				}
			}
			if !emptied.is_empty() {
				maps.rcu(|current| {
					let mut next = ItemMaps::clone(current);
					for item in &emptied {
						if next.get(item).is_some_and(|m| m.is_empty()) {
							next.remove(item);
						}
					}
					next
				});
			}
		}
		tracing::trace!(recipe = %key, process = %entry.process.key(), "unindexed recipe");
		Some(entry)
	}

	/// Removes every recipe.
	pub fn clear(&self) {
		let keys: Vec<Key> = self.by_key.load().keys().cloned().collect();
		let _guard = self.write.lock();
		for key in &keys {
			self.unindex_locked(key);
		}
	}

	pub fn recipe(&self, key: &Key) -> Option<RecipeRef> {
		self.by_key.load().get(key).map(|e| e.recipe.clone())
	}

	/// Indexed entry for `key`, including its process and extracted items.
	pub fn entry(&self, key: &Key) -> Option<IndexedRecipe> {
		self.by_key.load().get(key).cloned()
	}

	/// Process the recipe keyed `key` was indexed under.
	pub fn process_of(&self, key: &Key) -> Option<ProcessRef> {
		self.by_key.load().get(key).map(|e| Arc::clone(&e.process))
	}

	pub fn contains(&self, key: &Key) -> bool {
		self.by_key.load().contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.by_key.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_key.load().is_empty()
	}

	/// Every recipe key, in key order.
	pub fn keys(&self) -> Vec<Key> {
		self.by_key.load().keys().cloned().collect()
	}

	/// Processes with at least one indexed recipe, in process order.
	pub fn indexed_processes(&self) -> Vec<ProcessRef> {
		self.by_process.processes()
	}

	fn item_map(&self, role: Role, item: &ItemStack) -> Option<Arc<MultiProcessRecipeMap>> {
		self.item_maps(role).load().get(&item.as_one()).cloned()
	}

	/// Reader over the recipes sharing this recipe's result, positioned at the recipe itself.
	pub fn reader_by_key(&self, key: &Key) -> Option<MultiProcessRecipeReader> {
		let entry = self.entry(key)?;
		let map = match entry.primary_result() {
			Some(result) => self.item_map(Role::Result, result)?,
			None => {
				let map = MultiProcessRecipeMap::new(Grouping::ByKey(key.clone()));
				map.add_recipe(&entry.process, entry.recipe.clone());
				Arc::new(map)
			}
		};
		MultiProcessRecipeReader::at_recipe(map, &entry.process, &entry.recipe).ok()
	}

	/// Reader over the recipes producing `item`.
	pub fn reader_by_result(&self, item: &ItemStack) -> Option<MultiProcessRecipeReader> {
		MultiProcessRecipeReader::new(self.item_map(Role::Result, item)?).ok()
	}

	/// Reader over the recipes consuming `item`.
	pub fn reader_by_ingredient(&self, item: &ItemStack) -> Option<MultiProcessRecipeReader> {
		MultiProcessRecipeReader::new(self.item_map(Role::Ingredient, item)?).ok()
	}

	/// Reader over the recipes using `item` as fuel or catalyst.
	pub fn reader_by_other(&self, item: &ItemStack) -> Option<MultiProcessRecipeReader> {
		MultiProcessRecipeReader::new(self.item_map(Role::Other, item)?).ok()
	}

	/// Reader over the recipes of one process.
	pub fn reader_by_process(&self, process: &ProcessRef) -> Option<MultiProcessRecipeReader> {
		let set = self.by_process.set(process)?;
		let map = MultiProcessRecipeMap::new(Grouping::ByProcess(Arc::clone(process)));
		map.put_set(set);
		MultiProcessRecipeReader::new(Arc::new(map)).ok()
	}

	/// Reader over every indexed recipe.
	pub fn reader_with_all_recipes(&self) -> Option<MultiProcessRecipeReader> {
		MultiProcessRecipeReader::new(Arc::clone(&self.by_process)).ok()
	}
}

#[cfg(test)]
mod tests;
