//! Recipe extractors.
//!
//! # Role
//!
//! The index does not know recipe shapes. For each record it asks the first
//! registered extractor whose [`RecipeExtractor::can_handle`] accepts the record for
//! the record's ingredients, results and other items.
//!
//! # Invariants
//!
//! - Extractors are consulted in registration order; the first match wins.
//! - Re-registering a key replaces the extractor in place, keeping its position.
//!   - Tested by: `tests::test_override_keeps_position`
//! - Extracted items are normalized with `ItemStack::as_one`.
//!   - Enforced in: [`ExtractorRegistry::extract`]

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use quern_primitives::{ItemStack, Key, Recipe};

use crate::{RegistrationLock, RegistryError};

/// Set of normalized item stacks produced by an extractor.
pub type ItemSet = BTreeSet<ItemStack>;

/// Pulls item stacks out of one recipe shape.
pub trait RecipeExtractor: Send + Sync {
	/// Key the extractor is registered under.
	fn key(&self) -> &Key;

	fn can_handle(&self, recipe: &dyn Recipe) -> bool;

	fn extract_ingredients(&self, recipe: &dyn Recipe) -> ItemSet;

	fn extract_results(&self, recipe: &dyn Recipe) -> ItemSet {
		ItemSet::from([recipe.result().as_one()])
	}

	/// Catalysts or fuels involved but not consumed as ingredients.
	fn extract_others(&self, _recipe: &dyn Recipe) -> ItemSet {
		ItemSet::new()
	}
}

/// Everything an extractor reported for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
	pub extractor: Key,
	pub ingredients: ItemSet,
	pub results: ItemSet,
	pub others: ItemSet,
}

type ShapeFn<R> = Box<dyn Fn(&R) -> ItemSet + Send + Sync>;

/// Extractor for one concrete recipe type, built from closures.
pub struct ShapeExtractor<R> {
	key: Key,
	ingredients: ShapeFn<R>,
	others: Option<ShapeFn<R>>,
	_shape: PhantomData<fn(&R)>,
}

impl<R: Recipe> ShapeExtractor<R> {
	pub fn new(key: Key, ingredients: impl Fn(&R) -> ItemSet + Send + Sync + 'static) -> Self {
		Self {
			key,
			ingredients: Box::new(ingredients),
			others: None,
			_shape: PhantomData,
		}
	}

	pub fn with_others(mut self, others: impl Fn(&R) -> ItemSet + Send + Sync + 'static) -> Self {
		self.others = Some(Box::new(others));
		self
	}
}

impl<R: Recipe> RecipeExtractor for ShapeExtractor<R> {
	fn key(&self) -> &Key {
		&self.key
	}

	fn can_handle(&self, recipe: &dyn Recipe) -> bool {
		recipe.is::<R>()
	}

	fn extract_ingredients(&self, recipe: &dyn Recipe) -> ItemSet {
		recipe
			.downcast_ref::<R>()
			.map(|r| (self.ingredients)(r))
			.unwrap_or_default()
	}

	fn extract_others(&self, recipe: &dyn Recipe) -> ItemSet {
		match (&self.others, recipe.downcast_ref::<R>()) {
			(Some(others), Some(r)) => others(r),
			_ => ItemSet::new(),
		}
	}
}

const LABEL: &str = "extractor";

/// Ordered, first-match registry of extractors.
pub struct ExtractorRegistry {
	lock: RegistrationLock,
	extractors: ArcSwap<IndexMap<Key, Arc<dyn RecipeExtractor>>>,
}

impl ExtractorRegistry {
	pub fn new(lock: RegistrationLock) -> Self {
		Self {
			lock,
			extractors: ArcSwap::from_pointee(IndexMap::new()),
		}
	}

	/// Registers an extractor. An existing extractor with the same key is replaced in place.
	pub fn register(&self, extractor: impl RecipeExtractor + 'static) -> Result<(), RegistryError> {
		self.register_arc(Arc::new(extractor))
	}

	pub fn register_arc(&self, extractor: Arc<dyn RecipeExtractor>) -> Result<(), RegistryError> {
		let key = extractor.key().clone();
		self.lock.ensure_open(LABEL, "register", &key)?;
		let mut replaced = false;
		self.extractors.rcu(|current| {
			let mut next = IndexMap::clone(current);
			replaced = next.insert(key.clone(), Arc::clone(&extractor)).is_some();
			next
		});
		tracing::debug!(extractor = %key, replaced, "registered extractor");
		Ok(())
	}

	/// Removes an extractor, keeping the relative order of the others.
	pub fn unregister(&self, key: &Key) -> Result<bool, RegistryError> {
		self.lock.ensure_open(LABEL, "unregister", key)?;
		let mut removed = false;
		self.extractors.rcu(|current| {
			let mut next = IndexMap::clone(current);
			removed = next.shift_remove(key).is_some();
			next
		});
		Ok(removed)
	}

	/// First extractor, in registration order, that handles `recipe`.
	pub fn find(&self, recipe: &dyn Recipe) -> Option<Arc<dyn RecipeExtractor>> {
		self.extractors
			.load()
			.values()
			.find(|e| e.can_handle(recipe))
			.cloned()
	}

	pub fn can_handle(&self, recipe: &dyn Recipe) -> bool {
		self.find(recipe).is_some()
	}

	/// Runs the matching extractor, or returns `None` when no extractor handles the recipe.
	pub fn extract(&self, recipe: &dyn Recipe) -> Option<Extraction> {
		let extractor = self.find(recipe)?;
		let normalize = |items: ItemSet| items.iter().map(ItemStack::as_one).collect::<ItemSet>();
		Some(Extraction {
			extractor: extractor.key().clone(),
			ingredients: normalize(extractor.extract_ingredients(recipe)),
			results: normalize(extractor.extract_results(recipe)),
			others: normalize(extractor.extract_others(recipe)),
		})
	}

	/// Registered keys in consultation order.
	pub fn keys(&self) -> Vec<Key> {
		self.extractors.load().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.extractors.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests;
