//! Shared fixtures for index tests.

use std::sync::Arc;

use quern_primitives::{CookingKind, CookingRecipe, ItemStack, Key, RecipeChoice, RecipeRef, ShapelessRecipe};
use quern_registry::{ExtractorRegistry, Fuels, ProcessRef, ProcessRegistry, RegistrationLock, builtins};

use crate::{IndexOptions, RecipeIndex};

pub(crate) fn key(value: &str) -> Key {
	Key::minecraft(value).unwrap()
}

pub(crate) fn item(value: &str) -> ItemStack {
	ItemStack::new(key(value))
}

/// Shapeless crafting recipe keyed `minecraft:<name>`.
pub(crate) fn crafted(name: &str, result: &str, ingredients: &[&str]) -> RecipeRef {
	RecipeRef::new(ShapelessRecipe::new(
		key(name),
		item(result),
		ingredients.iter().map(|i| RecipeChoice::single(item(i))),
	))
}

/// Furnace recipe keyed `minecraft:<name>`.
pub(crate) fn smelted(name: &str, result: &str, input: &str) -> RecipeRef {
	RecipeRef::new(CookingRecipe::new(
		key(name),
		CookingKind::Furnace,
		item(result),
		RecipeChoice::single(item(input)),
	))
}

pub(crate) fn builtin_process(value: &str) -> ProcessRef {
	let process = builtins::processes()
		.into_iter()
		.find(|p| p.key().value() == value)
		.unwrap();
	Arc::new(process)
}

pub(crate) fn registries() -> (Arc<ProcessRegistry>, Arc<ExtractorRegistry>) {
	let lock = RegistrationLock::new();
	let processes = Arc::new(ProcessRegistry::new(lock.clone()));
	let extractors = Arc::new(ExtractorRegistry::new(lock.clone()));
	builtins::register(&processes, &extractors, &Fuels::new([item("coal")])).unwrap();
	lock.lock();
	(processes, extractors)
}

pub(crate) fn index() -> RecipeIndex {
	let (processes, extractors) = registries();
	RecipeIndex::new(processes, extractors, IndexOptions::default())
}
