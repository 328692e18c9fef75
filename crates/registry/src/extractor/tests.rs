use pretty_assertions::assert_eq;
use quern_primitives::{CookingKind, CookingRecipe, RecipeChoice, ShapedRecipe, ShapelessRecipe};

use super::*;
use crate::{ProcessRegistry, builtins};

fn key(value: &str) -> Key {
	Key::minecraft(value).unwrap()
}

fn item(value: &str) -> ItemStack {
	ItemStack::new(key(value))
}

fn registry_with_builtins(fuels: &[ItemStack]) -> ExtractorRegistry {
	let lock = RegistrationLock::new();
	let extractors = ExtractorRegistry::new(lock.clone());
	let fuels = builtins::Fuels::new(fuels.iter().cloned());
	builtins::register(&ProcessRegistry::new(lock), &extractors, &fuels).unwrap();
	extractors
}

/// Extraction normalizes every item to a single unit.
#[test]
fn test_extract_normalizes() {
	let extractors = registry_with_builtins(&[]);
	let recipe = ShapedRecipe::new(
		key("chest"),
		item("chest"),
		&["###", "# #", "###"],
		[(
			'#',
			RecipeChoice::new([item("oak_planks").with_amount(2), item("spruce_planks")]),
		)],
	);
	let extraction = extractors.extract(&recipe).unwrap();
	assert_eq!(extraction.extractor, Key::quern("shaped").unwrap());
	assert_eq!(
		extraction.ingredients.iter().map(|i| i.amount()).collect::<Vec<_>>(),
		vec![1, 1]
	);
	assert_eq!(extraction.results, ItemSet::from([item("chest")]));
	assert!(extraction.others.is_empty());
}

/// Fuel-burning cooking recipes report fuels as other items; campfires do not.
#[test]
fn test_cooking_fuels() {
	let extractors = registry_with_builtins(&[item("coal").with_amount(8), item("oak_log")]);
	let furnace = CookingRecipe::new(
		key("glass"),
		CookingKind::Furnace,
		item("glass"),
		RecipeChoice::single(item("sand")),
	);
	let campfire = CookingRecipe::new(
		key("baked_potato_from_campfire"),
		CookingKind::Campfire,
		item("baked_potato"),
		RecipeChoice::single(item("potato")),
	);
	assert_eq!(
		extractors.extract(&furnace).unwrap().others,
		ItemSet::from([item("coal"), item("oak_log")])
	);
	assert!(extractors.extract(&campfire).unwrap().others.is_empty());
}

/// Replacing the fuel list affects extractions made afterwards.
#[test]
fn test_fuels_replaced_after_registration() {
	let lock = RegistrationLock::new();
	let extractors = ExtractorRegistry::new(lock.clone());
	let fuels = builtins::Fuels::default();
	builtins::register(&ProcessRegistry::new(lock.clone()), &extractors, &fuels).unwrap();
	lock.lock();

	let furnace = CookingRecipe::new(
		key("stone"),
		CookingKind::Furnace,
		item("stone"),
		RecipeChoice::single(item("cobblestone")),
	);
	assert!(extractors.extract(&furnace).unwrap().others.is_empty());

	fuels.replace([item("coal"), item("coal").with_amount(3)]);
	assert_eq!(fuels.len(), 1);
	assert_eq!(extractors.extract(&furnace).unwrap().others, ItemSet::from([item("coal")]));
}

/// Overriding a key keeps its position in the consultation order.
#[test]
fn test_override_keeps_position() {
	let extractors = registry_with_builtins(&[]);
	let before = extractors.keys();
	extractors
		.register(ShapeExtractor::new(Key::quern("shapeless").unwrap(), |_: &ShapelessRecipe| {
			ItemSet::from([ItemStack::new(Key::minecraft("air").unwrap())])
		}))
		.unwrap();
	assert_eq!(extractors.keys(), before);

	let recipe = ShapelessRecipe::new(key("book"), item("book"), [RecipeChoice::single(item("paper"))]);
	let extraction = extractors.extract(&recipe).unwrap();
	assert_eq!(extraction.ingredients, ItemSet::from([item("air")]));
}

/// The first registered extractor that handles a recipe wins.
#[test]
fn test_first_match_wins() {
	let extractors = ExtractorRegistry::new(RegistrationLock::new());
	extractors
		.register(ShapeExtractor::new(Key::new("mod", "first").unwrap(), |_: &ShapelessRecipe| {
			ItemSet::from([ItemStack::new(Key::minecraft("first").unwrap())])
		}))
		.unwrap();
	extractors
		.register(ShapeExtractor::new(Key::new("mod", "second").unwrap(), |_: &ShapelessRecipe| {
			ItemSet::new()
		}))
		.unwrap();
	let recipe = ShapelessRecipe::new(key("book"), item("book"), []);
	assert_eq!(extractors.extract(&recipe).unwrap().extractor, Key::new("mod", "first").unwrap());

	assert!(extractors.unregister(&Key::new("mod", "first").unwrap()).unwrap());
	assert_eq!(extractors.extract(&recipe).unwrap().extractor, Key::new("mod", "second").unwrap());
}

/// Unhandled shapes produce no extraction.
#[test]
fn test_unhandled_shape() {
	let extractors = ExtractorRegistry::new(RegistrationLock::new());
	let recipe = ShapelessRecipe::new(key("book"), item("book"), []);
	assert!(!extractors.can_handle(&recipe));
	assert!(extractors.extract(&recipe).is_none());
}

/// Registering or unregistering after the lock fails.
#[test]
fn test_locked_registry() {
	let lock = RegistrationLock::new();
	let extractors = ExtractorRegistry::new(lock.clone());
	lock.lock();
	let err = extractors
		.register(ShapeExtractor::new(Key::new("mod", "late").unwrap(), |_: &ShapelessRecipe| {
			ItemSet::new()
		}))
		.unwrap_err();
	assert_eq!(err.to_string(), "extractor registry is already initialized; cannot register mod:late");
	assert!(extractors.unregister(&Key::new("mod", "late").unwrap()).is_err());
}
