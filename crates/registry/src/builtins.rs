//! Processes and extractors for the host game's own recipe shapes.

use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::{
	CookingKind, CookingRecipe, ItemStack, Key, Recipe, RecipeChoice, ShapedRecipe, ShapelessRecipe,
	SmithingTransformRecipe, SmithingTrimRecipe, StonecuttingRecipe, TransmuteRecipe,
};

use crate::{ExtractorRegistry, ItemSet, Process, ProcessRegistry, RegistryError, ShapeExtractor};

fn item(value: &'static str) -> ItemStack {
	ItemStack::new(Key::from_static("minecraft", value))
}

fn is_cooking(recipe: &dyn Recipe, kind: CookingKind) -> bool {
	recipe
		.downcast_ref::<CookingRecipe>()
		.is_some_and(|r| r.kind() == kind)
}

fn cooking(value: &'static str, symbol: &'static str, kind: CookingKind) -> Process {
	Process::new(Key::from_static("minecraft", value), item(symbol), move |r| is_cooking(r, kind))
		.with_station(item(symbol))
}

/// The builtin processes, primary first.
pub fn processes() -> Vec<Process> {
	vec![
		Process::new(Key::from_static("minecraft", "crafting"), item("crafting_table"), |r| {
			r.is::<ShapedRecipe>() || r.is::<ShapelessRecipe>() || r.is::<TransmuteRecipe>()
		})
		.with_station(item("crafting_table"))
		.with_station(item("crafter")),
		cooking("smelting", "furnace", CookingKind::Furnace),
		cooking("blasting", "blast_furnace", CookingKind::Blasting),
		cooking("smoking", "smoker", CookingKind::Smoking),
		cooking("campfire_cooking", "campfire", CookingKind::Campfire).with_station(item("soul_campfire")),
		Process::new(Key::from_static("minecraft", "stonecutting"), item("stonecutter"), |r| {
			r.is::<StonecuttingRecipe>()
		})
		.with_station(item("stonecutter")),
		Process::new(Key::from_static("minecraft", "smithing"), item("smithing_table"), |r| {
			r.is::<SmithingTransformRecipe>() || r.is::<SmithingTrimRecipe>()
		})
		.with_station(item("smithing_table")),
	]
}

fn union<'a>(choices: impl IntoIterator<Item = &'a RecipeChoice>) -> ItemSet {
	choices.into_iter().flat_map(|choice| choice.normalized()).collect()
}

/// Items the host burns as fuel.
///
/// Clones share one list, so the host can replace it after the cooking extractor has
/// been registered; recipes indexed afterwards report the new list.
#[derive(Debug, Clone, Default)]
pub struct Fuels(Arc<ArcSwap<ItemSet>>);

impl Fuels {
	pub fn new(items: impl IntoIterator<Item = ItemStack>) -> Self {
		let fuels = Self::default();
		fuels.replace(items);
		fuels
	}

	pub fn replace(&self, items: impl IntoIterator<Item = ItemStack>) {
		let items: ItemSet = items.into_iter().map(|item| item.as_one()).collect();
		self.0.store(Arc::new(items));
	}

	pub fn snapshot(&self) -> Arc<ItemSet> {
		self.0.load_full()
	}

	pub fn len(&self) -> usize {
		self.0.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.load().is_empty()
	}
}

/// Registers the builtin processes and one extractor per builtin recipe shape.
///
/// `fuels` are reported as the other items of fuel-burning cooking recipes.
pub fn register(
	processes_registry: &ProcessRegistry,
	extractors: &ExtractorRegistry,
	fuels: &Fuels,
) -> Result<(), RegistryError> {
	for process in processes() {
		processes_registry.register(process)?;
	}

	extractors.register(ShapeExtractor::new(Key::from_static("quern", "shaped"), |r: &ShapedRecipe| {
		union(r.choices())
	}))?;
	extractors.register(ShapeExtractor::new(
		Key::from_static("quern", "shapeless"),
		|r: &ShapelessRecipe| union(r.ingredients()),
	))?;
	extractors.register(ShapeExtractor::new(
		Key::from_static("quern", "transmute"),
		|r: &TransmuteRecipe| union([r.input(), r.material()]),
	))?;

	let fuel_count = fuels.len();
	let fuels = fuels.clone();
	extractors.register(
		ShapeExtractor::new(Key::from_static("quern", "cooking"), |r: &CookingRecipe| union([r.input()]))
			.with_others(move |r: &CookingRecipe| {
				if r.kind().uses_fuel() {
					ItemSet::clone(&fuels.snapshot())
				} else {
					ItemSet::new()
				}
			}),
	)?;
	extractors.register(ShapeExtractor::new(
		Key::from_static("quern", "stonecutting"),
		|r: &StonecuttingRecipe| union([r.input()]),
	))?;
	extractors.register(ShapeExtractor::new(
		Key::from_static("quern", "smithing_transform"),
		|r: &SmithingTransformRecipe| union([r.template(), r.base(), r.addition()]),
	))?;
	extractors.register(ShapeExtractor::new(
		Key::from_static("quern", "smithing_trim"),
		|r: &SmithingTrimRecipe| union([r.template(), r.base(), r.addition()]),
	))?;

	tracing::debug!(
		processes = processes_registry.len(),
		extractors = extractors.len(),
		fuels = fuel_count,
		"registered builtin recipe support"
	);
	Ok(())
}
