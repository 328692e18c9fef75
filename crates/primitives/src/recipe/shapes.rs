//! Builtin recipe shapes mirroring the host game's record types.

use std::collections::BTreeMap;

use super::Recipe;
use crate::{ItemStack, Key, RecipeChoice};

macro_rules! impl_recipe {
	($($ty:ty),+ $(,)?) => {
		$(
			impl Recipe for $ty {
				fn key(&self) -> &Key {
					&self.key
				}

				fn result(&self) -> &ItemStack {
					&self.result
				}
			}
		)+
	};
}

impl_recipe!(
	ShapedRecipe,
	ShapelessRecipe,
	TransmuteRecipe,
	CookingRecipe,
	StonecuttingRecipe,
	SmithingTransformRecipe,
	SmithingTrimRecipe,
);

/// Crafting recipe laid out on a grid of up to three rows of three.
///
/// Rows use one character per cell; a space marks an empty cell.
#[derive(Debug, Clone)]
pub struct ShapedRecipe {
	key: Key,
	result: ItemStack,
	rows: Vec<String>,
	ingredients: BTreeMap<char, RecipeChoice>,
}

impl ShapedRecipe {
	pub fn new(
		key: Key,
		result: ItemStack,
		rows: &[&str],
		ingredients: impl IntoIterator<Item = (char, RecipeChoice)>,
	) -> Self {
		Self {
			key,
			result,
			rows: rows.iter().map(|row| row.to_string()).collect(),
			ingredients: ingredients.into_iter().collect(),
		}
	}

	pub fn width(&self) -> usize {
		self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
	}

	pub fn height(&self) -> usize {
		self.rows.len()
	}

	/// Cell at `(column, row)`, or `None` for empty and out-of-shape cells.
	pub fn cell(&self, column: usize, row: usize) -> Option<&RecipeChoice> {
		let ch = self.rows.get(row)?.chars().nth(column)?;
		self.ingredients.get(&ch)
	}

	/// Every choice referenced by the shape, in key order.
	pub fn choices(&self) -> impl Iterator<Item = &RecipeChoice> {
		self.ingredients.values()
	}
}

/// Crafting recipe whose ingredients may be placed anywhere.
#[derive(Debug, Clone)]
pub struct ShapelessRecipe {
	key: Key,
	result: ItemStack,
	ingredients: Vec<RecipeChoice>,
}

impl ShapelessRecipe {
	pub fn new(key: Key, result: ItemStack, ingredients: impl IntoIterator<Item = RecipeChoice>) -> Self {
		Self {
			key,
			result,
			ingredients: ingredients.into_iter().collect(),
		}
	}

	pub fn ingredients(&self) -> &[RecipeChoice] {
		&self.ingredients
	}
}

/// Crafting recipe that converts one item into another while keeping its data.
#[derive(Debug, Clone)]
pub struct TransmuteRecipe {
	key: Key,
	result: ItemStack,
	input: RecipeChoice,
	material: RecipeChoice,
}

impl TransmuteRecipe {
	pub fn new(key: Key, result: ItemStack, input: RecipeChoice, material: RecipeChoice) -> Self {
		Self {
			key,
			result,
			input,
			material,
		}
	}

	pub fn input(&self) -> &RecipeChoice {
		&self.input
	}

	pub fn material(&self) -> &RecipeChoice {
		&self.material
	}
}

/// Station family a cooking recipe runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookingKind {
	Furnace,
	Blasting,
	Smoking,
	Campfire,
}

impl CookingKind {
	/// Returns true if the station burns fuel items.
	pub fn uses_fuel(self) -> bool {
		!matches!(self, Self::Campfire)
	}
}

/// Single-input recipe processed over time in a furnace-like station.
#[derive(Debug, Clone)]
pub struct CookingRecipe {
	key: Key,
	kind: CookingKind,
	result: ItemStack,
	input: RecipeChoice,
	experience: f32,
	cooking_ticks: u32,
}

impl CookingRecipe {
	pub fn new(key: Key, kind: CookingKind, result: ItemStack, input: RecipeChoice) -> Self {
		let cooking_ticks = match kind {
			CookingKind::Furnace => 200,
			CookingKind::Blasting | CookingKind::Smoking => 100,
			CookingKind::Campfire => 600,
		};
		Self {
			key,
			kind,
			result,
			input,
			experience: 0.0,
			cooking_ticks,
		}
	}

	pub fn with_experience(mut self, experience: f32) -> Self {
		self.experience = experience;
		self
	}

	pub fn with_cooking_ticks(mut self, ticks: u32) -> Self {
		self.cooking_ticks = ticks;
		self
	}

	pub fn kind(&self) -> CookingKind {
		self.kind
	}

	pub fn input(&self) -> &RecipeChoice {
		&self.input
	}

	pub fn experience(&self) -> f32 {
		self.experience
	}

	pub fn cooking_ticks(&self) -> u32 {
		self.cooking_ticks
	}
}

/// Single-input recipe performed on a stonecutter.
#[derive(Debug, Clone)]
pub struct StonecuttingRecipe {
	key: Key,
	result: ItemStack,
	input: RecipeChoice,
}

impl StonecuttingRecipe {
	pub fn new(key: Key, result: ItemStack, input: RecipeChoice) -> Self {
		Self { key, result, input }
	}

	pub fn input(&self) -> &RecipeChoice {
		&self.input
	}
}

/// Smithing recipe upgrading a base item with an addition.
#[derive(Debug, Clone)]
pub struct SmithingTransformRecipe {
	key: Key,
	result: ItemStack,
	template: RecipeChoice,
	base: RecipeChoice,
	addition: RecipeChoice,
}

impl SmithingTransformRecipe {
	pub fn new(
		key: Key,
		result: ItemStack,
		template: RecipeChoice,
		base: RecipeChoice,
		addition: RecipeChoice,
	) -> Self {
		Self {
			key,
			result,
			template,
			base,
			addition,
		}
	}

	pub fn template(&self) -> &RecipeChoice {
		&self.template
	}

	pub fn base(&self) -> &RecipeChoice {
		&self.base
	}

	pub fn addition(&self) -> &RecipeChoice {
		&self.addition
	}
}

/// Smithing recipe applying an armor trim; the result is the trimmed base.
#[derive(Debug, Clone)]
pub struct SmithingTrimRecipe {
	key: Key,
	result: ItemStack,
	template: RecipeChoice,
	base: RecipeChoice,
	addition: RecipeChoice,
}

impl SmithingTrimRecipe {
	pub fn new(
		key: Key,
		result: ItemStack,
		template: RecipeChoice,
		base: RecipeChoice,
		addition: RecipeChoice,
	) -> Self {
		Self {
			key,
			result,
			template,
			base,
			addition,
		}
	}

	pub fn template(&self) -> &RecipeChoice {
		&self.template
	}

	pub fn base(&self) -> &RecipeChoice {
		&self.base
	}

	pub fn addition(&self) -> &RecipeChoice {
		&self.addition
	}
}
