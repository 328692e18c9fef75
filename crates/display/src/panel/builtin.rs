//! Panels for the builtin processes.

use quern_primitives::{
	CookingRecipe, ItemStack, Key, RecipeChoice, RecipeRef, ShapedRecipe, ShapelessRecipe, SmithingTransformRecipe,
	SmithingTrimRecipe, StonecuttingRecipe, TransmuteRecipe,
};
use quern_registry::RegistryError;

use super::{Panel, PanelContext, PanelError, PanelRegistry, PanelSlot};
use crate::CyclicIngredient;

const OUTPUT: PanelSlot = PanelSlot::at(5, 2);
const BACKGROUND: PanelSlot = PanelSlot::at(0, 0);
const STATION: PanelSlot = PanelSlot::at(4, 2);

fn item(value: &'static str) -> ItemStack {
	ItemStack::new(Key::from_static("minecraft", value))
}

fn wrong_shape(process: &'static str, recipe: &RecipeRef) -> PanelError {
	PanelError::WrongShape {
		process: Key::from_static("minecraft", process),
		recipe: recipe.key().clone(),
	}
}

/// Background filler; resource packs swap in a textured variant.
fn background(context: &PanelContext, variant: &'static str) -> ItemStack {
	let filler = item("gray_stained_glass_pane").with_display_name(" ");
	if context.style.has_resource_pack {
		filler.with_variant(variant)
	} else {
		filler
	}
}

fn cycling(context: &PanelContext, choice: &RecipeChoice) -> Result<CyclicIngredient, PanelError> {
	Ok(CyclicIngredient::from_choice(context.seed, choice)?)
}

fn with_output(mut panel: Panel, recipe: &RecipeRef, context: &PanelContext) -> Panel {
	panel.results.insert(OUTPUT, CyclicIngredient::single(recipe.result().clone()));
	panel.statics.insert(BACKGROUND, background(context, "panel"));
	panel
}

/// Registers the builtin panels under their process keys.
pub fn register(registry: &PanelRegistry) -> Result<(), RegistryError> {
	registry.register(Key::from_static("minecraft", "crafting"), crafting)?;
	for process in ["smelting", "blasting", "smoking", "campfire_cooking"] {
		registry.register(Key::from_static("minecraft", process), cooking)?;
	}
	registry.register(Key::from_static("minecraft", "stonecutting"), stonecutting)?;
	registry.register(Key::from_static("minecraft", "smithing"), smithing)?;
	Ok(())
}

/// Offsets a recipe of the given size inside the 3x3 crafting grid.
///
/// Single-column recipes are centred horizontally, single-row recipes vertically.
/// Two-row recipes sit in the lower rows only when they span the full width.
fn grid_offset(width: usize, height: usize) -> (usize, usize) {
	let x = if width == 1 { 1 } else { 0 };
	let y = match (height, width) {
		(1, _) | (2, 3) => 1,
		_ => 0,
	};
	(x, y)
}

fn grid_slot(x: usize, y: usize) -> PanelSlot {
	PanelSlot::at(x as u8 + 1, y as u8 + 1)
}

/// Crafting grid cells for a shaped, shapeless or transmute recipe.
pub(crate) fn crafting_grid(recipe: &RecipeRef) -> Option<Vec<(PanelSlot, &RecipeChoice)>> {
	if let Some(shaped) = recipe.downcast_ref::<ShapedRecipe>() {
		let (width, height) = (shaped.width().min(3), shaped.height().min(3));
		let (dx, dy) = grid_offset(width, height);
		let cells = (0..height)
			.flat_map(|y| (0..width).map(move |x| (x, y)))
			.filter_map(|(x, y)| shaped.cell(x, y).map(|choice| (grid_slot(x + dx, y + dy), choice)))
			.collect();
		return Some(cells);
	}
	if let Some(shapeless) = recipe.downcast_ref::<ShapelessRecipe>() {
		let choices = shapeless.ingredients();
		let (columns, start) = match choices.len() {
			1 => (1, 1),
			2..=4 => (2, 0),
			_ => (3, 0),
		};
		let cells = choices
			.iter()
			.take(9)
			.enumerate()
			.map(|(i, choice)| (grid_slot(start + i % columns, start + i / columns), choice))
			.collect();
		return Some(cells);
	}
	if let Some(transmute) = recipe.downcast_ref::<TransmuteRecipe>() {
		return Some(vec![
			(grid_slot(1, 1), transmute.input()),
			(grid_slot(2, 1), transmute.material()),
		]);
	}
	None
}

pub fn crafting(recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError> {
	let grid = crafting_grid(recipe).ok_or_else(|| wrong_shape("crafting", recipe))?;
	let mut panel = Panel::new();
	for (slot, choice) in grid {
		if !choice.is_empty() {
			panel.ingredients.insert(slot, cycling(context, choice)?);
		}
	}
	panel.statics.insert(STATION, item("crafting_table"));
	Ok(with_output(panel, recipe, context))
}

pub fn cooking(recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError> {
	let cooking = recipe
		.downcast_ref::<CookingRecipe>()
		.ok_or_else(|| wrong_shape("smelting", recipe))?;
	let mut panel = Panel::new();
	panel.ingredients.insert(PanelSlot::at(2, 1), cycling(context, cooking.input())?);
	if cooking.kind().uses_fuel() {
		panel.statics.insert(PanelSlot::at(2, 2), item("fire_charge"));
		if let Ok(fuel) = CyclicIngredient::new(context.seed, context.fuels.iter().cloned()) {
			panel.others.insert(PanelSlot::at(2, 3), fuel);
		}
	} else {
		panel.statics.insert(PanelSlot::at(2, 2), item("campfire"));
	}
	Ok(with_output(panel, recipe, context))
}

pub fn stonecutting(recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError> {
	let cut = recipe
		.downcast_ref::<StonecuttingRecipe>()
		.ok_or_else(|| wrong_shape("stonecutting", recipe))?;
	let mut panel = Panel::new();
	panel.ingredients.insert(PanelSlot::at(2, 2), cycling(context, cut.input())?);
	panel.statics.insert(STATION, item("stonecutter"));
	Ok(with_output(panel, recipe, context))
}

pub fn smithing(recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError> {
	let (template, base, addition) = if let Some(r) = recipe.downcast_ref::<SmithingTransformRecipe>() {
		(r.template(), r.base(), r.addition())
	} else if let Some(r) = recipe.downcast_ref::<SmithingTrimRecipe>() {
		(r.template(), r.base(), r.addition())
	} else {
		return Err(wrong_shape("smithing", recipe));
	};
	let mut panel = Panel::new();
	for (column, choice) in [(1, template), (2, base), (3, addition)] {
		if !choice.is_empty() {
			panel.ingredients.insert(PanelSlot::at(column, 2), cycling(context, choice)?);
		}
	}
	panel.statics.insert(PanelSlot::at(4, 3), item("smithing_table"));
	Ok(with_output(panel, recipe, context))
}

/// Result-only panel for processes without a dedicated layout.
pub fn undefined(recipe: &RecipeRef, context: &PanelContext) -> Panel {
	let mut panel = Panel::new();
	panel.statics.insert(PanelSlot::at(2, 2), item("barrier").with_display_name("No preview available"));
	with_output(panel, recipe, context)
}
