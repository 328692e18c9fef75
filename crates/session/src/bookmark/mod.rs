//! Recipe bookmarks.
//!
//! A [`Bookmark`] saves a recipe view (a reader snapshot) together with the item that
//! represents it in bookmark lists. Two bookmarks are the same when they show the same
//! recipes and their symbols are loosely equal, so bookmarking one recipe family
//! twice, from any entry point and at any animation phase, yields one entry.

use std::hash::{Hash, Hasher};

use quern_display::{CyclicIngredient, PanelContext, PanelRegistry, Style};
use quern_index::{Grouping, MultiProcessRecipeReader, RecipeIndex};
use quern_primitives::{ItemStack, Key};

mod collection;

pub use collection::{BookmarkCollection, ServerBookmarkRegistry};

/// Saved recipe view with its display symbol.
#[derive(Debug, Clone)]
pub struct Bookmark {
	reader: MultiProcessRecipeReader,
	symbol: CyclicIngredient,
}

impl Bookmark {
	/// Bookmarks a snapshot of `reader`.
	pub fn new(reader: &MultiProcessRecipeReader, symbol: CyclicIngredient) -> Self {
		Self {
			reader: reader.clone(),
			symbol,
		}
	}

	/// Bookmarks the recipe `key`, shown with its panel's output.
	pub fn from_key(index: &RecipeIndex, panels: &PanelRegistry, context: &PanelContext, key: &Key) -> Option<Self> {
		let reader = index.reader_by_key(key)?;
		let panel = panels.create(reader.current_process(), reader.current_recipe(), context);
		let base = match panel.symbol() {
			Some(symbol) => symbol.clone(),
			None => CyclicIngredient::single(reader.current_recipe().result().clone()),
		};
		let style = &context.style;
		let line = format!(
			"{}{}",
			style.primary.paint("Recipe with key: "),
			style.secondary.paint(&key.to_string())
		);
		let symbol = described(base, line)?;
		tracing::trace!(recipe = %key, "bookmark from key");
		Some(Self::new(&reader, symbol))
	}

	/// Bookmarks the recipes producing `item`.
	pub fn from_result(index: &RecipeIndex, item: &ItemStack, style: &Style) -> Option<Self> {
		let reader = index.reader_by_result(item)?;
		let line = format!(
			"{}{}",
			style.primary.paint("Recipes for: "),
			style.secondary.paint(&item.display_name())
		);
		let symbol = described(CyclicIngredient::single(item.as_one()), line)?;
		tracing::trace!(item = %item.kind(), "bookmark from result");
		Some(Self::new(&reader, symbol))
	}

	/// A fresh snapshot of the saved view, positioned where the bookmark was taken.
	pub fn reader(&self) -> MultiProcessRecipeReader {
		self.reader.clone()
	}

	pub fn grouping(&self) -> &Grouping {
		self.reader.grouping()
	}

	pub fn symbol(&self) -> &CyclicIngredient {
		&self.symbol
	}
}

/// Adds a lore line to `base` without copying its cycle state.
fn described(base: CyclicIngredient, line: String) -> Option<CyclicIngredient> {
	CyclicIngredient::dependent(move |items| items[0].clone().with_lore_line(line.clone()), [base]).ok()
}

/// Same recipes shown and loosely equal symbols; reader positions are ignored.
impl PartialEq for Bookmark {
	fn eq(&self, other: &Self) -> bool {
		self.reader.same_view(&other.reader) && self.symbol.loose_eq(&other.symbol)
	}
}

impl Eq for Bookmark {}

impl Hash for Bookmark {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.grouping().hash(state);
	}
}
