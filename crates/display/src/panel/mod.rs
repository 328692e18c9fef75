//! Recipe panels.
//!
//! A panel is the layout of one recipe inside the recipe view: which slot shows which
//! cycling ingredient, result or other item, which slots hold fixed decoration, and
//! where the shared navigation buttons sit. Layouts are produced per process by a
//! [`PanelFactory`] looked up in the [`PanelRegistry`].

use std::collections::BTreeMap;
use std::sync::Arc;

use quern_primitives::{ItemStack, Key, RecipeRef};

use crate::{CyclicIngredient, Style};

pub mod builtin;
mod registry;

pub use registry::PanelRegistry;

/// Inclusive column bound of the panel area.
pub const MAX_COLUMN: u8 = 6;
/// Inclusive row bound of the panel area.
pub const MAX_ROW: u8 = 4;
/// Width of the surrounding inventory grid.
const GRID_WIDTH: usize = 9;

/// Panel layout failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
	#[error("panel slot ({column}, {row}) is outside the 7x5 panel area")]
	OutOfBounds { column: u8, row: u8 },
	#[error("panel for {process} cannot lay out recipe {recipe}")]
	WrongShape { process: Key, recipe: Key },
	#[error(transparent)]
	Cyclic(#[from] crate::CyclicError),
}

/// Position inside the 7x5 panel area, ordered row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelSlot {
	row: u8,
	column: u8,
}

impl PanelSlot {
	pub fn new(column: u8, row: u8) -> Result<Self, PanelError> {
		if column > MAX_COLUMN || row > MAX_ROW {
			return Err(PanelError::OutOfBounds { column, row });
		}
		Ok(Self { row, column })
	}

	/// In-bounds slot for layout constants.
	pub(crate) const fn at(column: u8, row: u8) -> Self {
		Self { row, column }
	}

	pub fn column(self) -> u8 {
		self.column
	}

	pub fn row(self) -> u8 {
		self.row
	}

	/// Index in the surrounding 9-wide inventory, where the panel starts at (1, 1).
	pub fn slot_index(self) -> usize {
		(self.row as usize + 1) * GRID_WIDTH + self.column as usize + 1
	}

	/// Every panel slot in row order.
	pub fn all() -> impl Iterator<Item = PanelSlot> {
		(0..=MAX_ROW).flat_map(|row| (0..=MAX_COLUMN).map(move |column| Self::at(column, row)))
	}
}

/// Navigation buttons every panel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SharedButton {
	NextRecipe,
	PreviousRecipe,
	HistoryForward,
	HistoryBackward,
	QuickCraft,
}

impl SharedButton {
	/// The usual button placement.
	pub fn default_layout() -> BTreeMap<SharedButton, PanelSlot> {
		BTreeMap::from([
			(Self::PreviousRecipe, PanelSlot::at(1, 0)),
			(Self::NextRecipe, PanelSlot::at(3, 0)),
			(Self::HistoryBackward, PanelSlot::at(1, 4)),
			(Self::HistoryForward, PanelSlot::at(3, 4)),
			(Self::QuickCraft, PanelSlot::at(5, 3)),
		])
	}
}

/// Inputs shared by every panel built for one view.
#[derive(Debug, Clone)]
pub struct PanelContext {
	/// Starting position for every cycling slot of the panel.
	pub seed: u64,
	pub style: Style,
	/// Items that burn as fuel, shown by fuel-burning stations.
	pub fuels: Arc<[ItemStack]>,
}

impl Default for PanelContext {
	fn default() -> Self {
		Self {
			seed: 0,
			style: Style::default(),
			fuels: Arc::from(Vec::new()),
		}
	}
}

/// Layout of one recipe.
///
/// The cycling values are created once, so their positions persist across ticks for
/// as long as the panel lives.
#[derive(Debug, Clone, Default)]
pub struct Panel {
	pub ingredients: BTreeMap<PanelSlot, CyclicIngredient>,
	pub results: BTreeMap<PanelSlot, CyclicIngredient>,
	pub others: BTreeMap<PanelSlot, CyclicIngredient>,
	pub statics: BTreeMap<PanelSlot, ItemStack>,
	pub buttons: BTreeMap<SharedButton, PanelSlot>,
}

impl Panel {
	pub fn new() -> Self {
		Self {
			buttons: SharedButton::default_layout(),
			..Self::default()
		}
	}

	/// Every cycling slot, in slot order within ingredients, results, then others.
	pub fn ticked(&self) -> impl Iterator<Item = (&PanelSlot, &CyclicIngredient)> {
		self.ingredients
			.iter()
			.chain(self.results.iter())
			.chain(self.others.iter())
	}

	/// Advances every cycling slot, ticking shared dependencies once.
	pub fn tick_all(&self) {
		CyclicIngredient::tick_all(self.ticked().map(|(_, value)| value));
	}

	/// Items currently displayed in every occupied slot.
	pub fn render(&self) -> BTreeMap<PanelSlot, ItemStack> {
		let mut view: BTreeMap<PanelSlot, ItemStack> = self.statics.clone();
		view.extend(self.ticked().map(|(slot, value)| (*slot, value.current_item())));
		view
	}

	/// The value representing the panel's output: its first result slot.
	pub fn symbol(&self) -> Option<&CyclicIngredient> {
		self.results.values().next()
	}
}

/// Builds the panel for one recipe of a process.
pub trait PanelFactory: Send + Sync {
	fn create(&self, recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError>;
}

impl<F> PanelFactory for F
where
	F: Fn(&RecipeRef, &PanelContext) -> Result<Panel, PanelError> + Send + Sync,
{
	fn create(&self, recipe: &RecipeRef, context: &PanelContext) -> Result<Panel, PanelError> {
		self(recipe, context)
	}
}
