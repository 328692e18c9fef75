use std::sync::Arc;

use quern_primitives::RecipeRef;
use quern_registry::ProcessRef;

use super::ReaderError;
use crate::ProcessRecipeSet;

/// Cursor over the recipes of one process.
#[derive(Debug, Clone)]
pub struct ProcessRecipeReader {
	set: Arc<ProcessRecipeSet>,
	current: RecipeRef,
}

impl ProcessRecipeReader {
	/// Reader positioned at the first recipe of `set`.
	pub fn new(set: Arc<ProcessRecipeSet>) -> Result<Self, ReaderError> {
		let current = set.first().ok_or_else(|| ReaderError::EmptySet {
			process: set.process().key().clone(),
		})?;
		Ok(Self { set, current })
	}

	/// Reader positioned at `recipe`, which must belong to `set`.
	pub fn at(set: Arc<ProcessRecipeSet>, recipe: &RecipeRef) -> Result<Self, ReaderError> {
		let current = set.get(recipe.key()).ok_or_else(|| ReaderError::RecipeNotInSet {
			recipe: recipe.key().clone(),
			process: set.process().key().clone(),
		})?;
		Ok(Self { set, current })
	}

	/// Reader whose current recipe is taken as given, member or not.
	pub(super) fn from_parts(set: Arc<ProcessRecipeSet>, current: RecipeRef) -> Self {
		Self { set, current }
	}

	/// The set this reader walks, readable but not writable from outside the crate.
	///
	/// ```compile_fail
	/// # use quern_index::ProcessRecipeReader;
	/// fn strip(reader: &ProcessRecipeReader) {
	///     reader.set().remove(reader.current().key());
	/// }
	/// ```
	pub fn set(&self) -> &Arc<ProcessRecipeSet> {
		&self.set
	}

	pub fn process(&self) -> &ProcessRef {
		self.set.process()
	}

	pub fn current(&self) -> &RecipeRef {
		&self.current
	}

	pub fn has_next(&self) -> bool {
		self.set.higher(self.current.key()).is_some()
	}

	pub fn has_previous(&self) -> bool {
		self.set.lower(self.current.key()).is_some()
	}

	pub fn is_first(&self) -> bool {
		!self.has_previous()
	}

	pub fn is_last(&self) -> bool {
		!self.has_next()
	}

	/// Moves to the next recipe. Fails at the last recipe.
	pub fn next(&mut self) -> Result<&RecipeRef, ReaderError> {
		let next = self
			.set
			.higher(self.current.key())
			.ok_or_else(|| ReaderError::NoNextRecipe {
				current: self.current.key().clone(),
			})?;
		tracing::trace!(process = %self.process().key(), recipe = %next.key(), "reader next");
		self.current = next;
		Ok(&self.current)
	}

	/// Moves to the previous recipe. Fails at the first recipe.
	pub fn previous(&mut self) -> Result<&RecipeRef, ReaderError> {
		let previous = self
			.set
			.lower(self.current.key())
			.ok_or_else(|| ReaderError::NoPreviousRecipe {
				current: self.current.key().clone(),
			})?;
		tracing::trace!(process = %self.process().key(), recipe = %previous.key(), "reader previous");
		self.current = previous;
		Ok(&self.current)
	}

	pub fn first(&mut self) -> Result<&RecipeRef, ReaderError> {
		self.current = self.set.first().ok_or_else(|| self.empty())?;
		Ok(&self.current)
	}

	pub fn last(&mut self) -> Result<&RecipeRef, ReaderError> {
		self.current = self.set.last().ok_or_else(|| self.empty())?;
		Ok(&self.current)
	}

	/// Moves to `recipe`. Fails, leaving the position unchanged, if it is not a member.
	pub fn set_current(&mut self, recipe: &RecipeRef) -> Result<(), ReaderError> {
		self.current = self
			.set
			.get(recipe.key())
			.ok_or_else(|| ReaderError::RecipeNotInSet {
				recipe: recipe.key().clone(),
				process: self.process().key().clone(),
			})?;
		Ok(())
	}

	fn empty(&self) -> ReaderError {
		ReaderError::EmptySet {
			process: self.process().key().clone(),
		}
	}
}

/// Equal sets by content and the same current recipe key.
impl PartialEq for ProcessRecipeReader {
	fn eq(&self, other: &Self) -> bool {
		self.current == other.current && (Arc::ptr_eq(&self.set, &other.set) || self.set == other.set)
	}
}

impl Eq for ProcessRecipeReader {}
