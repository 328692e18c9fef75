use std::sync::Arc;

use quern_primitives::RecipeRef;
use quern_registry::ProcessRef;

use super::{ProcessRecipeReader, ReaderError};
use crate::{Grouping, MultiProcessRecipeMap};

/// Cursor over the processes of a [`MultiProcessRecipeMap`], holding a recipe reader
/// for the current process.
///
/// `Clone` produces a detached copy: the map's structure is copied so the clone keeps
/// its own view of the recipes and its own position.
#[derive(Debug)]
pub struct MultiProcessRecipeReader {
	map: Arc<MultiProcessRecipeMap>,
	inner: ProcessRecipeReader,
}

impl MultiProcessRecipeReader {
	/// Reader positioned at the first recipe of the first process.
	pub fn new(map: Arc<MultiProcessRecipeMap>) -> Result<Self, ReaderError> {
		let process = map.first_process().ok_or_else(|| ReaderError::EmptyMap {
			grouping: map.grouping().to_string(),
		})?;
		Self::at_process(map, &process)
	}

	/// Reader positioned at the first recipe of `process`.
	pub fn at_process(map: Arc<MultiProcessRecipeMap>, process: &ProcessRef) -> Result<Self, ReaderError> {
		let inner = ProcessRecipeReader::new(Self::set_of(&map, process)?)?;
		Ok(Self { map, inner })
	}

	/// Reader positioned at `recipe` within `process`.
	pub fn at_recipe(
		map: Arc<MultiProcessRecipeMap>,
		process: &ProcessRef,
		recipe: &RecipeRef,
	) -> Result<Self, ReaderError> {
		let inner = ProcessRecipeReader::at(Self::set_of(&map, process)?, recipe)?;
		Ok(Self { map, inner })
	}

	/// Repositions at `process` and, if given, `recipe`.
	///
	/// Each part that does not resolve is ignored, leaving the previous position.
	pub fn starting_at(mut self, process: &ProcessRef, recipe: Option<&RecipeRef>) -> Self {
		if self.set_current_process(process).is_ok()
			&& let Some(recipe) = recipe
		{
			let _ = self.inner.set_current(recipe);
		}
		self
	}

	fn set_of(
		map: &MultiProcessRecipeMap,
		process: &ProcessRef,
	) -> Result<Arc<crate::ProcessRecipeSet>, ReaderError> {
		map.set(process).ok_or_else(|| ReaderError::ProcessNotInMap {
			process: process.key().clone(),
			grouping: map.grouping().to_string(),
		})
	}

	/// The map this reader walks. Only its read accessors are public; the index alone
	/// changes what it holds.
	///
	/// ```compile_fail
	/// # use quern_index::MultiProcessRecipeReader;
	/// # use quern_primitives::Key;
	/// fn strip(reader: &MultiProcessRecipeReader, key: &Key) {
	///     reader.map().remove_recipe(reader.current_process(), key);
	/// }
	/// ```
	pub fn map(&self) -> &Arc<MultiProcessRecipeMap> {
		&self.map
	}

	pub fn grouping(&self) -> &Grouping {
		self.map.grouping()
	}

	pub fn current_process(&self) -> &ProcessRef {
		self.inner.process()
	}

	pub fn current_recipe(&self) -> &RecipeRef {
		self.inner.current()
	}

	pub fn process_reader(&self) -> &ProcessRecipeReader {
		&self.inner
	}

	pub fn process_reader_mut(&mut self) -> &mut ProcessRecipeReader {
		&mut self.inner
	}

	/// Switches to `process`, positioned at its first recipe.
	///
	/// Selecting the current process is a no-op that keeps the current recipe, unless the
	/// map has since replaced that process's set.
	pub fn set_current_process(&mut self, process: &ProcessRef) -> Result<(), ReaderError> {
		let set = Self::set_of(&self.map, process)?;
		if self.current_process() == process && Arc::ptr_eq(self.inner.set(), &set) {
			return Ok(());
		}
		self.inner = ProcessRecipeReader::new(set)?;
		tracing::trace!(process = %process.key(), grouping = %self.grouping(), "reader switched process");
		Ok(())
	}

	pub fn has_next(&self) -> bool {
		self.map.higher_process(self.current_process()).is_some()
	}

	pub fn has_previous(&self) -> bool {
		self.map.lower_process(self.current_process()).is_some()
	}

	/// Moves to the first recipe of the next process. Fails at the last process.
	pub fn next(&mut self) -> Result<&ProcessRef, ReaderError> {
		let next = self
			.map
			.higher_process(self.current_process())
			.ok_or_else(|| ReaderError::NoNextProcess {
				current: self.current_process().key().clone(),
			})?;
		self.set_current_process(&next)?;
		Ok(self.current_process())
	}

	/// Moves to the first recipe of the previous process. Fails at the first process.
	pub fn previous(&mut self) -> Result<&ProcessRef, ReaderError> {
		let previous = self
			.map
			.lower_process(self.current_process())
			.ok_or_else(|| ReaderError::NoPreviousProcess {
				current: self.current_process().key().clone(),
			})?;
		self.set_current_process(&previous)?;
		Ok(self.current_process())
	}

	/// Returns true if both readers show the same recipes, wherever they are positioned.
	pub fn same_view(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.map, &other.map) || self.map == other.map
	}
}

impl Clone for MultiProcessRecipeReader {
	fn clone(&self) -> Self {
		let map = Arc::new(self.map.detached());
		let set = map
			.set(self.current_process())
			.unwrap_or_else(|| Arc::new(self.inner.set().detached()));
		let inner = ProcessRecipeReader::from_parts(set, self.current_recipe().clone());
		Self { map, inner }
	}
}

/// Same view by content, same current process and same current recipe.
impl PartialEq for MultiProcessRecipeReader {
	fn eq(&self, other: &Self) -> bool {
		self.current_process() == other.current_process()
			&& self.current_recipe() == other.current_recipe()
			&& self.same_view(other)
	}
}

impl Eq for MultiProcessRecipeReader {}
