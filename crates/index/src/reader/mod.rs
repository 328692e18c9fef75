//! Cursors over recipe sets and maps.
//!
//! # Role
//!
//! A [`ProcessRecipeReader`] walks the recipes of one process; a
//! [`MultiProcessRecipeReader`] walks the processes of one query result and owns the
//! reader of its current process.
//!
//! # Invariants
//!
//! - Stepping past either end is an error, never a wrap-around.
//!   - Tested by: `tests::test_no_wrap_at_ends`
//! - Selecting the already-current process keeps the current recipe.
//!   - Enforced in: [`MultiProcessRecipeReader::set_current_process`]
//!   - Tested by: `tests::test_set_same_process_keeps_recipe`
//! - Cloning a multi-process reader detaches its map, so moving one clone never moves another.
//!   - Tested by: `tests::test_clone_is_detached`
//!
//! # Concurrency
//!
//! Readers are not shared between threads while they move. The sets they read may
//! change underneath them; neighbour queries are answered against the latest
//! snapshot, so a reader whose current recipe was removed still steps to the right
//! neighbours.

use quern_primitives::Key;

mod multi;
mod process;

pub use multi::MultiProcessRecipeReader;
pub use process::ProcessRecipeReader;

/// Failures of reader navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReaderError {
	#[error("no recipes for process {process}")]
	EmptySet { process: Key },
	#[error("no processes in {grouping}")]
	EmptyMap { grouping: String },
	#[error("no recipe after {current}")]
	NoNextRecipe { current: Key },
	#[error("no recipe before {current}")]
	NoPreviousRecipe { current: Key },
	#[error("no process after {current}")]
	NoNextProcess { current: Key },
	#[error("no process before {current}")]
	NoPreviousProcess { current: Key },
	#[error("recipe {recipe} is not part of process {process}")]
	RecipeNotInSet { recipe: Key, process: Key },
	#[error("process {process} is not part of {grouping}")]
	ProcessNotInMap { process: Key, grouping: String },
}
