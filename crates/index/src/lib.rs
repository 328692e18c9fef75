//! Recipe index: concurrent multi-key lookup of recipes and stateful readers over the results.
//!
//! The [`RecipeIndex`] answers four query shapes (by key, by result, by ingredient, by
//! process, plus "other" items such as fuels) and hands out readers that walk the
//! matching recipes process by process.

mod grouping;
/// The root recipe index.
pub mod index;
/// Recipes grouped by process.
pub mod map;
/// Cursors over recipe sets and maps.
pub mod reader;
/// Ordered recipe sets for a single process.
pub mod set;
/// Item tag lookup.
pub mod tags;

#[cfg(test)]
mod test_fixtures;

pub use grouping::Grouping;
pub use index::{IndexOptions, IndexSummary, IndexedRecipe, RecipeIndex};
pub use map::MultiProcessRecipeMap;
pub use reader::{MultiProcessRecipeReader, ProcessRecipeReader, ReaderError};
pub use set::ProcessRecipeSet;
pub use tags::{Tag, TagIndex};
