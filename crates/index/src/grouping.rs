use std::fmt;

use quern_primitives::{ItemStack, Key};
use quern_registry::ProcessRef;

/// Why the recipes of a [`crate::MultiProcessRecipeMap`] were gathered together.
///
/// Used to identify bookmarked views; queries never route on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Grouping {
	ByResult(ItemStack),
	ByIngredient(ItemStack),
	ByOther(ItemStack),
	ByProcess(ProcessRef),
	ByKey(Key),
	AllRecipes,
}

impl fmt::Display for Grouping {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ByResult(item) => write!(f, "result {}", item.kind()),
			Self::ByIngredient(item) => write!(f, "ingredient {}", item.kind()),
			Self::ByOther(item) => write!(f, "other {}", item.kind()),
			Self::ByProcess(process) => write!(f, "process {}", process.key()),
			Self::ByKey(key) => write!(f, "key {key}"),
			Self::AllRecipes => f.write_str("all recipes"),
		}
	}
}
