//! Value types shared by every quern crate: namespaced keys, item stacks and recipe records.

/// Item stacks and recipe choices.
pub mod item;
/// Namespaced keys.
pub mod key;
/// Recipe records and the builtin recipe shapes.
pub mod recipe;

pub use item::{ItemStack, RecipeChoice};
pub use key::{Key, KeyError, MINECRAFT_NAMESPACE, QUERN_NAMESPACE};
pub use recipe::{
	CookingKind, CookingRecipe, Recipe, RecipeRef, ShapedRecipe, ShapelessRecipe, SmithingTransformRecipe,
	SmithingTrimRecipe, StonecuttingRecipe, TransmuteRecipe,
};
