use quern_index::Tag;
use quern_primitives::{ItemStack, RecipeRef};

/// The host's view of its loaded recipes, read on every index build.
pub trait RecipeSource {
	/// Every currently loaded recipe.
	fn recipes(&self) -> Vec<RecipeRef>;

	/// Items that burn as fuel.
	fn fuels(&self) -> Vec<ItemStack> {
		Vec::new()
	}

	/// Item tags.
	fn tags(&self) -> Vec<Tag> {
		Vec::new()
	}
}
