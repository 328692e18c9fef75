//! Recipe records.
//!
//! A recipe is an immutable record identified by a unique [`Key`]. The index never
//! looks inside a record directly; it asks registered extractors for the record's
//! ingredients, results and other items. Records are shared as [`RecipeRef`]
//! handles, which order, hash and compare by key alone.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::{ItemStack, Key};

mod shapes;

pub use shapes::{
	CookingKind, CookingRecipe, ShapedRecipe, ShapelessRecipe, SmithingTransformRecipe, SmithingTrimRecipe,
	StonecuttingRecipe, TransmuteRecipe,
};

/// An immutable transformation record.
pub trait Recipe: Any + Send + Sync + fmt::Debug {
	/// Unique key of the record.
	fn key(&self) -> &Key;
	/// The item this record produces.
	fn result(&self) -> &ItemStack;
}

impl dyn Recipe {
	/// Returns true if the record's concrete shape is `T`.
	pub fn is<T: Recipe>(&self) -> bool {
		(self as &dyn Any).is::<T>()
	}

	pub fn downcast_ref<T: Recipe>(&self) -> Option<&T> {
		(self as &dyn Any).downcast_ref::<T>()
	}
}

/// Shared handle to a recipe record.
///
/// Equality, hashing and ordering use the record's key, so two handles to different
/// versions of the same recipe are the same set member.
#[derive(Clone)]
pub struct RecipeRef(Arc<dyn Recipe>);

impl RecipeRef {
	pub fn new<R: Recipe>(recipe: R) -> Self {
		Self(Arc::new(recipe))
	}

	pub fn from_arc(recipe: Arc<dyn Recipe>) -> Self {
		Self(recipe)
	}

	/// Returns true if both handles point at the same record allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Deref for RecipeRef {
	type Target = dyn Recipe;

	fn deref(&self) -> &Self::Target {
		&*self.0
	}
}

impl PartialEq for RecipeRef {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for RecipeRef {}

impl Hash for RecipeRef {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
	}
}

impl Ord for RecipeRef {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key().cmp(other.key())
	}
}

impl PartialOrd for RecipeRef {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Debug for RecipeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl<R: Recipe> From<R> for RecipeRef {
	fn from(recipe: R) -> Self {
		Self::new(recipe)
	}
}
