//! Recipe browsing core.
//!
//! [`Quern`] ties the pieces together: it owns the registries, builds the
//! [`RecipeIndex`] from a host [`RecipeSource`], and keeps the server bookmarks and
//! per-player sessions. The component crates are re-exported for hosts that want to
//! work with them directly.

/// Configuration file model and loading.
pub mod config;
mod engine;
mod global;
mod logging;
mod source;

pub use config::{Config, ConfigError, DebugConfig, HistoryConfig, StyleConfig};
pub use engine::{Quern, QuernError};
pub use global::{install, installed, uninstall};
pub use logging::init_tracing;
pub use quern_display::{
	CyclicError, CyclicIngredient, Panel, PanelContext, PanelError, PanelFactory, PanelRegistry, PanelSlot, Rgb,
	SharedButton, Style,
};
pub use quern_index::{
	Grouping, IndexSummary, MultiProcessRecipeMap, MultiProcessRecipeReader, ProcessRecipeReader, ProcessRecipeSet,
	ReaderError, RecipeIndex, Tag, TagIndex,
};
pub use quern_primitives::{
	CookingKind, CookingRecipe, ItemStack, Key, KeyError, Recipe, RecipeChoice, RecipeRef, ShapedRecipe,
	ShapelessRecipe, SmithingTransformRecipe, SmithingTrimRecipe, StonecuttingRecipe, TransmuteRecipe,
};
pub use quern_registry::{
	ExtractorRegistry, Fuels, ItemSet, Process, ProcessRef, ProcessRegistry, RecipeExtractor, RegistrationLock,
	RegistryError, ShapeExtractor,
};
pub use quern_session::{
	Bookmark, BookmarkCollection, NavigationHistory, PlayerSession, PlayerSessions, ReaderHistory,
	ServerBookmarkRegistry,
};
pub use source::RecipeSource;
