//! Registration surface for recipe processes and extractors.
//!
//! Registries are filled during startup, then frozen by engaging the shared
//! [`RegistrationLock`] before the recipe index is built. Reads never block: every
//! registry publishes its contents as an immutable snapshot behind an `ArcSwap`.

/// Builtin processes and extractors for the host's recipe shapes.
pub mod builtins;
/// Recipe extractors and their first-match registry.
pub mod extractor;
/// Registration lock and registry errors.
pub mod lock;
/// Processes, their total order and the process registry.
pub mod process;

pub use builtins::Fuels;
pub use extractor::{Extraction, ExtractorRegistry, ItemSet, RecipeExtractor, ShapeExtractor};
pub use lock::{RegistrationLock, RegistryError};
pub use process::{Process, ProcessRank, ProcessRef, ProcessRegistry, RecipeMatcher};
