use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::{Key, RecipeRef};
use quern_registry::{Process, RegistrationLock, RegistryError};
use rustc_hash::FxHashMap;

use super::{Panel, PanelContext, PanelFactory, builtin};

const LABEL: &str = "panel";

/// Panel factories by process key.
pub struct PanelRegistry {
	lock: RegistrationLock,
	factories: ArcSwap<FxHashMap<Key, Arc<dyn PanelFactory>>>,
	warn_missing: bool,
}

impl PanelRegistry {
	/// `warn_missing` reports processes without a panel as warnings instead of debug events.
	pub fn new(lock: RegistrationLock, warn_missing: bool) -> Self {
		Self {
			lock,
			factories: ArcSwap::from_pointee(FxHashMap::default()),
			warn_missing,
		}
	}

	/// Registers the panel factory for `process`, replacing any previous one.
	pub fn register(&self, process: Key, factory: impl PanelFactory + 'static) -> Result<(), RegistryError> {
		self.lock.ensure_open(LABEL, "register", &process)?;
		let factory: Arc<dyn PanelFactory> = Arc::new(factory);
		self.factories.rcu(|current| {
			let mut next = FxHashMap::clone(current);
			next.insert(process.clone(), Arc::clone(&factory));
			next
		});
		tracing::debug!(process = %process, "registered panel");
		Ok(())
	}

	pub fn has_panel(&self, process: &Key) -> bool {
		self.factories.load().contains_key(process)
	}

	/// Lays out `recipe` with its process's panel.
	///
	/// Falls back to the undefined panel when the process has no panel or its panel
	/// cannot lay out the recipe.
	pub fn create(&self, process: &Process, recipe: &RecipeRef, context: &PanelContext) -> Panel {
		let factory = self.factories.load().get(process.key()).cloned();
		let Some(factory) = factory else {
			if self.warn_missing {
				tracing::warn!(process = %process.key(), "no panel registered for process");
			} else {
				tracing::debug!(process = %process.key(), "no panel registered for process");
			}
			return builtin::undefined(recipe, context);
		};
		match factory.create(recipe, context) {
			Ok(panel) => panel,
			Err(error) => {
				tracing::warn!(process = %process.key(), recipe = %recipe.key(), %error, "panel failed");
				builtin::undefined(recipe, context)
			}
		}
	}
}
