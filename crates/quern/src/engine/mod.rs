//! The quern instance.
//!
//! # Role
//!
//! Owns every registry, the tag index, the bookmark stores and the live
//! [`RecipeIndex`]. Hosts register their own processes, extractors and panels, then
//! call [`Quern::initialize`] once their recipes are loaded.
//!
//! # Invariants
//!
//! - Registration is only possible before initialization; `initialize` engages the
//!   shared lock before building the first index.
//!   - Tested by: `tests::test_registration_closes_on_initialize`
//! - `index()` is `None` until the first build completes, then always returns a fully
//!   built index. Rebuilds fill a fresh index and swap it in whole.
//!   - Tested by: `tests::test_reload_swaps_index`
//!
//! # Concurrency
//!
//! Readers of [`Quern::index`] never block. Builds are serialized by `build`.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use quern_display::{Panel, PanelContext, PanelFactory, PanelRegistry, Style, panel::builtin as builtin_panels};
use quern_index::{IndexOptions, MultiProcessRecipeReader, RecipeIndex, TagIndex};
use quern_primitives::{ItemStack, Key};
use quern_registry::{
	ExtractorRegistry, Fuels, Process, ProcessRef, ProcessRegistry, RecipeExtractor, RegistrationLock, RegistryError,
	builtins,
};
use quern_session::{Bookmark, PlayerSessions, ServerBookmarkRegistry};

use crate::{Config, RecipeSource};

/// Lifecycle and registration failures.
#[derive(Debug, thiserror::Error)]
pub enum QuernError {
	#[error(transparent)]
	Registry(#[from] RegistryError),
	#[error("quern is already initialized")]
	AlreadyInitialized,
	#[error("quern is not initialized")]
	NotInitialized,
	#[error("a quern instance is already installed")]
	AlreadyInstalled,
}

pub struct Quern {
	config: Config,
	style: Style,
	lock: RegistrationLock,
	processes: Arc<ProcessRegistry>,
	extractors: Arc<ExtractorRegistry>,
	panels: PanelRegistry,
	fuels: Fuels,
	tags: TagIndex,
	index: ArcSwapOption<RecipeIndex>,
	build: Mutex<()>,
	server_bookmarks: ServerBookmarkRegistry,
	sessions: PlayerSessions,
}

impl Quern {
	/// Creates an uninitialized instance with the builtin processes, extractors and panels.
	pub fn new(config: Config) -> Result<Self, QuernError> {
		let lock = RegistrationLock::new();
		let processes = Arc::new(ProcessRegistry::new(lock.clone()));
		let extractors = Arc::new(ExtractorRegistry::new(lock.clone()));
		let panels = PanelRegistry::new(lock.clone(), config.debug.missing_implementation_warnings);
		let fuels = Fuels::default();
		builtins::register(&processes, &extractors, &fuels)?;
		builtin_panels::register(&panels)?;

		Ok(Self {
			style: config.style(),
			sessions: PlayerSessions::new(config.history_capacity()),
			config,
			lock,
			processes,
			extractors,
			panels,
			fuels,
			tags: TagIndex::new(),
			index: ArcSwapOption::empty(),
			build: Mutex::new(()),
			server_bookmarks: ServerBookmarkRegistry::new(),
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn style(&self) -> &Style {
		&self.style
	}

	pub fn processes(&self) -> &Arc<ProcessRegistry> {
		&self.processes
	}

	pub fn extractors(&self) -> &Arc<ExtractorRegistry> {
		&self.extractors
	}

	pub fn panels(&self) -> &PanelRegistry {
		&self.panels
	}

	pub fn fuels(&self) -> &Fuels {
		&self.fuels
	}

	pub fn tags(&self) -> &TagIndex {
		&self.tags
	}

	pub fn server_bookmarks(&self) -> &ServerBookmarkRegistry {
		&self.server_bookmarks
	}

	pub fn sessions(&self) -> &PlayerSessions {
		&self.sessions
	}

	pub fn register_process(&self, process: Process) -> Result<Option<ProcessRef>, RegistryError> {
		self.processes.register(process)
	}

	pub fn register_extractor(&self, extractor: impl RecipeExtractor + 'static) -> Result<(), RegistryError> {
		self.extractors.register(extractor)
	}

	pub fn unregister_extractor(&self, key: &Key) -> Result<bool, RegistryError> {
		self.extractors.unregister(key)
	}

	pub fn register_panel(&self, process: Key, factory: impl PanelFactory + 'static) -> Result<(), RegistryError> {
		self.panels.register(process, factory)
	}

	pub fn is_initialized(&self) -> bool {
		self.lock.is_locked()
	}

	/// Closes registration and builds the first index from `source`.
	pub fn initialize(&self, source: &dyn RecipeSource) -> Result<Arc<RecipeIndex>, QuernError> {
		if !self.lock.lock() {
			return Err(QuernError::AlreadyInitialized);
		}
		tracing::debug!(
			processes = self.processes.len(),
			extractors = self.extractors.len(),
			"registration closed"
		);
		Ok(self.build(source))
	}

	/// Rebuilds the index from `source` and swaps it in.
	///
	/// Readers already handed out keep their old view.
	pub fn reload(&self, source: &dyn RecipeSource) -> Result<Arc<RecipeIndex>, QuernError> {
		if !self.is_initialized() {
			return Err(QuernError::NotInitialized);
		}
		Ok(self.build(source))
	}

	fn build(&self, source: &dyn RecipeSource) -> Arc<RecipeIndex> {
		let _build = self.build.lock();
		self.fuels.replace(source.fuels());
		self.tags.index(source.tags());

		let options = IndexOptions {
			warn_unhandled: self.config.debug.unhandled_recipes_warning,
		};
		let index = RecipeIndex::new(Arc::clone(&self.processes), Arc::clone(&self.extractors), options);
		let indexed = index.index_recipes(source.recipes());
		if self.config.debug.show_startup_index_summary {
			index.log_summary();
		}
		tracing::info!(recipes = indexed, fuels = self.fuels.len(), "recipe index built");

		let index = Arc::new(index);
		self.index.store(Some(Arc::clone(&index)));
		index
	}

	/// The live index, or `None` before initialization.
	pub fn index(&self) -> Option<Arc<RecipeIndex>> {
		self.index.load_full()
	}

	/// Panel inputs for one view; `seed` sets where every cycling slot starts.
	pub fn panel_context(&self, seed: u64) -> PanelContext {
		PanelContext {
			seed,
			style: self.style.clone(),
			fuels: self.fuels.snapshot().iter().cloned().collect(),
		}
	}

	/// Lays out the recipe `reader` is positioned at.
	pub fn panel(&self, reader: &MultiProcessRecipeReader, seed: u64) -> Panel {
		let context = self.panel_context(seed);
		self.panels
			.create(reader.current_process(), reader.current_recipe(), &context)
	}

	/// Bookmark for the recipe `key` in the live index.
	pub fn bookmark_key(&self, key: &Key) -> Option<Bookmark> {
		let index = self.index()?;
		Bookmark::from_key(&index, &self.panels, &self.panel_context(0), key)
	}

	/// Bookmark for the recipes producing `item` in the live index.
	pub fn bookmark_result(&self, item: &ItemStack) -> Option<Bookmark> {
		let index = self.index()?;
		Bookmark::from_result(&index, item, &self.style)
	}
}

impl std::fmt::Debug for Quern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Quern")
			.field("initialized", &self.is_initialized())
			.field("recipes", &self.index().map(|index| index.len()))
			.field("sessions", &self.sessions.count())
			.finish_non_exhaustive()
	}
}
