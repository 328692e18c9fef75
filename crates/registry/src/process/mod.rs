//! Processes and their total order.
//!
//! # Role
//!
//! A process is a named category of transformation (crafting, smelting, ...) with a
//! predicate deciding which recipes it handles. Every sorted container in the index
//! stores processes in the order defined here.
//!
//! # Invariants
//!
//! - The primary process sorts first and the fallback process sorts last.
//!   - Tested by: `tests::prop_order_is_strict_weak`
//! - Processes in the host namespace sort before third-party processes.
//! - Equal keys imply equal ranks, so `Ord` agrees with key equality.
//!   - Enforced in: [`ProcessRank::of`]
//!   - Failure symptom: one process stored twice in a `BTreeMap`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use quern_primitives::{ItemStack, Key, QUERN_NAMESPACE, Recipe};

mod registry;

pub use registry::ProcessRegistry;

/// Predicate deciding whether a process handles a recipe.
pub type RecipeMatcher = Arc<dyn Fn(&dyn Recipe) -> bool + Send + Sync>;

/// Shared handle to a registered process.
pub type ProcessRef = Arc<Process>;

/// Key of the primary process.
pub const PRIMARY_PROCESS: (&str, &str) = ("minecraft", "crafting");
/// Key of the fallback process.
pub const FALLBACK_PROCESS: (&str, &str) = (QUERN_NAMESPACE, "undefined");

static UNDEFINED: LazyLock<ProcessRef> = LazyLock::new(|| {
	Arc::new(Process::new(
		Key::from_static(FALLBACK_PROCESS.0, FALLBACK_PROCESS.1),
		ItemStack::new(Key::from_static("minecraft", "barrier")),
		|_| true,
	))
});

/// Coarse position of a process in the total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessRank {
	Primary,
	Host,
	ThirdParty,
	Fallback,
}

impl ProcessRank {
	/// Rank derived from the key alone.
	pub fn of(key: &Key) -> Self {
		if key.namespace() == PRIMARY_PROCESS.0 && key.value() == PRIMARY_PROCESS.1 {
			Self::Primary
		} else if key.namespace() == FALLBACK_PROCESS.0 && key.value() == FALLBACK_PROCESS.1 {
			Self::Fallback
		} else if key.is_minecraft() {
			Self::Host
		} else {
			Self::ThirdParty
		}
	}
}

/// A named recipe category.
#[derive(Clone)]
pub struct Process {
	key: Key,
	rank: ProcessRank,
	symbol: ItemStack,
	stations: Vec<ItemStack>,
	matcher: RecipeMatcher,
}

impl Process {
	pub fn new(key: Key, symbol: ItemStack, matcher: impl Fn(&dyn Recipe) -> bool + Send + Sync + 'static) -> Self {
		Self {
			rank: ProcessRank::of(&key),
			key,
			symbol,
			stations: Vec::new(),
			matcher: Arc::new(matcher),
		}
	}

	/// Adds a physical or virtual station performing this process.
	pub fn with_station(mut self, station: ItemStack) -> Self {
		self.stations.push(station);
		self
	}

	/// The fallback process, which handles every recipe.
	pub fn undefined() -> ProcessRef {
		Arc::clone(&UNDEFINED)
	}

	pub fn key(&self) -> &Key {
		&self.key
	}

	pub fn rank(&self) -> ProcessRank {
		self.rank
	}

	pub fn symbol(&self) -> &ItemStack {
		&self.symbol
	}

	pub fn stations(&self) -> &[ItemStack] {
		&self.stations
	}

	pub fn is_fallback(&self) -> bool {
		self.rank == ProcessRank::Fallback
	}

	/// Returns true if this process handles `recipe`.
	pub fn can_handle(&self, recipe: &dyn Recipe) -> bool {
		(self.matcher)(recipe)
	}
}

impl PartialEq for Process {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl Eq for Process {}

impl Hash for Process {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key.hash(state);
	}
}

impl Ord for Process {
	fn cmp(&self, other: &Self) -> Ordering {
		self.rank
			.cmp(&other.rank)
			.then_with(|| self.key.cmp(&other.key))
	}
}

impl PartialOrd for Process {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Debug for Process {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Process")
			.field("key", &self.key)
			.field("rank", &self.rank)
			.field("stations", &self.stations.len())
			.finish_non_exhaustive()
	}
}
