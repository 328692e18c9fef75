//! Cycling and computed slot values.
//!
//! # Role
//!
//! A [`CyclicIngredient`] drives one animated panel slot. A *predefined* ingredient
//! cycles through a fixed list of options. A *dependent* ingredient has no state of
//! its own: every read recomputes its item from the current items of its
//! dependencies.
//!
//! # Invariants
//!
//! - Dependencies form a DAG. Dependencies are existing ingredients taken by handle,
//!   so a node can never list itself or a later node.
//! - A dependent ingredient has at least one dependency.
//!   - Enforced in: [`CyclicIngredient::dependent`]
//! - `tick_forward`, `tick_backward` and `set_index` never move a dependent or pinned
//!   ingredient; only `tick_with_dependencies` advances a dependent's subtree.
//!   - Tested by: `tests::test_dependent_ignores_self_ticks`
//! - A shared dependency advances once per tick, however many paths reach it.
//!   - Tested by: `tests::test_shared_leaf_ticks_once`

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use quern_primitives::{ItemStack, RecipeChoice};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Computes a dependent ingredient's item from its dependencies' current items.
pub type Producer = Arc<dyn Fn(&[ItemStack]) -> ItemStack + Send + Sync>;

/// Misuse of a [`CyclicIngredient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CyclicError {
	#[error("a cycling ingredient needs at least one option")]
	NoOptions,
	#[error("a dependent ingredient needs at least one dependency")]
	NoDependencies,
	#[error("{item:?} is not one of the options")]
	NotFound { item: ItemStack },
	#[error("{operation} is not supported on a dependent ingredient")]
	Unsupported { operation: &'static str },
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
	index: usize,
	pinned: bool,
}

enum Node {
	Predefined {
		options: Vec<ItemStack>,
		cursor: Mutex<Cursor>,
	},
	Dependent {
		producer: Producer,
		dependencies: SmallVec<[CyclicIngredient; 2]>,
	},
}

/// Shared handle to a cycling or computed slot value.
///
/// Clones share state: ticking one clone moves them all.
#[derive(Clone)]
pub struct CyclicIngredient(Arc<Node>);

impl CyclicIngredient {
	/// Cycles through `options`, starting at `seed % options.len()`.
	pub fn new(seed: u64, options: impl IntoIterator<Item = ItemStack>) -> Result<Self, CyclicError> {
		let options: Vec<ItemStack> = options.into_iter().collect();
		if options.is_empty() {
			return Err(CyclicError::NoOptions);
		}
		let index = (seed % options.len() as u64) as usize;
		Ok(Self(Arc::new(Node::Predefined {
			options,
			cursor: Mutex::new(Cursor { index, pinned: false }),
		})))
	}

	/// A value that always shows `item`.
	pub fn single(item: ItemStack) -> Self {
		Self(Arc::new(Node::Predefined {
			options: vec![item],
			cursor: Mutex::new(Cursor {
				index: 0,
				pinned: false,
			}),
		}))
	}

	/// Cycles through the options of a recipe choice.
	pub fn from_choice(seed: u64, choice: &RecipeChoice) -> Result<Self, CyclicError> {
		Self::new(seed, choice.options().iter().cloned())
	}

	/// A value computed from `dependencies` on every read.
	pub fn dependent(
		producer: impl Fn(&[ItemStack]) -> ItemStack + Send + Sync + 'static,
		dependencies: impl IntoIterator<Item = CyclicIngredient>,
	) -> Result<Self, CyclicError> {
		let dependencies: SmallVec<[CyclicIngredient; 2]> = dependencies.into_iter().collect();
		if dependencies.is_empty() {
			return Err(CyclicError::NoDependencies);
		}
		Ok(Self(Arc::new(Node::Dependent {
			producer: Arc::new(producer),
			dependencies,
		})))
	}

	pub fn is_dependent(&self) -> bool {
		matches!(*self.0, Node::Dependent { .. })
	}

	/// The item to display now.
	pub fn current_item(&self) -> ItemStack {
		match &*self.0 {
			Node::Predefined { options, cursor } => options[cursor.lock().index].clone(),
			Node::Dependent { producer, dependencies } => {
				let items: SmallVec<[ItemStack; 2]> = dependencies.iter().map(Self::current_item).collect();
				producer(&items)
			}
		}
	}

	/// Advances this value by one option. No effect on dependent or pinned values.
	pub fn tick_forward(&self) {
		self.step(1);
	}

	/// Moves this value back by one option. No effect on dependent or pinned values.
	pub fn tick_backward(&self) {
		self.step(-1);
	}

	fn step(&self, delta: isize) {
		if let Node::Predefined { options, cursor } = &*self.0 {
			let mut cursor = cursor.lock();
			if !cursor.pinned {
				let len = options.len() as isize;
				cursor.index = (cursor.index as isize + delta).rem_euclid(len) as usize;
			}
		}
	}

	/// Advances this value and every value it depends on, each exactly once.
	pub fn tick_with_dependencies(&self) {
		Self::tick_all([self]);
	}

	/// Advances every predefined value reachable from `roots`, each exactly once.
	pub fn tick_all<'a>(roots: impl IntoIterator<Item = &'a CyclicIngredient>) {
		let mut seen = FxHashSet::default();
		let mut stack: Vec<&CyclicIngredient> = roots.into_iter().collect();
		while let Some(node) = stack.pop() {
			if !seen.insert(Arc::as_ptr(&node.0)) {
				continue;
			}
			match &*node.0 {
				Node::Predefined { .. } => node.tick_forward(),
				Node::Dependent { dependencies, .. } => stack.extend(dependencies.iter()),
			}
		}
	}

	/// Locks the value on `item`. Later ticks leave it in place.
	pub fn pin(&self, item: &ItemStack) -> Result<(), CyclicError> {
		match &*self.0 {
			Node::Predefined { options, cursor } => {
				let index = options
					.iter()
					.position(|o| o == item)
					.ok_or_else(|| CyclicError::NotFound { item: item.clone() })?;
				*cursor.lock() = Cursor { index, pinned: true };
				Ok(())
			}
			Node::Dependent { .. } => Err(CyclicError::Unsupported { operation: "pin" }),
		}
	}

	pub fn unpin(&self) {
		if let Node::Predefined { cursor, .. } = &*self.0 {
			cursor.lock().pinned = false;
		}
	}

	pub fn is_pinned(&self) -> bool {
		match &*self.0 {
			Node::Predefined { cursor, .. } => cursor.lock().pinned,
			Node::Dependent { .. } => false,
		}
	}

	/// Jumps to `index % option_count`. No effect on dependent or pinned values.
	pub fn set_index(&self, index: usize) {
		if let Node::Predefined { options, cursor } = &*self.0 {
			let mut cursor = cursor.lock();
			if !cursor.pinned {
				cursor.index = index % options.len();
			}
		}
	}

	/// Current position, or `None` for a dependent value.
	pub fn index(&self) -> Option<usize> {
		match &*self.0 {
			Node::Predefined { cursor, .. } => Some(cursor.lock().index),
			Node::Dependent { .. } => None,
		}
	}

	/// Number of options, or `None` for a dependent value.
	pub fn option_count(&self) -> Option<usize> {
		match &*self.0 {
			Node::Predefined { options, .. } => Some(options.len()),
			Node::Dependent { .. } => None,
		}
	}

	/// Whether the displayed item can change. Always true for dependent values.
	pub fn has_multiple_options(&self) -> bool {
		self.option_count().is_none_or(|count| count > 1)
	}

	pub fn options(&self) -> Result<&[ItemStack], CyclicError> {
		match &*self.0 {
			Node::Predefined { options, .. } => Ok(options),
			Node::Dependent { .. } => Err(CyclicError::Unsupported { operation: "options" }),
		}
	}

	pub fn contains(&self, item: &ItemStack) -> Result<bool, CyclicError> {
		Ok(self.options()?.contains(item))
	}

	pub fn dependencies(&self) -> &[CyclicIngredient] {
		match &*self.0 {
			Node::Predefined { .. } => &[],
			Node::Dependent { dependencies, .. } => dependencies,
		}
	}

	/// Strips single-dependency wrappers, which only decorate the value beneath.
	fn undecorated(&self) -> &Self {
		let mut node = self;
		while let [only] = node.dependencies() {
			node = only;
		}
		node
	}

	/// Same options and dependency structure, ignoring positions, pins and decoration.
	pub fn loose_eq(&self, other: &Self) -> bool {
		self.structural_eq(other, false)
	}

	/// Same structure, positions and pins.
	pub fn exact_eq(&self, other: &Self) -> bool {
		self.structural_eq(other, true)
	}

	fn structural_eq(&self, other: &Self, exact: bool) -> bool {
		let (a, b) = if exact { (self, other) } else { (self.undecorated(), other.undecorated()) };
		if Arc::ptr_eq(&a.0, &b.0) {
			return true;
		}
		match (&*a.0, &*b.0) {
			(Node::Predefined { options: oa, cursor: ca }, Node::Predefined { options: ob, cursor: cb }) => {
				if oa != ob {
					return false;
				}
				if !exact {
					return true;
				}
				let ca = *ca.lock();
				let cb = *cb.lock();
				ca.index == cb.index && ca.pinned == cb.pinned
			}
			(Node::Dependent { dependencies: da, .. }, Node::Dependent { dependencies: db, .. }) => {
				da.len() == db.len() && da.iter().zip(db.iter()).all(|(x, y)| x.structural_eq(y, exact))
			}
			_ => false,
		}
	}
}

impl PartialEq for CyclicIngredient {
	fn eq(&self, other: &Self) -> bool {
		self.exact_eq(other)
	}
}

impl Eq for CyclicIngredient {}

impl fmt::Debug for CyclicIngredient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &*self.0 {
			Node::Predefined { options, cursor } => {
				let cursor = *cursor.lock();
				f.debug_struct("Predefined")
					.field("options", options)
					.field("index", &cursor.index)
					.field("pinned", &cursor.pinned)
					.finish()
			}
			Node::Dependent { dependencies, .. } => f
				.debug_struct("Dependent")
				.field("dependencies", dependencies)
				.finish_non_exhaustive(),
		}
	}
}
