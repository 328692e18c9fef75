//! Item stacks and recipe choices.
//!
//! An [`ItemStack`] carries display data (amount, name, lore) but its identity is the
//! item kind plus an optional variant. Two stacks of the same kind and variant are
//! equal whatever their amount or decoration, so a stack normalized with
//! [`ItemStack::as_one`] can be used directly as a map key.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Key;

/// A quantity of one item kind, optionally refined by a variant tag.
#[derive(Clone, Serialize, Deserialize)]
pub struct ItemStack {
	kind: Key,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	variant: Option<Arc<str>>,
	#[serde(default = "one")]
	amount: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	display_name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	lore: Vec<String>,
}

fn one() -> u32 {
	1
}

impl ItemStack {
	/// A single item of `kind` without variant or decoration.
	pub fn new(kind: Key) -> Self {
		Self {
			kind,
			variant: None,
			amount: 1,
			display_name: None,
			lore: Vec::new(),
		}
	}

	pub fn with_amount(mut self, amount: u32) -> Self {
		self.amount = amount;
		self
	}

	pub fn with_variant(mut self, variant: impl Into<Arc<str>>) -> Self {
		self.variant = Some(variant.into());
		self
	}

	pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
		self.display_name = Some(name.into());
		self
	}

	/// Appends one line of descriptive text.
	pub fn with_lore_line(mut self, line: impl Into<String>) -> Self {
		self.lore.push(line.into());
		self
	}

	pub fn kind(&self) -> &Key {
		&self.kind
	}

	pub fn variant(&self) -> Option<&str> {
		self.variant.as_deref()
	}

	pub fn amount(&self) -> u32 {
		self.amount
	}

	pub fn lore(&self) -> &[String] {
		&self.lore
	}

	/// Name shown to players: the explicit display name, or the kind's minimal form.
	pub fn display_name(&self) -> String {
		self.display_name
			.clone()
			.unwrap_or_else(|| self.kind.as_minimal_string())
	}

	/// Identity of this stack with amount and decoration stripped.
	pub fn as_one(&self) -> Self {
		Self {
			kind: self.kind.clone(),
			variant: self.variant.clone(),
			amount: 1,
			display_name: None,
			lore: Vec::new(),
		}
	}

	/// Returns true if both stacks have the same kind and variant.
	pub fn is_similar(&self, other: &Self) -> bool {
		self == other
	}
}

impl PartialEq for ItemStack {
	fn eq(&self, other: &Self) -> bool {
		self.kind == other.kind && self.variant == other.variant
	}
}

impl Eq for ItemStack {}

impl Hash for ItemStack {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.kind.hash(state);
		self.variant.hash(state);
	}
}

impl Ord for ItemStack {
	fn cmp(&self, other: &Self) -> Ordering {
		self.kind
			.cmp(&other.kind)
			.then_with(|| self.variant.cmp(&other.variant))
	}
}

impl PartialOrd for ItemStack {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Debug for ItemStack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.kind)?;
		if let Some(variant) = &self.variant {
			write!(f, "[{variant}]")?;
		}
		if self.amount != 1 {
			write!(f, " x{}", self.amount)?;
		}
		Ok(())
	}
}

impl From<Key> for ItemStack {
	fn from(kind: Key) -> Self {
		Self::new(kind)
	}
}

/// The acceptable items for one input slot of a recipe, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeChoice(Vec<ItemStack>);

impl RecipeChoice {
	pub fn new(options: impl IntoIterator<Item = ItemStack>) -> Self {
		Self(options.into_iter().collect())
	}

	/// A choice accepting exactly one item.
	pub fn single(item: ItemStack) -> Self {
		Self(vec![item])
	}

	pub fn options(&self) -> &[ItemStack] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if `item` is one of the accepted options.
	pub fn accepts(&self, item: &ItemStack) -> bool {
		self.0.iter().any(|option| option == item)
	}

	/// Every option normalized to a single item.
	pub fn normalized(&self) -> impl Iterator<Item = ItemStack> + '_ {
		self.0.iter().map(ItemStack::as_one)
	}
}

impl From<ItemStack> for RecipeChoice {
	fn from(item: ItemStack) -> Self {
		Self::single(item)
	}
}

#[cfg(test)]
mod tests;
