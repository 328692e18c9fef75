//! Item tag lookup.
//!
//! Tags name groups of item kinds (all planks, all logs, ...). The host fills a
//! [`TagIndex`] from its tag data and queries it to find which tags cover a set of
//! item kinds, for example to name a recipe choice that is exactly one tag.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::Key;
use rustc_hash::FxHashMap;

/// A named group of item kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	pub key: Key,
	pub items: Vec<Key>,
}

impl Tag {
	pub fn new(key: Key, items: impl IntoIterator<Item = Key>) -> Self {
		Self {
			key,
			items: items.into_iter().collect(),
		}
	}
}

#[derive(Default)]
struct TagTables {
	item_to_tags: FxHashMap<Key, BTreeSet<Key>>,
	tag_to_items: FxHashMap<Key, BTreeSet<Key>>,
}

/// Both directions of the tag relation, replaced wholesale on each rebuild.
#[derive(Default)]
pub struct TagIndex {
	tables: ArcSwap<TagTables>,
}

impl TagIndex {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the indexed tags with `tags`.
	pub fn index(&self, tags: impl IntoIterator<Item = Tag>) {
		let mut tables = TagTables::default();
		let mut mappings = 0usize;
		for tag in tags {
			let members: BTreeSet<Key> = tag.items.into_iter().collect();
			for item in &members {
				tables
					.item_to_tags
					.entry(item.clone())
					.or_default()
					.insert(tag.key.clone());
			}
			mappings += members.len();
			tables.tag_to_items.insert(tag.key, members);
		}
		tracing::info!(tags = tables.tag_to_items.len(), mappings, "tag index built");
		self.tables.store(Arc::new(tables));
	}

	/// Tags containing `item`.
	pub fn tags_of(&self, item: &Key) -> BTreeSet<Key> {
		self.tables
			.load()
			.item_to_tags
			.get(item)
			.cloned()
			.unwrap_or_default()
	}

	/// Members of `tag`, or `None` for an unknown tag.
	pub fn items_of(&self, tag: &Key) -> Option<BTreeSet<Key>> {
		self.tables.load().tag_to_items.get(tag).cloned()
	}

	/// Tags whose members are exactly `items`, no more and no fewer.
	pub fn tags_exactly_matching(&self, items: &BTreeSet<Key>) -> BTreeSet<Key> {
		let tables = self.tables.load();
		let mut members = items.iter();
		let Some(first) = members.next() else {
			return BTreeSet::new();
		};
		let Some(candidates) = tables.item_to_tags.get(first) else {
			return BTreeSet::new();
		};
		candidates
			.iter()
			.filter(|tag| tables.tag_to_items.get(*tag).is_some_and(|m| m == items))
			.cloned()
			.collect()
	}

	/// Number of distinct items belonging to at least one tag.
	pub fn indexed_item_count(&self) -> usize {
		self.tables.load().item_to_tags.len()
	}
}
