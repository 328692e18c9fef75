use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quern_primitives::{Recipe, RecipeChoice, ShapedRecipe};

use super::*;
use crate::test_fixtures::{builtin_process, crafted, index, item, key, smelted};

fn process_keys(reader: &MultiProcessRecipeReader) -> Vec<String> {
	reader.map().processes().iter().map(|p| p.key().to_string()).collect()
}

/// Two recipes for the same result expose both processes in order.
#[test]
fn test_by_result_scenario() {
	let index = index();
	assert!(index.index_recipe(crafted("k1", "apple", &["stick"])));
	assert!(index.index_recipe(smelted("k2", "apple", "stick")));

	let mut reader = index.reader_by_result(&item("apple").with_amount(3)).unwrap();
	assert_eq!(process_keys(&reader), vec!["minecraft:crafting", "minecraft:smelting"]);
	assert_eq!(reader.grouping(), &Grouping::ByResult(item("apple")));

	reader.next().unwrap();
	assert_eq!(reader.current_recipe().key(), &key("k2"));
	reader.previous().unwrap();
	assert_eq!(reader.current_recipe().key(), &key("k1"));
}

/// Ingredient and other readers cover every extracted item.
#[test]
fn test_by_ingredient_and_other() {
	let index = index();
	index.index_recipe(crafted("bread", "bread", &["wheat", "wheat", "wheat"]));
	index.index_recipe(smelted("glass", "glass", "sand"));

	let reader = index.reader_by_ingredient(&item("wheat")).unwrap();
	assert_eq!(reader.current_recipe().key(), &key("bread"));
	assert!(index.reader_by_ingredient(&item("bread")).is_none());

	let fuel = index.reader_by_other(&item("coal")).unwrap();
	assert_eq!(fuel.grouping(), &Grouping::ByOther(item("coal")));
	assert_eq!(fuel.current_recipe().key(), &key("glass"));
}

/// Reading by key starts at the recipe inside its result's map.
#[test]
fn test_reader_by_key_positions_at_recipe() {
	let index = index();
	index.index_recipes([
		crafted("a_apple", "apple", &["stick"]),
		crafted("b_apple", "apple", &["leaves"]),
		smelted("c_apple", "apple", "sapling"),
	]);

	let reader = index.reader_by_key(&key("b_apple")).unwrap();
	assert_eq!(reader.grouping(), &Grouping::ByResult(item("apple")));
	assert_eq!(reader.current_process().key(), &key("crafting"));
	assert_eq!(reader.current_recipe().key(), &key("b_apple"));

	let reader = index.reader_by_key(&key("c_apple")).unwrap();
	assert_eq!(reader.current_process().key(), &key("smelting"));
	assert!(index.reader_by_key(&key("missing")).is_none());
}

/// Process readers share the live set but carry their own grouping.
#[test]
fn test_reader_by_process() {
	let index = index();
	index.index_recipe(crafted("a", "stick", &[]));
	let crafting = builtin_process("crafting");

	let reader = index.reader_by_process(&crafting).unwrap();
	assert_eq!(reader.grouping(), &Grouping::ByProcess(crafting.clone()));
	index.index_recipe(crafted("b", "stick", &[]));
	assert_eq!(reader.map().recipe_count(), 2);

	assert!(index.reader_by_process(&builtin_process("smelting")).is_none());
}

/// The all-recipes reader spans every process.
#[test]
fn test_reader_with_all_recipes() {
	let index = index();
	assert!(index.reader_with_all_recipes().is_none());
	index.index_recipes([crafted("a", "stick", &[]), smelted("b", "glass", "sand")]);
	let reader = index.reader_with_all_recipes().unwrap();
	assert_eq!(reader.grouping(), &Grouping::AllRecipes);
	assert_eq!(reader.map().recipe_count(), 2);
}

/// Re-indexing a key replaces the old version and its old item links.
#[test]
fn test_reindex_replaces() {
	let index = index();
	index.index_recipe(crafted("torch", "torch", &["coal"]));
	index.index_recipe(crafted("torch", "torch", &["charcoal"]));

	assert_eq!(index.len(), 1);
	assert!(index.reader_by_ingredient(&item("coal")).is_none());
	assert!(index.reader_by_ingredient(&item("charcoal")).is_some());
	assert_eq!(index.reader_by_result(&item("torch")).unwrap().map().recipe_count(), 1);
}

/// Unindexing removes the recipe everywhere and prunes empty maps.
#[test]
fn test_unindex_everywhere() {
	let index = index();
	index.index_recipes([crafted("k1", "apple", &["stick"]), smelted("k2", "apple", "stick")]);

	let removed = index.unindex_recipe(&key("k2")).unwrap();
	assert_eq!(removed.process.key(), &key("smelting"));
	assert!(index.reader_by_key(&key("k2")).is_none());
	assert!(index.reader_by_other(&item("coal")).is_none());
	let reader = index.reader_by_result(&item("apple")).unwrap();
	assert_eq!(process_keys(&reader), vec!["minecraft:crafting"]);

	assert!(index.unindex_recipe(&key("k2")).is_none());
	index.unindex_recipe(&key("k1"));
	assert!(index.reader_by_result(&item("apple")).is_none());
	assert!(index.reader_by_ingredient(&item("stick")).is_none());
	assert_eq!(index.summary().results, 0);
	assert!(index.is_empty());
}

/// Recipes no extractor handles are skipped without disturbing the rest.
#[test]
fn test_unhandled_recipe_skipped() {
	#[derive(Debug)]
	struct Mystery(Key, ItemStack);
	impl Recipe for Mystery {
		fn key(&self) -> &Key {
			&self.0
		}
		fn result(&self) -> &ItemStack {
			&self.1
		}
	}

	let index = index();
	let mystery = RecipeRef::new(Mystery(key("mystery"), item("dirt")));
	assert!(!index.index_recipe(mystery.clone()));
	assert_eq!(index.index_recipes([mystery, crafted("a", "stick", &[])]), 1);
	assert!(!index.contains(&key("mystery")));
	assert!(index.reader_by_result(&item("dirt")).is_none());
	assert!(index.contains(&key("a")));
}

/// The inverse lookup and the summary reflect indexed content.
#[test]
fn test_process_of_and_summary() {
	let index = index();
	let shaped = RecipeRef::new(ShapedRecipe::new(
		key("stick"),
		item("stick").with_amount(4),
		&["#", "#"],
		[('#', RecipeChoice::new([item("oak_planks"), item("birch_planks")]))],
	));
	index.index_recipes([
		shaped,
		crafted("torch", "torch", &["coal", "stick"]),
		smelted("glass", "glass", "sand"),
	]);
	assert_eq!(index.process_of(&key("glass")).unwrap().key(), &key("smelting"));

	let summary = index.summary();
	assert_eq!(
		summary,
		IndexSummary {
			recipes: 3,
			processes: 2,
			results: 3,
			ingredients: 5,
			others: 1,
			top_processes: vec![(key("crafting"), 2), (key("smelting"), 1)],
		}
	);
	assert_eq!(summary.to_string(), "3 recipes in 2 processes (3 results, 5 ingredients, 1 others)");
	index.log_summary();
}

/// Clearing empties every container.
#[test]
fn test_clear() {
	let index = index();
	index.index_recipes([crafted("a", "stick", &["oak_planks"]), smelted("b", "glass", "sand")]);
	index.clear();
	assert!(index.is_empty());
	assert_eq!(index.summary().ingredients, 0);
	assert!(index.reader_with_all_recipes().is_none());
}

/// Walking, reading and cloning readers leaves the index untouched.
#[test]
fn test_readers_leave_index_unchanged() {
	let index = index();
	index.index_recipes([
		crafted("k1", "apple", &["stick"]),
		smelted("k2", "apple", "stick"),
		crafted("k3", "bread", &["wheat"]),
	]);
	let before = index.summary();

	let mut by_result = index.reader_by_result(&item("apple")).unwrap();
	let copy = by_result.clone();
	while by_result.has_next() {
		by_result.next().unwrap();
	}
	assert_eq!(by_result.map().recipe_count(), 2);
	assert_eq!(copy.map().all_recipes().len(), 2);

	let mut all = index.reader_with_all_recipes().unwrap();
	let mut seen = Vec::new();
	loop {
		let inner = all.process_reader_mut();
		seen.push(inner.current().key().clone());
		while inner.has_next() {
			seen.push(inner.next().unwrap().key().clone());
		}
		if all.next().is_err() {
			break;
		}
	}
	assert_eq!(seen, vec![key("k1"), key("k3"), key("k2")]);

	assert_eq!(index.summary(), before);
	assert!(index.contains(&key("k1")));
	assert_eq!(
		process_keys(&index.reader_by_result(&item("apple")).unwrap()),
		vec!["minecraft:crafting", "minecraft:smelting"]
	);
	assert_eq!(index.reader_with_all_recipes().unwrap().map().recipe_count(), index.len());
}

/// Readers running alongside a writer only ever observe whole, indexed recipes.
#[test]
fn test_concurrent_readers_during_writes() {
	use std::sync::atomic::{AtomicBool, Ordering};

	const NAMES: [&str; 6] = ["r0", "r1", "r2", "r3", "r4", "r5"];

	let index = index();
	let known: Vec<Key> = NAMES.iter().map(|n| key(n)).collect();
	let done = AtomicBool::new(false);

	let check = |recipe: &RecipeRef| {
		assert!(known.contains(recipe.key()), "unexpected recipe {}", recipe.key());
		assert_eq!(recipe.key().namespace(), "minecraft");
		assert_eq!(recipe.result().kind(), &key("apple"));
	};

	std::thread::scope(|scope| {
		scope.spawn(|| {
			for round in 0..200 {
				for (i, name) in NAMES.iter().enumerate() {
					if (round + i) % 2 == 0 {
						index.index_recipe(crafted(name, "apple", &["stick"]));
					} else {
						index.index_recipe(smelted(name, "apple", "stick"));
					}
				}
				for name in NAMES.iter().skip(round % 3) {
					index.unindex_recipe(&key(name));
				}
			}
			done.store(true, Ordering::Release);
		});

		for _ in 0..3 {
			scope.spawn(|| {
				while !done.load(Ordering::Acquire) {
					if let Some(mut reader) = index.reader_by_result(&item("apple")) {
						check(reader.current_recipe());
						while reader.has_next() {
							if reader.next().is_err() {
								break;
							}
							check(reader.current_recipe());
						}
					}
					if let Some(all) = index.reader_with_all_recipes() {
						for recipe in all.map().all_recipes() {
							check(&recipe);
						}
					}
					let summary = index.summary();
					assert!(summary.recipes <= NAMES.len());
					assert!(summary.processes <= 2);
				}
			});
		}
	});

	assert!(index.len() <= NAMES.len());
	assert_eq!(index.reader_with_all_recipes().map_or(0, |r| r.map().recipe_count()), index.len());
}

#[derive(Debug, Clone)]
enum Op {
	Add { name: u8, result: u8, inputs: Vec<u8>, smelt: bool },
	Remove(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (0u8..8, 0u8..4, prop::collection::vec(0u8..6, 1..3), any::<bool>())
			.prop_map(|(name, result, inputs, smelt)| Op::Add { name, result, inputs, smelt }),
		1 => (0u8..8).prop_map(Op::Remove),
	]
}

fn build(name: u8, result: u8, inputs: &[u8], smelt: bool) -> RecipeRef {
	let name = format!("r{name}");
	let result = format!("out{result}");
	if smelt {
		smelted(&name, &result, &format!("in{}", inputs[0]))
	} else {
		let inputs: Vec<String> = inputs.iter().map(|i| format!("in{i}")).collect();
		let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();
		crafted(&name, &result, &refs)
	}
}

proptest! {
	/// After any sequence of adds and removes, every index agrees with a simple model.
	#[test]
	fn prop_index_consistent(ops in prop::collection::vec(arb_op(), 1..40), batch in any::<bool>()) {
		let index = index();
		let mut model: BTreeMap<Key, RecipeRef> = BTreeMap::new();
		let mut pending = Vec::new();
		for op in ops {
			match op {
				Op::Add { name, result, inputs, smelt } => {
					let recipe = build(name, result, &inputs, smelt);
					model.insert(recipe.key().clone(), recipe.clone());
					if batch {
						pending.push(recipe);
					} else {
						index.index_recipe(recipe);
					}
				}
				Op::Remove(name) => {
					index.index_recipes(pending.drain(..));
					let key = key(&format!("r{name}"));
					model.remove(&key);
					index.unindex_recipe(&key);
				}
			}
		}
		index.index_recipes(pending.drain(..));

		prop_assert_eq!(index.keys(), model.keys().cloned().collect::<Vec<_>>());
		for recipe in model.values() {
			let entry = index.entry(recipe.key()).unwrap();
			for result in &entry.extraction.results {
				let reader = index.reader_by_result(result).unwrap();
				let set = reader.map().set(&entry.process).unwrap();
				prop_assert!(set.contains(recipe.key()));
			}
			for ingredient in &entry.extraction.ingredients {
				let reader = index.reader_by_ingredient(ingredient).unwrap();
				prop_assert!(reader.map().set(&entry.process).unwrap().contains(recipe.key()));
			}
			let reader = index.reader_by_key(recipe.key()).unwrap();
			prop_assert_eq!(reader.current_recipe().key(), recipe.key());
		}

		let all = index.reader_with_all_recipes().map(|r| r.map().recipe_count()).unwrap_or(0);
		prop_assert_eq!(all, model.len());
		let summary = index.summary();
		let results: std::collections::BTreeSet<_> = model.values().map(|r| r.result().as_one()).collect();
		prop_assert_eq!(summary.results, results.len());
	}
}
