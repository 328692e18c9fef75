use pretty_assertions::assert_eq;

use super::*;
use crate::test_fixtures::{builtin_process, crafted, item, key, smelted};

fn process_keys(map: &MultiProcessRecipeMap) -> Vec<String> {
	map.processes().iter().map(|p| p.key().to_string()).collect()
}

/// Processes iterate in process order, primary first.
#[test]
fn test_processes_in_order() {
	let map = MultiProcessRecipeMap::new(Grouping::ByResult(item("apple")));
	let smelting = builtin_process("smelting");
	let crafting = builtin_process("crafting");
	assert!(map.add_recipe(&smelting, smelted("k2", "apple", "stick")));
	assert!(map.add_recipe(&crafting, crafted("k1", "apple", &["stick"])));
	assert_eq!(process_keys(&map), vec!["minecraft:crafting", "minecraft:smelting"]);
	assert_eq!(map.higher_process(&crafting), Some(smelting.clone()));
	assert_eq!(map.lower_process(&smelting), Some(crafting.clone()));
	assert!(map.higher_process(&smelting).is_none());
}

/// Recipes the process cannot handle never create a set.
#[test]
fn test_add_rejects_without_creating_set() {
	let map = MultiProcessRecipeMap::new(Grouping::AllRecipes);
	assert!(!map.add_recipe(&builtin_process("crafting"), smelted("glass", "glass", "sand")));
	assert_eq!(map.process_count(), 0);
	assert_eq!(map.add_recipes(&builtin_process("crafting"), vec![smelted("glass", "glass", "sand")]), 0);
	assert_eq!(map.process_count(), 0);
}

/// Removing the last recipe of a process drops its set.
#[test]
fn test_remove_prunes_empty_set() {
	let map = MultiProcessRecipeMap::new(Grouping::AllRecipes);
	let crafting = builtin_process("crafting");
	map.add_recipe(&crafting, crafted("a", "stick", &[]));
	map.add_recipe(&crafting, crafted("b", "stick", &[]));

	assert!(map.remove_recipe(&crafting, &key("a")).is_some());
	assert!(map.contains_process(&crafting));
	assert!(map.remove_recipe(&crafting, &key("b")).is_some());
	assert!(!map.contains_process(&crafting));
	assert!(map.is_empty());
	assert!(map.remove_recipe(&crafting, &key("b")).is_none());
}

/// Putting a set for an existing process merges the recipes.
#[test]
fn test_put_set_merges() {
	let crafting = builtin_process("crafting");
	let map = MultiProcessRecipeMap::new(Grouping::ByProcess(crafting.clone()));
	map.add_recipe(&crafting, crafted("a", "stick", &[]));

	let other = Arc::new(ProcessRecipeSet::new(crafting.clone()));
	other.add(crafted("b", "stick", &[]));
	map.put_set(other.clone());
	assert_eq!(map.recipe_count(), 2);
	// the merged set stays independent of the one passed in
	other.add(crafted("c", "stick", &[]));
	assert_eq!(map.recipe_count(), 2);

	let fresh = MultiProcessRecipeMap::new(Grouping::ByProcess(crafting.clone()));
	fresh.put_set(other.clone());
	other.add(crafted("d", "stick", &[]));
	assert_eq!(fresh.recipe_count(), 3);
}

/// Equality compares grouping and contents, not identity.
#[test]
fn test_equality_by_content() {
	let crafting = builtin_process("crafting");
	let build = |grouping: Grouping| {
		let map = MultiProcessRecipeMap::new(grouping);
		map.add_recipe(&crafting, crafted("a", "apple", &[]));
		map
	};
	let a = build(Grouping::ByResult(item("apple")));
	let b = build(Grouping::ByResult(item("apple")));
	let c = build(Grouping::ByIngredient(item("apple")));
	assert_eq!(a, b);
	assert_ne!(a, c);

	let copy = a.detached();
	assert_eq!(copy, a);
	a.add_recipe(&crafting, crafted("b", "apple", &[]));
	assert_ne!(copy, a);
	assert_eq!(copy.recipe_count(), 1);
}

/// All recipes come out grouped by process, then by key.
#[test]
fn test_all_recipes_order() {
	let map = MultiProcessRecipeMap::new(Grouping::AllRecipes);
	map.add_recipe(&builtin_process("smelting"), smelted("a", "glass", "sand"));
	map.add_recipe(&builtin_process("crafting"), crafted("z", "stick", &[]));
	map.add_recipe(&builtin_process("crafting"), crafted("m", "stick", &[]));
	let keys: Vec<String> = map.all_recipes().iter().map(|r| r.key().value().to_string()).collect();
	assert_eq!(keys, vec!["m", "z", "a"]);
}
