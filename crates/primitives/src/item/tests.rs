use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::*;

fn stack(value: &str) -> ItemStack {
	ItemStack::new(Key::minecraft(value).unwrap())
}

/// Quantity and decoration never take part in identity.
#[test]
fn test_identity_ignores_amount_and_lore() {
	let plain = stack("apple");
	let decorated = stack("apple")
		.with_amount(16)
		.with_display_name("Shiny apple")
		.with_lore_line("from the orchard");
	assert_eq!(plain, decorated);

	let mut set = HashSet::new();
	set.insert(plain.clone());
	assert!(!set.insert(decorated.as_one()));
	assert_eq!(set.len(), 1);
}

/// Variants split identity even for the same kind.
#[test]
fn test_variant_is_part_of_identity() {
	let plain = stack("potion");
	let healing = stack("potion").with_variant("healing");
	assert_ne!(plain, healing);
	assert!(plain < healing);
}

/// Stacks read from config keep their variant and default to a single item.
#[test]
fn test_deserialize_with_variant() {
	let item: ItemStack = toml::from_str("kind = \"minecraft:potion\"\nvariant = \"healing\"\n").unwrap();
	assert_eq!(item, stack("potion").with_variant("healing"));
	assert_eq!(item.variant(), Some("healing"));
	assert_eq!(item.amount(), 1);

	let written = toml::to_string(&item.with_amount(3)).unwrap();
	let read: ItemStack = toml::from_str(&written).unwrap();
	assert_eq!(read.variant(), Some("healing"));
	assert_eq!(read.amount(), 3);
}

/// Normalization keeps kind and variant and drops everything else.
#[test]
fn test_as_one_normalizes() {
	let item = stack("arrow").with_variant("poison").with_amount(64).with_lore_line("x");
	let one = item.as_one();
	assert_eq!(one.amount(), 1);
	assert!(one.lore().is_empty());
	assert_eq!(one.variant(), Some("poison"));
}

/// Display names fall back to the kind's minimal string.
#[test]
fn test_display_name_fallback() {
	assert_eq!(stack("stick").display_name(), "stick");
	assert_eq!(stack("stick").with_display_name("Twig").display_name(), "Twig");
}

/// Choices accept any of their options and normalize them for indexing.
#[test]
fn test_choice_accepts_and_normalizes() {
	let choice = RecipeChoice::new([stack("oak_planks").with_amount(4), stack("birch_planks")]);
	assert!(choice.accepts(&stack("oak_planks")));
	assert!(!choice.accepts(&stack("stone")));
	let normalized: Vec<u32> = choice.normalized().map(|item| item.amount()).collect();
	assert_eq!(normalized, vec![1, 1]);
}
