use std::num::NonZeroUsize;

use proptest::prelude::*;

use super::*;

fn history(capacity: usize) -> NavigationHistory<u32> {
	NavigationHistory::new(NonZeroUsize::new(capacity).unwrap())
}

/// Navigating pushes the place left behind.
#[test]
fn test_push_and_step() {
	let mut history = history(10);
	assert!(history.push_for_navigation(1, &2));
	assert!(history.push_for_navigation(2, &3));

	assert_eq!(history.go_backward(3), Some(2));
	assert_eq!(history.go_backward(2), Some(1));
	assert_eq!(history.go_backward(1), None);
	assert_eq!(history.forward_len(), 2);

	assert_eq!(history.go_forward(1), Some(2));
	assert_eq!(history.go_forward(2), Some(3));
	assert_eq!(history.go_forward(3), None);
	assert_eq!(history.peek_backward(), Some(&2));
}

/// The newest entry is never pushed twice, and moves to the same place are not recorded.
#[test]
fn test_push_suppresses_duplicates() {
	let mut history = history(10);
	assert!(history.push_for_navigation(1, &2));
	assert!(!history.push_for_navigation(1, &3));
	assert!(!history.push_for_navigation(4, &4));
	assert_eq!(history.backward_len(), 1);
}

/// Going back keeps the forward stack until a new navigation happens.
#[test]
fn test_new_navigation_clears_forward() {
	let mut history = history(10);
	history.push_for_navigation(1, &2);
	history.push_for_navigation(2, &3);
	history.go_backward(3);
	assert!(history.can_go_forward());

	assert!(history.push_for_navigation(2, &5));
	assert!(!history.can_go_forward());
	assert_eq!(history.peek_forward(), None);
}

/// A suppressed push leaves the forward stack alone.
#[test]
fn test_suppressed_push_keeps_forward() {
	let mut history = history(10);
	history.push_for_navigation(1, &2);
	history.push_for_navigation(2, &3);
	history.go_backward(3);
	assert!(!history.push_for_navigation(1, &2));
	assert_eq!(history.forward_len(), 1);
}

/// The oldest backward entry is evicted at capacity.
#[test]
fn test_capacity_evicts_oldest() {
	let mut history = history(3);
	for i in 0..5 {
		history.push_for_navigation(i, &(i + 1));
	}
	assert_eq!(history.backward_len(), 3);
	assert_eq!(history.go_backward(5), Some(4));
	assert_eq!(history.go_backward(4), Some(3));
	assert_eq!(history.go_backward(3), Some(2));
	assert!(!history.can_go_backward());
}

/// Stepping forward also respects the capacity.
#[test]
fn test_forward_respects_capacity() {
	let mut history = history(1);
	history.push_for_navigation(1, &2);
	assert_eq!(history.go_backward(2), Some(1));
	assert_eq!(history.go_forward(1), Some(2));
	assert_eq!(history.backward_len(), 1);
	assert_eq!(history.peek_backward(), Some(&1));
}

#[test]
fn test_clear() {
	let mut history = history(4);
	history.push_for_navigation(1, &2);
	history.push_for_navigation(2, &3);
	history.go_backward(3);
	history.clear();
	assert!(!history.can_go_backward());
	assert!(!history.can_go_forward());
	assert_eq!(NavigationHistory::<u32>::default().capacity(), DEFAULT_MAX_ENTRIES);
}

#[derive(Debug, Clone)]
enum Step {
	Navigate(u8),
	Back,
	Forward,
}

fn step() -> impl Strategy<Value = Step> {
	prop_oneof![
		3 => (0u8..6).prop_map(Step::Navigate),
		1 => Just(Step::Back),
		1 => Just(Step::Forward),
	]
}

proptest! {
	/// Any sequence of moves keeps the backward stack within capacity.
	#[test]
	fn prop_history_bounded(capacity in 1usize..6, steps in prop::collection::vec(step(), 0..64)) {
		let mut history: NavigationHistory<u8> = NavigationHistory::new(NonZeroUsize::new(capacity).unwrap());
		let mut current = 0u8;
		for step in steps {
			match step {
				Step::Navigate(target) => {
					history.push_for_navigation(current, &target);
					current = target;
				}
				Step::Back => {
					if let Some(previous) = history.go_backward(current) {
						current = previous;
					}
				}
				Step::Forward => {
					if let Some(next) = history.go_forward(current) {
						current = next;
					}
				}
			}
			prop_assert!(history.backward_len() <= capacity);
		}
	}
}
