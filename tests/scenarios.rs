//! Scenario tests for the ordered tree.
//!
//! Each test drives the public API only and checks both the visible
//! contents and the red-black invariants via `validate()`.

use ordtree::{Direction, OrderedTree};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn build(values: &[i32]) -> OrderedTree<i32> {
    let mut tree = OrderedTree::new();
    for &value in values {
        tree.insert(value);
        tree.validate().expect("invariants after insert");
    }
    tree
}

fn contents(tree: &OrderedTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

/// Largest height a red-black tree with `len` elements may have
fn height_bound(len: usize) -> usize {
    (2.0 * ((len + 1) as f64).log2()).floor() as usize
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn scenario_a_mixed_inserts() {
    let tree = build(&[10, 20, 15, 5, 25]);

    assert_eq!(contents(&tree), vec![5, 10, 15, 20, 25]);
    assert!(tree.root_node().unwrap().is_black());
    assert_eq!(tree.len(), 5);
}

#[test]
fn scenario_b_remove_from_a() {
    let mut tree = build(&[10, 20, 15, 5, 25]);

    assert!(tree.remove(&10));

    assert_eq!(contents(&tree), vec![5, 15, 20, 25]);
    assert_eq!(tree.len(), 4);
    tree.validate().unwrap();
}

#[test]
fn scenario_c_ascending_inserts_rebalance() {
    let tree = build(&[1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(tree.height(), 4);
    assert!(tree.height() <= height_bound(tree.len()));
    assert!(tree.height() < 7);
}

#[test]
fn scenario_d_remove_absent() {
    let mut empty: OrderedTree<i32> = OrderedTree::new();
    assert!(!empty.remove(&1));
    assert_eq!(empty.len(), 0);
    assert!(empty.find(&1).is_none());
    empty.validate().unwrap();

    let mut tree = build(&[1, 2, 3]);
    assert!(!tree.remove(&4));
    assert_eq!(tree.len(), 3);
    assert_eq!(contents(&tree), vec![1, 2, 3]);
}

// ============================================================================
// PROPERTIES ON FIXED INPUTS
// ============================================================================

#[test]
fn round_trip_insert_find_remove() {
    let mut tree = build(&[8, 3, 11]);

    assert!(tree.insert(6));
    assert_eq!(tree.find(&6).map(|node| *node.value()), Some(6));

    assert!(tree.remove(&6));
    assert!(tree.find(&6).is_none());
    tree.validate().unwrap();
}

#[test]
fn duplicate_insert_is_idempotent() {
    let mut tree = OrderedTree::new();

    assert!(tree.insert(42));
    assert_eq!(tree.len(), 1);
    assert!(!tree.insert(42));
    assert_eq!(tree.len(), 1);
    tree.validate().unwrap();
}

#[test]
fn descending_inserts_rebalance() {
    let values: Vec<i32> = (0..1_000).rev().collect();
    let tree = build(&values);

    assert_eq!(contents(&tree), (0..1_000).collect::<Vec<_>>());
    assert!(tree.height() <= height_bound(tree.len()));
}

#[test]
fn remove_every_element_in_insert_order() {
    let values: Vec<i32> = (0..200).map(|i| (i * 37) % 200).collect();
    let mut tree = build(&values);

    for (removed, value) in values.iter().enumerate() {
        assert!(tree.remove(value));
        tree.validate().unwrap();
        assert_eq!(tree.len(), values.len() - removed - 1);
    }
    assert!(tree.is_empty());
    assert!(tree.root_node().is_none());
}

#[test]
fn clear_then_reuse() {
    let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.iter().next(), None);
    tree.validate().unwrap();

    tree.insert(9);
    assert_eq!(contents(&tree), vec![9]);
}

#[test]
fn bidirectional_iteration() {
    let tree = build(&[10, 20, 15, 5, 25]);

    let backward: Vec<i32> = tree.iter().rev().copied().collect();
    assert_eq!(backward, vec![25, 20, 15, 10, 5]);

    let mut node = tree.find(&15).unwrap();
    node = node.next().unwrap();
    assert_eq!(*node.value(), 20);
    node = node.prev().unwrap().prev().unwrap();
    assert_eq!(*node.value(), 10);
}

#[test]
fn navigation_after_rebalance() {
    // 10, 20, 15 forces a double rotation: 15 becomes the root
    let tree = build(&[10, 20, 15]);
    let root = tree.root_node().unwrap();
    assert_eq!(*root.value(), 15);

    let ten = tree.find(&10).unwrap();
    assert_eq!(ten.parent(), Some(root));
    assert_eq!(ten.direction(), Some(Direction::Left));
    assert_eq!(ten.sibling().map(|n| *n.value()), Some(20));
    assert!(ten.uncle().is_none());
    assert!(ten.is_red());
}

#[test]
fn first_last_pop() {
    let mut tree = build(&[50, 30, 70, 20, 40, 60, 80]);

    assert_eq!(tree.first(), Some(&20));
    assert_eq!(tree.last(), Some(&80));
    assert_eq!(tree.pop_first(), Some(20));
    assert_eq!(tree.pop_last(), Some(80));
    assert_eq!(tree.first(), Some(&30));
    assert_eq!(tree.last(), Some(&70));
    tree.validate().unwrap();
}

#[test]
fn owned_values_and_borrowed_lookup() {
    let mut tree: OrderedTree<String> = ["delta", "alpha", "charlie", "bravo"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert!(tree.contains("charlie"));
    assert_eq!(tree.take("alpha"), Some("alpha".to_string()));
    assert_eq!(
        tree.into_iter().collect::<Vec<_>>(),
        vec!["bravo", "charlie", "delta"]
    );
}
