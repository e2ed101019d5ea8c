//! Property tests: the tree behaves like `BTreeSet` and keeps its
//! red-black invariants for arbitrary operation sequences.

use std::collections::BTreeSet;

use ordtree::OrderedTree;
use proptest::prelude::*;

const MAX_SIZE: usize = 500;
const CASES: u32 = 256;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Remove(i32),
    PopFirst,
    PopLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..1_000i32).prop_map(Op::Insert),
        3 => (0..1_000i32).prop_map(Op::Remove),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(CASES))]

    #[test]
    fn in_order_is_strictly_ascending(
        inserts in proptest::collection::vec(any::<i32>(), 0..MAX_SIZE)
    ) {
        let tree: OrderedTree<i32> = inserts.iter().copied().collect();

        let items: Vec<i32> = tree.iter().copied().collect();
        prop_assert!(items.windows(2).all(|pair| pair[0] < pair[1]));

        let expected: BTreeSet<i32> = inserts.into_iter().collect();
        prop_assert_eq!(items, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn balanced_after_inserts(
        inserts in proptest::collection::vec(0..10_000i32, 0..MAX_SIZE)
    ) {
        let mut tree = OrderedTree::new();
        for value in &inserts {
            tree.insert(*value);
            prop_assert!(tree.validate().is_ok());
        }

        let bound = (2.0 * ((tree.len() + 1) as f64).log2()).floor() as usize;
        prop_assert!(tree.height() <= bound);
        if let Some(root) = tree.root_node() {
            prop_assert!(root.is_black());
        }
    }

    #[test]
    fn matches_btreeset_model(
        ops in proptest::collection::vec(op_strategy(), 0..MAX_SIZE)
    ) {
        let mut tree = OrderedTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    prop_assert_eq!(tree.insert(value), model.insert(value));
                }
                Op::Remove(value) => {
                    prop_assert_eq!(tree.remove(&value), model.remove(&value));
                }
                Op::PopFirst => {
                    prop_assert_eq!(tree.pop_first(), model.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.pop_last());
                }
            }
            if let Err(err) = tree.validate() {
                return Err(TestCaseError::fail(err.to_string()));
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert!(tree.iter().eq(model.iter()));
    }

    #[test]
    fn insert_find_remove_round_trip(
        inserts in proptest::collection::hash_set(0..10_000i32, 1..MAX_SIZE),
        probe in 0..10_000i32
    ) {
        let mut tree: OrderedTree<i32> = inserts.iter().copied().collect();

        for value in &inserts {
            prop_assert_eq!(tree.find(value).map(|node| *node.value()), Some(*value));
        }
        prop_assert_eq!(tree.contains(&probe), inserts.contains(&probe));

        for value in &inserts {
            prop_assert!(tree.remove(value));
            prop_assert!(tree.find(value).is_none());
        }
        prop_assert!(tree.is_empty());
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn successor_and_predecessor_agree_with_sorted_order(
        inserts in proptest::collection::hash_set(0..10_000i32, 2..MAX_SIZE)
    ) {
        let tree: OrderedTree<i32> = inserts.iter().copied().collect();
        let mut items: Vec<i32> = inserts.into_iter().collect();
        items.sort_unstable();

        for pair in items.windows(2) {
            let node = tree.find(&pair[0]).unwrap();
            prop_assert_eq!(node.next().map(|n| *n.value()), Some(pair[1]));
            let node = tree.find(&pair[1]).unwrap();
            prop_assert_eq!(node.prev().map(|n| *n.value()), Some(pair[0]));
        }
        let reversed: Vec<i32> = tree.iter().rev().copied().collect();
        items.reverse();
        prop_assert_eq!(reversed, items);
    }
}
