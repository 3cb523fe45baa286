//! Property tests for add/remove registration.
//!
//! For any sequence of adds and removals:
//!
//! 1. Keys are never reused.
//! 2. A key removes its own listener exactly once.
//! 3. The snapshot lists the remaining listeners in registration order.

use std::collections::HashSet;

use proptest::prelude::*;
use uibind_core::{ListenerKey, ListenerList};

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Add),
        2 => any::<usize>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn list_matches_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let list = ListenerList::new();
        let mut model: Vec<(ListenerKey, u8)> = Vec::new();
        let mut issued: Vec<ListenerKey> = Vec::new();
        let mut seen = HashSet::new();

        for op in ops {
            match op {
                Op::Add(value) => {
                    let key = list.add(value);
                    prop_assert!(seen.insert(key), "key reused: {key:?}");
                    issued.push(key);
                    model.push((key, value));
                }
                Op::Remove(pick) => {
                    if issued.is_empty() {
                        continue;
                    }
                    let key = issued[pick % issued.len()];
                    let expected = model
                        .iter()
                        .position(|(k, _)| *k == key)
                        .map(|i| model.remove(i).1);
                    prop_assert_eq!(list.remove(key), expected);
                    prop_assert_eq!(list.remove(key), None);
                }
            }
            let values: Vec<u8> = model.iter().map(|(_, v)| *v).collect();
            prop_assert_eq!(list.snapshot(), values);
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
        }
    }
}
