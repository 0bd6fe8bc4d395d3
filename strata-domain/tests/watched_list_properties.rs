//! 穷举小规模操作序列，检查 add/remove 之后差量集合始终自洽
use std::collections::BTreeSet;

use strata_domain::watched_list::WatchedList;

const UNIVERSE: [u8; 4] = [0, 1, 2, 3];
const BASELINE: [u8; 2] = [0, 1];
const DEPTH: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(u8),
    Remove(u8),
}

fn all_ops() -> Vec<Op> {
    UNIVERSE
        .iter()
        .flat_map(|&v| [Op::Add(v), Op::Remove(v)])
        .collect()
}

fn sequences(depth: usize) -> Vec<Vec<Op>> {
    let ops = all_ops();
    let mut out = vec![Vec::new()];
    for _ in 0..depth {
        out = out
            .into_iter()
            .flat_map(|seq| {
                ops.iter().map(move |op| {
                    let mut next = seq.clone();
                    next.push(*op);
                    next
                })
            })
            .collect();
    }
    out
}

fn set(items: &[u8]) -> BTreeSet<u8> {
    items.iter().copied().collect()
}

fn check(list: &WatchedList<u8>, seq: &[Op]) {
    let initial = set(list.initial_items());
    let current = set(list.items());
    let new = set(list.new_items());
    let removed = set(list.removed_items());

    assert_eq!(current.len(), list.len(), "duplicates in current after {seq:?}");
    assert!(new.is_disjoint(&initial), "new overlaps baseline after {seq:?}");
    assert!(removed.is_subset(&initial), "removed outside baseline after {seq:?}");
    assert!(new.is_disjoint(&removed), "new overlaps removed after {seq:?}");

    let expected: BTreeSet<u8> = initial.union(&new).copied().collect();
    let expected: BTreeSet<u8> = expected.difference(&removed).copied().collect();
    assert_eq!(current, expected, "current drifted after {seq:?}");
    assert_eq!(list.has_changes(), !new.is_empty() || !removed.is_empty());
}

#[test]
fn add_and_remove_keep_diff_consistent() {
    for seq in sequences(DEPTH) {
        let mut list = WatchedList::from_items(BASELINE.to_vec());
        for op in &seq {
            match *op {
                Op::Add(v) => list.add(v),
                // 只移除当前存在的元素
                Op::Remove(v) if list.is_current_item(&v) => list.remove(&v),
                Op::Remove(_) => {}
            }
            check(&list, &seq);
        }
    }
}

#[test]
fn undoing_every_change_restores_baseline() {
    for seq in sequences(3) {
        let mut list = WatchedList::from_items(BASELINE.to_vec());
        for op in &seq {
            match *op {
                Op::Add(v) => list.add(v),
                Op::Remove(v) if list.is_current_item(&v) => list.remove(&v),
                Op::Remove(_) => {}
            }
        }

        for v in list.new_items().to_vec() {
            list.remove(&v);
        }
        for v in list.removed_items().to_vec() {
            list.add(v);
        }

        assert!(!list.has_changes(), "residual diff after {seq:?}: {list:?}");
        assert_eq!(set(list.items()), set(&BASELINE));
    }
}
