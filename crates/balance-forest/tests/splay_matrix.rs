use std::collections::BTreeSet;

use balance_forest::{RandomSource, SearchTree, SplayTree};

fn in_order(tree: &SplayTree) -> Vec<u64> {
    let mut keys = Vec::new();
    let mut curr = tree.first_index();
    while let Some(i) = curr {
        keys.push(tree.node(i).key());
        curr = tree.next_index(i);
    }
    keys
}

#[test]
fn splay_insert_erase_scenario_matrix() {
    let mut tree = SplayTree::new();
    tree.insert(1).unwrap();
    tree.insert(2).unwrap();
    tree.insert(3).unwrap();
    assert!(tree.erase(2));

    let root = tree.root_index().unwrap();
    assert_eq!(tree.node(root).key(), 3);
    let l = tree.node(root).left().unwrap();
    assert_eq!(tree.node(l).key(), 1);
    assert_eq!(tree.node(root).right(), None);
    tree.assert_valid().unwrap();
}

#[test]
fn splay_insert_moves_node_to_root_matrix() {
    let mut tree = SplayTree::new();
    for k in [8, 3, 10, 1, 6, 14, 4] {
        let idx = tree.insert(k).unwrap();
        assert_eq!(tree.root_index(), Some(idx));
        assert_eq!(tree.node(idx).key(), k);
        tree.assert_valid().unwrap();
    }
}

#[test]
fn splay_duplicate_and_missing_matrix() {
    let mut tree = SplayTree::new();
    tree.insert(5).unwrap();
    tree.insert(9).unwrap();

    let before = tree.print();
    assert!(tree.insert(5).is_none());
    assert_eq!(tree.print(), before);
    assert!(!tree.erase(6));
    assert_eq!(tree.print(), before);
}

#[test]
fn splay_insert_erase_returns_empty_matrix() {
    let mut tree = SplayTree::new();
    tree.insert(77).unwrap();
    assert!(tree.erase(77));
    assert_eq!(tree.root_index(), None);
    assert!(tree.is_empty());
}

#[test]
fn splay_erase_brings_successor_up_matrix() {
    let mut tree = SplayTree::new();
    for k in [50, 25, 75, 10, 30, 60, 90] {
        tree.insert(k).unwrap();
    }
    assert!(tree.erase(50));
    // joining splays the erased key's successor to the top
    let root = tree.root_index().unwrap();
    assert_eq!(tree.node(root).key(), 60);
    tree.assert_valid().unwrap();
}

#[test]
fn splay_ladder_insert_delete_matrix() {
    let mut tree = SplayTree::new();
    for i in 0..300 {
        tree.insert(i).unwrap();
        tree.assert_valid().unwrap();
    }
    for i in (0..300).step_by(3) {
        assert!(tree.erase(i));
        tree.assert_valid().unwrap();
    }
    for i in 0..300 {
        assert_eq!(tree.contains(i), i % 3 != 0);
    }
    assert_eq!(tree.len(), 200);
}

#[test]
fn splay_randomized_against_oracle_matrix() {
    let mut tree = SplayTree::new();
    let mut oracle = BTreeSet::new();
    let mut rng = RandomSource::seeded(404);

    for step in 0..2000 {
        let key = rng.next_key() % 512;
        if step % 3 == 0 {
            assert_eq!(tree.erase(key), oracle.remove(&key));
        } else {
            assert_eq!(tree.insert(key).is_some(), oracle.insert(key));
        }
        tree.assert_valid().unwrap();
    }

    let keys = in_order(&tree);
    let expected: Vec<u64> = oracle.iter().copied().collect();
    assert_eq!(keys, expected);
}
