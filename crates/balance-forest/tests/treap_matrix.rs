use std::collections::BTreeSet;

use balance_forest::{RandomSource, SearchTree, Treap};

fn in_order(tree: &Treap) -> Vec<u64> {
    let mut keys = Vec::new();
    let mut curr = tree.first_index();
    while let Some(i) = curr {
        keys.push(tree.node(i).key());
        curr = tree.next_index(i);
    }
    keys
}

#[test]
fn treap_explicit_priorities_matrix() {
    let mut tree = Treap::new();
    tree.insert_with_priority(5, 10).unwrap();
    tree.insert_with_priority(3, 20).unwrap();
    tree.insert_with_priority(8, 5).unwrap();

    let root = tree.root_index().unwrap();
    assert_eq!(tree.node(root).key(), 3);
    assert_eq!(tree.node(root).priority(), Some(20));
    assert_eq!(tree.node(root).left(), None);

    let mid = tree.node(root).right().unwrap();
    assert_eq!(tree.node(mid).key(), 5);
    assert_eq!(tree.node(mid).priority(), Some(10));

    let low = tree.node(mid).right().unwrap();
    assert_eq!(tree.node(low).key(), 8);
    assert_eq!(tree.node(low).priority(), Some(5));
    tree.assert_valid().unwrap();
}

#[test]
fn treap_rejects_duplicates_on_both_inserts_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(3));
    assert!(tree.insert(7).is_some());
    assert!(tree.insert(7).is_none());

    let before = tree.print();
    assert!(tree.insert_with_priority(7, u64::MAX).is_none());
    assert_eq!(tree.print(), before);
    assert_eq!(tree.len(), 1);
    tree.assert_valid().unwrap();
}

#[test]
fn treap_erase_missing_leaves_shape_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(11));
    for k in [50, 20, 80, 10, 30, 70, 90] {
        tree.insert(k).unwrap();
    }
    let before = tree.print();
    assert!(!tree.erase(60));
    assert_eq!(tree.print(), before);

    assert!(tree.erase(20));
    assert!(!tree.contains(20));
    assert_eq!(tree.len(), 6);
    tree.assert_valid().unwrap();
}

#[test]
fn treap_insert_erase_returns_empty_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(0));
    tree.insert(123).unwrap();
    assert!(tree.erase(123));
    assert_eq!(tree.root_index(), None);
    assert!(tree.is_empty());
}

#[test]
fn treap_seeded_shapes_reproduce_matrix() {
    let mut a = Treap::with_source(RandomSource::seeded(99));
    let mut b = Treap::with_source(RandomSource::seeded(99));
    for k in 0..200 {
        a.insert(k).unwrap();
        b.insert(k).unwrap();
    }
    assert_eq!(a.print(), b.print());
}

#[test]
fn treap_top_of_key_space_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(5));
    tree.insert(u64::MAX).unwrap();
    tree.insert(u64::MAX - 1).unwrap();
    assert!(tree.insert(u64::MAX).is_none());
    tree.assert_valid().unwrap();

    assert!(tree.erase(u64::MAX));
    assert!(tree.contains(u64::MAX - 1));
    assert!(!tree.contains(u64::MAX));
    tree.assert_valid().unwrap();
}

#[test]
fn treap_randomized_against_oracle_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(21));
    let mut oracle = BTreeSet::new();
    let mut rng = RandomSource::seeded(22);

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

#[test]
fn treap_insert_random_matrix() {
    let mut tree = Treap::with_source(RandomSource::seeded(8));
    let mut rng = RandomSource::seeded(9);
    tree.insert_random(100, &mut rng);
    assert_eq!(tree.len(), 100);
    tree.assert_valid().unwrap();
}
