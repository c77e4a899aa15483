//! Randomized-priority tree: split/merge-based insert/erase.
//!
//! Keys obey BST order while priorities obey max-heap order, so the shape
//! of a treap is fully determined by its (key, priority) set. Splitting a
//! treap apart and merging the pieces back therefore reproduces the exact
//! same tree, which is what lets `erase` split first and ask questions
//! later.

use crate::base::update;
use crate::node::{Node, NodeStore, Payload};
use crate::rng::RandomSource;
use crate::validate::{self, InvariantError};
use crate::SearchTree;

#[inline]
fn priority(arena: &[Node], i: u32) -> u64 {
    match arena[i as usize].payload {
        Payload::Prioritized { priority } => priority,
        _ => 0,
    }
}

/// Joins two treaps; every key in `left` must be below every key in
/// `right`. The higher-priority side becomes the root and the other side
/// merges into its inner child. Expected O(log n) depth.
fn merge(arena: &mut [Node], left: Option<u32>, right: Option<u32>) -> Option<u32> {
    let (l, r) = match (left, right) {
        (None, other) => return other,
        (other, None) => return other,
        (Some(l), Some(r)) => (l, r),
    };
    if priority(arena, l) > priority(arena, r) {
        let merged = merge(arena, arena[l as usize].r, Some(r));
        arena[l as usize].r = merged;
        if let Some(m) = merged {
            arena[m as usize].p = Some(l);
        }
        update(arena, l);
        Some(l)
    } else {
        let merged = merge(arena, Some(l), arena[r as usize].l);
        arena[r as usize].l = merged;
        if let Some(m) = merged {
            arena[m as usize].p = Some(r);
        }
        update(arena, r);
        Some(r)
    }
}

/// Partitions into keys `< key` and keys `>= key`, preserving heap order
/// in both halves. Parent links on the two produced roots are cleared.
fn split(arena: &mut [Node], tree: Option<u32>, key: u64) -> (Option<u32>, Option<u32>) {
    let Some(i) = tree else {
        return (None, None);
    };
    let (left, right);
    if arena[i as usize].k < key {
        let (mid, r) = split(arena, arena[i as usize].r, key);
        arena[i as usize].r = mid;
        if let Some(m) = mid {
            arena[m as usize].p = Some(i);
        }
        update(arena, i);
        left = Some(i);
        right = r;
    } else {
        let (l, mid) = split(arena, arena[i as usize].l, key);
        arena[i as usize].l = mid;
        if let Some(m) = mid {
            arena[m as usize].p = Some(i);
        }
        update(arena, i);
        left = l;
        right = Some(i);
    }
    if let Some(l) = left {
        arena[l as usize].p = None;
    }
    if let Some(r) = right {
        arena[r as usize].p = None;
    }
    (left, right)
}

/// Splits into keys `< key`, the node holding exactly `key`, and keys
/// `> key`. At the top of the key space the upper bound saturates instead
/// of wrapping, so the whole `>= key` remainder is the candidate middle.
fn split_three(
    arena: &mut [Node],
    tree: Option<u32>,
    key: u64,
) -> (Option<u32>, Option<u32>, Option<u32>) {
    let (below, rest) = split(arena, tree, key);
    let (middle, above) = match key.checked_add(1) {
        Some(upper) => split(arena, rest, upper),
        None => (rest, None),
    };
    (below, middle, above)
}

/// Treap: BST order on keys, max-heap order on priorities.
pub struct Treap {
    store: NodeStore,
    rng: RandomSource,
}

impl Treap {
    /// Treap drawing priorities from an entropy-seeded source.
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_entropy())
    }

    /// Treap drawing priorities from a caller-provided source; seed it for
    /// reproducible shapes.
    pub fn with_source(rng: RandomSource) -> Self {
        Self {
            store: NodeStore::new(),
            rng,
        }
    }

    /// Inserts `key` with a caller-chosen priority instead of a drawn one.
    /// Returns `None` when the key is already present.
    pub fn insert_with_priority(&mut self, key: u64, priority: u64) -> Option<u32> {
        self.insert_inner(key, Some(priority))
    }

    fn insert_inner(&mut self, key: u64, explicit: Option<u64>) -> Option<u32> {
        let root = self.store.root;
        let (below, middle, above) = split_three(&mut self.store.arena, root, key);
        if middle.is_some() {
            let rest = merge(&mut self.store.arena, middle, above);
            self.store.root = merge(&mut self.store.arena, below, rest);
            return None;
        }
        let priority = match explicit {
            Some(p) => p,
            None => self.rng.next_priority(),
        };
        let idx = self.store.alloc(Node::prioritized(key, priority));
        let lower = merge(&mut self.store.arena, below, Some(idx));
        self.store.root = merge(&mut self.store.arena, lower, above);
        Some(idx)
    }

    /// Verifies links, key order, aggregates and the heap order.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        validate::check_search_tree(&self.store.arena, self.store.root)?;
        validate::check_heap(&self.store.arena, self.store.root)
    }

    /// Indented text dump.
    pub fn print(&self) -> String {
        crate::print::subtree(&self.store.arena, self.store.root, "")
    }
}

impl Default for Treap {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree for Treap {
    fn insert(&mut self, key: u64) -> Option<u32> {
        self.insert_inner(key, None)
    }

    fn erase(&mut self, key: u64) -> bool {
        let root = self.store.root;
        let (below, middle, above) = split_three(&mut self.store.arena, root, key);
        self.store.root = merge(&mut self.store.arena, below, above);
        match middle {
            Some(idx) => {
                self.store.release(idx);
                true
            }
            None => false,
        }
    }

    fn root_index(&self) -> Option<u32> {
        self.store.root
    }

    fn node(&self, idx: u32) -> &Node {
        &self.store.arena[idx as usize]
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn clear(&mut self) {
        self.store.clear();
    }
}
