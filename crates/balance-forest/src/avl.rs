//! Height-balanced tree: insert/erase with balance-factor-driven rotations.

use crate::base::{self, update};
use crate::node::{Node, NodeStore};
use crate::validate::{self, InvariantError};
use crate::SearchTree;

/// How a node leans once the walk reaches it.
///
/// The `LeftRight`/`RightLeft` cases are the zig-zag configurations that
/// need a double rotation; a tie in the taller child's own lean resolves
/// to the single-rotation case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BalanceKind {
    Balanced,
    LeftHeavy,
    RightHeavy,
    LeftRight,
    RightLeft,
}

fn classify(arena: &[Node], i: u32) -> BalanceKind {
    let node = &arena[i as usize];
    let lh = i64::from(base::height(arena, node.l));
    let rh = i64::from(base::height(arena, node.r));
    if lh - rh > 1 {
        let l = node.l.expect("left-heavy node has a left child");
        let outer = base::height(arena, arena[l as usize].l);
        let inner = base::height(arena, arena[l as usize].r);
        if inner <= outer {
            BalanceKind::LeftHeavy
        } else {
            BalanceKind::LeftRight
        }
    } else if rh - lh > 1 {
        let r = node.r.expect("right-heavy node has a right child");
        let outer = base::height(arena, arena[r as usize].r);
        let inner = base::height(arena, arena[r as usize].l);
        if inner <= outer {
            BalanceKind::RightHeavy
        } else {
            BalanceKind::RightLeft
        }
    } else {
        BalanceKind::Balanced
    }
}

/// Walks from `from` to the top, refreshing aggregates and rotating
/// wherever the balance broke. After a rotation the walk continues from
/// the rotated-in node. Returns the new root index.
fn balance_up(arena: &mut [Node], from: u32) -> u32 {
    let mut curr = Some(from);
    let mut top = from;
    while let Some(i) = curr {
        update(arena, i);
        let settled = match classify(arena, i) {
            BalanceKind::Balanced => i,
            BalanceKind::LeftHeavy => base::rotate_right(arena, i),
            BalanceKind::RightHeavy => base::rotate_left(arena, i),
            BalanceKind::LeftRight => {
                let l = arena[i as usize]
                    .l
                    .expect("double rotation needs the left child");
                base::rotate_left(arena, l);
                base::rotate_right(arena, i)
            }
            BalanceKind::RightLeft => {
                let r = arena[i as usize]
                    .r
                    .expect("double rotation needs the right child");
                base::rotate_right(arena, r);
                base::rotate_left(arena, i)
            }
        };
        top = settled;
        curr = arena[settled as usize].p;
    }
    top
}

/// Repeatedly swaps the key at `at` with its in-order neighbor on the
/// taller side until the key to remove sits in a leaf. Returns that leaf.
fn sink_to_leaf(arena: &mut [Node], mut at: u32) -> u32 {
    while arena[at as usize].l.is_some() || arena[at as usize].r.is_some() {
        let l = arena[at as usize].l;
        let r = arena[at as usize].r;
        let neighbor = if base::height(arena, l) > base::height(arena, r) {
            base::find_nearest_lt(arena, at)
        } else {
            base::find_nearest_gt(arena, at)
        }
        .expect("the taller side holds an in-order neighbor");
        base::swap_keys(arena, at, neighbor);
        at = neighbor;
    }
    at
}

/// AVL tree: `|height(left) − height(right)| ≤ 1` at every node.
pub struct AvlTree {
    store: NodeStore,
}

impl AvlTree {
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Verifies links, key order, aggregates and the height balance.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        validate::check_search_tree(&self.store.arena, self.store.root)?;
        validate::check_avl(&self.store.arena, self.store.root)
    }

    /// Indented text dump.
    pub fn print(&self) -> String {
        crate::print::subtree(&self.store.arena, self.store.root, "")
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree for AvlTree {
    fn insert(&mut self, key: u64) -> Option<u32> {
        let Some(root) = self.store.root else {
            let idx = self.store.alloc(Node::plain(key));
            self.store.root = Some(idx);
            return Some(idx);
        };
        let mut at = root;
        loop {
            let node = &self.store.arena[at as usize];
            if node.k == key {
                return None;
            }
            match if key < node.k { node.l } else { node.r } {
                Some(next) => at = next,
                None => break,
            }
        }
        let idx = self.store.alloc(Node::plain(key));
        let arena = &mut self.store.arena;
        arena[idx as usize].p = Some(at);
        if key < arena[at as usize].k {
            arena[at as usize].l = Some(idx);
        } else {
            arena[at as usize].r = Some(idx);
        }
        self.store.root = Some(balance_up(arena, at));
        Some(idx)
    }

    fn erase(&mut self, key: u64) -> bool {
        let Some(found) = self.store.find(key) else {
            return false;
        };
        let leaf = sink_to_leaf(&mut self.store.arena, found);
        match self.store.arena[leaf as usize].p {
            None => {
                self.store.release(leaf);
                self.store.root = None;
            }
            Some(parent) => {
                base::detach_child(&mut self.store.arena, parent, leaf);
                self.store.release(leaf);
                let root = balance_up(&mut self.store.arena, parent);
                self.store.root = Some(root);
            }
        }
        true
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
