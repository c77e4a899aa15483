//! Self-adjusting tree: rotations bring touched nodes to the root.
//!
//! No persistent balance invariant; the payoff is amortized. Insertion
//! splays the new node to the root. Deletion splays the found node first,
//! detaches it, and joins the halves by splaying the right half's minimum
//! (the erased key's successor), which ends up as the new root.

use crate::base::{self, update};
use crate::node::{Node, NodeStore};
use crate::validate::{self, InvariantError};
use crate::SearchTree;

/// Rotates `at` to the top of whatever tree it sits in; returns it as the
/// new root index. Zig-zig rotates the grandparent first, zig-zag the
/// parent first.
fn splay(arena: &mut [Node], at: u32) -> u32 {
    while let Some(parent) = arena[at as usize].p {
        let at_is_left = arena[parent as usize].l == Some(at);
        match arena[parent as usize].p {
            None => {
                if at_is_left {
                    base::rotate_right(arena, parent);
                } else {
                    base::rotate_left(arena, parent);
                }
            }
            Some(grand) => {
                let parent_is_left = arena[grand as usize].l == Some(parent);
                match (parent_is_left, at_is_left) {
                    (true, true) => {
                        base::rotate_right(arena, grand);
                        base::rotate_right(arena, parent);
                    }
                    (false, false) => {
                        base::rotate_left(arena, grand);
                        base::rotate_left(arena, parent);
                    }
                    (true, false) => {
                        base::rotate_left(arena, parent);
                        base::rotate_right(arena, grand);
                    }
                    (false, true) => {
                        base::rotate_right(arena, parent);
                        base::rotate_left(arena, grand);
                    }
                }
            }
        }
    }
    at
}

/// Splay tree: BST order only.
pub struct SplayTree {
    store: NodeStore,
}

impl SplayTree {
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Verifies links, key order and aggregates.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        validate::check_search_tree(&self.store.arena, self.store.root)
    }

    /// Indented text dump.
    pub fn print(&self) -> String {
        crate::print::subtree(&self.store.arena, self.store.root, "")
    }
}

impl Default for SplayTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree for SplayTree {
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
        self.store.root = Some(splay(arena, idx));
        Some(idx)
    }

    fn erase(&mut self, key: u64) -> bool {
        let Some(found) = self.store.find(key) else {
            return false;
        };
        let arena = &mut self.store.arena;
        splay(arena, found);
        let left = arena[found as usize].l;
        let right = arena[found as usize].r;
        if let Some(l) = left {
            arena[l as usize].p = None;
        }
        if let Some(r) = right {
            arena[r as usize].p = None;
        }
        self.store.release(found);
        let root = match (left, right) {
            (None, other) | (other, None) => other,
            (Some(l), Some(r)) => {
                let arena = &mut self.store.arena;
                let mut min = r;
                while let Some(next) = arena[min as usize].l {
                    min = next;
                }
                let top = splay(arena, min);
                arena[top as usize].l = Some(l);
                arena[l as usize].p = Some(top);
                update(arena, top);
                Some(top)
            }
        };
        self.store.root = root;
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
