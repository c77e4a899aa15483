//! Arena-based self-balancing binary search trees.
//!
//! Four variants over one shared node shape:
//!
//! - [`AvlTree`] — height-balanced; balance-factor-driven rotations.
//! - [`RbTree`] — color-balanced; red-black insert and delete fixups.
//! - [`Treap`] — randomized priorities; split/merge-based updates.
//! - [`SplayTree`] — self-adjusting; touched nodes rotate to the root.
//!
//! Keys are `u64`, unique within a tree. Every node also tracks its height
//! and subtree size, so a read-only consumer (a layout or rendering pass,
//! a statistics probe) can walk the tree from [`SearchTree::root_index`]
//! through the per-node accessors without ever touching the balancing
//! machinery.
//!
//! Instead of raw pointers, all links are `Option<u32>` indices into a
//! `Vec`-backed arena owned by the tree. Erased slots are recycled through
//! a free list, and an index handle is only valid until the next
//! `insert`/`erase` on the same tree.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`] | [`Node`], [`Payload`], the arena store |
//! | [`avl`] / [`red_black`] / [`treap`] / [`splay`] | the four engines |
//! | [`rng`] | injectable [`RandomSource`] for priorities and key batches |
//! | [`validate`] | invariant checkers returning [`InvariantError`] |
//!
//! Every tree also exposes `assert_valid()` and an indented text dump via
//! `print()`.

pub mod avl;
mod base;
pub mod node;
mod print;
pub mod red_black;
pub mod rng;
pub mod splay;
pub mod treap;
pub mod validate;

pub use avl::AvlTree;
pub use node::{Node, Payload};
pub use red_black::RbTree;
pub use rng::RandomSource;
pub use splay::SplayTree;
pub use treap::Treap;
pub use validate::InvariantError;

/// Keyed operations shared by every tree variant.
///
/// Mutating operations keep the BST order and the variant's balance
/// invariant; both outcomes of `insert`/`erase` (duplicate key, missing
/// key) are ordinary return values, never panics.
pub trait SearchTree {
    /// Inserts `key`. Returns the new node's index, or `None` when the key
    /// is already present (the tree is left untouched).
    fn insert(&mut self, key: u64) -> Option<u32>;

    /// Removes `key`. Returns `true` when a node was removed.
    fn erase(&mut self, key: u64) -> bool;

    /// Read-only root handle; the entry point for external traversal.
    fn root_index(&self) -> Option<u32>;

    /// Read-only access to a node. Handles are invalidated by any
    /// subsequent `insert`/`erase` on this tree.
    fn node(&self, idx: u32) -> &Node;

    /// Number of live keys.
    fn len(&self) -> usize;

    /// Drops every node and recycles the arena.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the node holding `key`, if present.
    fn find(&self, key: u64) -> Option<u32> {
        let mut curr = self.root_index();
        while let Some(i) = curr {
            let node = self.node(i);
            if node.key() == key {
                return Some(i);
            }
            curr = if key < node.key() {
                node.left()
            } else {
                node.right()
            };
        }
        None
    }

    fn contains(&self, key: u64) -> bool {
        self.find(key).is_some()
    }

    /// Leftmost node: the smallest key.
    fn first_index(&self) -> Option<u32> {
        let mut curr = self.root_index()?;
        while let Some(l) = self.node(curr).left() {
            curr = l;
        }
        Some(curr)
    }

    /// In-order successor of `idx`.
    fn next_index(&self, mut idx: u32) -> Option<u32> {
        if let Some(r) = self.node(idx).right() {
            let mut curr = r;
            while let Some(l) = self.node(curr).left() {
                curr = l;
            }
            return Some(curr);
        }
        let mut parent = self.node(idx).parent();
        while let Some(p) = parent {
            if self.node(p).left() == Some(idx) {
                return Some(p);
            }
            idx = p;
            parent = self.node(p).parent();
        }
        None
    }

    /// Inserts exactly `count` distinct random keys, redrawing whenever a
    /// drawn key collides with an existing one.
    fn insert_random(&mut self, count: usize, rng: &mut RandomSource) {
        let mut remaining = count;
        while remaining > 0 {
            if self.insert(rng.next_key()).is_some() {
                remaining -= 1;
            }
        }
    }
}
