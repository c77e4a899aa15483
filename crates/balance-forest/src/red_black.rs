//! Color-balanced tree: insert/erase with red-black fixups.
//!
//! Deletion of a black leaf leaves one side of its parent short a black
//! node; [`DoubleBlack`] names the repair cases and `fix_double_black`
//! loops over them, reclassifying after every pass, until a rotation or a
//! red ancestor absorbs the deficit.

use crate::base::{self, update_to_root};
use crate::node::{Node, NodeStore, Payload};
use crate::validate::{self, InvariantError};
use crate::SearchTree;

#[inline]
fn is_red(arena: &[Node], i: u32) -> bool {
    matches!(arena[i as usize].payload, Payload::Colored { red: true })
}

#[inline]
fn set_red(arena: &mut [Node], i: u32, value: bool) {
    if let Payload::Colored { red } = &mut arena[i as usize].payload {
        *red = value;
    }
}

#[inline]
fn opt_is_red(arena: &[Node], i: Option<u32>) -> bool {
    i.map_or(false, |i| is_red(arena, i))
}

fn insert_fixup(arena: &mut [Node], mut at: u32) {
    loop {
        let Some(parent) = arena[at as usize].p else {
            set_red(arena, at, false);
            return;
        };
        if !is_red(arena, parent) {
            return;
        }
        let grand = arena[parent as usize]
            .p
            .expect("a red node below the root has a grandparent");
        let parent_is_left = arena[grand as usize].l == Some(parent);
        let uncle = if parent_is_left {
            arena[grand as usize].r
        } else {
            arena[grand as usize].l
        };
        if opt_is_red(arena, uncle) {
            let uncle = uncle.expect("a red uncle exists");
            set_red(arena, parent, false);
            set_red(arena, uncle, false);
            set_red(arena, grand, true);
            at = grand;
            continue;
        }
        // Black uncle. A zig-zag turns into a line with one rotation at
        // the parent; the rotated-in node is then the line's parent.
        let at_is_left = arena[parent as usize].l == Some(at);
        let line = if parent_is_left != at_is_left {
            if parent_is_left {
                base::rotate_left(arena, parent)
            } else {
                base::rotate_right(arena, parent)
            }
        } else {
            parent
        };
        set_red(arena, line, false);
        set_red(arena, grand, true);
        if parent_is_left {
            base::rotate_right(arena, grand);
        } else {
            base::rotate_left(arena, grand);
        }
        return;
    }
}

/// Double-black repair cases, named after the colors that drive them.
/// `near`/`far` are the sibling's children on the deficit side and the
/// opposite side respectively.
#[derive(Clone, Copy, Debug)]
enum DoubleBlack {
    SiblingRed,
    FarNephewRed,
    NearNephewRed,
    BlackTripleRedParent,
    BlackTripleBlackParent,
}

fn classify(arena: &[Node], parent: u32, deficit_left: bool) -> (DoubleBlack, u32) {
    let sibling = if deficit_left {
        arena[parent as usize].r
    } else {
        arena[parent as usize].l
    }
    .expect("a black-height deficit implies a sibling");
    let far = if deficit_left {
        arena[sibling as usize].r
    } else {
        arena[sibling as usize].l
    };
    let near = if deficit_left {
        arena[sibling as usize].l
    } else {
        arena[sibling as usize].r
    };
    let case = if is_red(arena, sibling) {
        DoubleBlack::SiblingRed
    } else if opt_is_red(arena, far) {
        DoubleBlack::FarNephewRed
    } else if opt_is_red(arena, near) {
        DoubleBlack::NearNephewRed
    } else if is_red(arena, parent) {
        DoubleBlack::BlackTripleRedParent
    } else {
        DoubleBlack::BlackTripleBlackParent
    };
    (case, sibling)
}

/// Resolves a missing black node on the `deficit_left` side of `parent`.
fn fix_double_black(arena: &mut [Node], mut parent: u32, mut deficit_left: bool) {
    loop {
        let (case, sibling) = classify(arena, parent, deficit_left);
        match case {
            DoubleBlack::SiblingRed => {
                // Bring the sibling up; the deficit side now sits under a
                // red parent with a black sibling.
                if deficit_left {
                    base::rotate_left(arena, parent);
                } else {
                    base::rotate_right(arena, parent);
                }
                set_red(arena, parent, true);
                set_red(arena, sibling, false);
            }
            DoubleBlack::FarNephewRed => {
                let far = if deficit_left {
                    arena[sibling as usize].r
                } else {
                    arena[sibling as usize].l
                }
                .expect("classification saw a red far nephew");
                let parent_was_red = is_red(arena, parent);
                if deficit_left {
                    base::rotate_left(arena, parent);
                } else {
                    base::rotate_right(arena, parent);
                }
                set_red(arena, sibling, parent_was_red);
                set_red(arena, parent, false);
                set_red(arena, far, false);
                return;
            }
            DoubleBlack::NearNephewRed => {
                // Rotate the near nephew into the sibling slot; the next
                // pass sees a red far nephew.
                let near = if deficit_left {
                    arena[sibling as usize].l
                } else {
                    arena[sibling as usize].r
                }
                .expect("classification saw a red near nephew");
                if deficit_left {
                    base::rotate_right(arena, sibling);
                } else {
                    base::rotate_left(arena, sibling);
                }
                set_red(arena, sibling, true);
                set_red(arena, near, false);
            }
            DoubleBlack::BlackTripleRedParent => {
                set_red(arena, parent, false);
                set_red(arena, sibling, true);
                return;
            }
            DoubleBlack::BlackTripleBlackParent => {
                // The whole subtree is one black short; push the deficit up.
                set_red(arena, sibling, true);
                match arena[parent as usize].p {
                    Some(grand) => {
                        deficit_left = arena[grand as usize].l == Some(parent);
                        parent = grand;
                    }
                    None => return,
                }
            }
        }
    }
}

/// Red-black tree: black root, no red-red edge, equal black count on every
/// root-to-null path.
pub struct RbTree {
    store: NodeStore,
}

impl RbTree {
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Verifies links, key order, aggregates and the color rules.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        validate::check_search_tree(&self.store.arena, self.store.root)?;
        validate::check_red_black(&self.store.arena, self.store.root)
    }

    /// Indented text dump.
    pub fn print(&self) -> String {
        crate::print::subtree(&self.store.arena, self.store.root, "")
    }
}

impl Default for RbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree for RbTree {
    fn insert(&mut self, key: u64) -> Option<u32> {
        let Some(root) = self.store.root else {
            let idx = self.store.alloc(Node::colored(key, false));
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
        let idx = self.store.alloc(Node::colored(key, true));
        let arena = &mut self.store.arena;
        arena[idx as usize].p = Some(at);
        if key < arena[at as usize].k {
            arena[at as usize].l = Some(idx);
        } else {
            arena[at as usize].r = Some(idx);
        }
        insert_fixup(arena, idx);
        let root = update_to_root(arena, idx);
        set_red(arena, root, false);
        self.store.root = Some(root);
        Some(idx)
    }

    fn erase(&mut self, key: u64) -> bool {
        let Some(found) = self.store.find(key) else {
            return false;
        };
        let arena = &mut self.store.arena;
        let mut at = found;
        if arena[at as usize].l.is_some() && arena[at as usize].r.is_some() {
            let succ = base::find_nearest_gt(arena, at).expect("a two-child node has a successor");
            base::swap_keys(arena, at, succ);
            at = succ;
        }
        let l = arena[at as usize].l;
        let r = arena[at as usize].r;
        let parent = arena[at as usize].p;

        if parent.is_none() && l.is_none() && r.is_none() {
            self.store.release(at);
            self.store.root = None;
            return true;
        }

        if is_red(arena, at) && l.is_none() && r.is_none() {
            // A red leaf carries no black height; just detach it.
            let parent = parent.expect("a red node is not the root");
            base::detach_child(arena, parent, at);
            self.store.release(at);
            let root = update_to_root(&mut self.store.arena, parent);
            self.store.root = Some(root);
            return true;
        }

        if l.is_some() != r.is_some() {
            // Black with one child: that child is a red leaf. Take over
            // its key and drop the leaf instead of re-linking.
            let child = l.or(r).expect("one child present");
            let child_key = arena[child as usize].k;
            arena[at as usize].k = child_key;
            arena[at as usize].l = None;
            arena[at as usize].r = None;
            self.store.release(child);
            let root = update_to_root(&mut self.store.arena, at);
            self.store.root = Some(root);
            return true;
        }

        // Black leaf below the root.
        let parent = parent.expect("a lone root was handled above");
        let deficit_left = arena[parent as usize].l == Some(at);
        base::detach_child(arena, parent, at);
        self.store.release(at);
        fix_double_black(&mut self.store.arena, parent, deficit_left);
        let root = update_to_root(&mut self.store.arena, parent);
        self.store.root = Some(root);
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
