//! Rotation operators and neighbor-search helpers shared by all variants.
//!
//! Everything here operates on the generic node shape only: an arena slice
//! plus indices. Rotations are index reassignment; they reparent the pivot
//! into the rotated node's former parent slot, move the inner subtree
//! across, and refresh `h`/`n` for exactly the two reshaped nodes (plus the
//! parent whose child field changed, whose own subtree is unaffected).

use crate::node::Node;

#[inline]
pub(crate) fn height(arena: &[Node], i: Option<u32>) -> u32 {
    i.map_or(0, |i| arena[i as usize].h)
}

#[inline]
pub(crate) fn count(arena: &[Node], i: Option<u32>) -> u32 {
    i.map_or(0, |i| arena[i as usize].n)
}

/// Recomputes `h`/`n` of `i` from its children.
pub(crate) fn update(arena: &mut [Node], i: u32) {
    let l = arena[i as usize].l;
    let r = arena[i as usize].r;
    let h = 1 + height(arena, l).max(height(arena, r));
    let n = 1 + count(arena, l) + count(arena, r);
    let node = &mut arena[i as usize];
    node.h = h;
    node.n = n;
}

/// Refreshes `h`/`n` from `i` up to the top; returns the root index.
pub(crate) fn update_to_root(arena: &mut [Node], mut i: u32) -> u32 {
    loop {
        update(arena, i);
        match arena[i as usize].p {
            Some(p) => i = p,
            None => return i,
        }
    }
}

/// Promotes the right child of `i` over `i`. Returns the pivot index,
/// which now occupies `i`'s former position. O(1), never allocates.
pub(crate) fn rotate_left(arena: &mut [Node], i: u32) -> u32 {
    let pivot = arena[i as usize].r.expect("left rotation needs a right child");
    let parent = arena[i as usize].p;
    let inner = arena[pivot as usize].l;

    arena[i as usize].r = inner;
    if let Some(inner) = inner {
        arena[inner as usize].p = Some(i);
    }
    arena[pivot as usize].l = Some(i);
    arena[i as usize].p = Some(pivot);
    arena[pivot as usize].p = parent;
    if let Some(p) = parent {
        if arena[p as usize].l == Some(i) {
            arena[p as usize].l = Some(pivot);
        } else {
            arena[p as usize].r = Some(pivot);
        }
    }

    update(arena, i);
    update(arena, pivot);
    if let Some(p) = parent {
        update(arena, p);
    }
    debug_assert!(links_consistent(arena, pivot));
    pivot
}

/// Promotes the left child of `i` over `i`. Mirror of [`rotate_left`].
pub(crate) fn rotate_right(arena: &mut [Node], i: u32) -> u32 {
    let pivot = arena[i as usize].l.expect("right rotation needs a left child");
    let parent = arena[i as usize].p;
    let inner = arena[pivot as usize].r;

    arena[i as usize].l = inner;
    if let Some(inner) = inner {
        arena[inner as usize].p = Some(i);
    }
    arena[pivot as usize].r = Some(i);
    arena[i as usize].p = Some(pivot);
    arena[pivot as usize].p = parent;
    if let Some(p) = parent {
        if arena[p as usize].l == Some(i) {
            arena[p as usize].l = Some(pivot);
        } else {
            arena[p as usize].r = Some(pivot);
        }
    }

    update(arena, i);
    update(arena, pivot);
    if let Some(p) = parent {
        update(arena, p);
    }
    debug_assert!(links_consistent(arena, pivot));
    pivot
}

/// In-order predecessor inside `i`'s subtree: the rightmost node of the
/// left subtree, or `None` when that subtree is empty.
pub(crate) fn find_nearest_lt(arena: &[Node], i: u32) -> Option<u32> {
    let mut curr = arena[i as usize].l?;
    while let Some(r) = arena[curr as usize].r {
        curr = r;
    }
    Some(curr)
}

/// In-order successor inside `i`'s subtree: the leftmost node of the right
/// subtree, or `None` when that subtree is empty.
pub(crate) fn find_nearest_gt(arena: &[Node], i: u32) -> Option<u32> {
    let mut curr = arena[i as usize].r?;
    while let Some(l) = arena[curr as usize].l {
        curr = l;
    }
    Some(curr)
}

/// Key exchange used by deletion-by-swap. Only the keys move; links,
/// aggregates and payloads stay with their slots.
pub(crate) fn swap_keys(arena: &mut [Node], a: u32, b: u32) {
    let ka = arena[a as usize].k;
    arena[a as usize].k = arena[b as usize].k;
    arena[b as usize].k = ka;
}

/// Clears whichever child slot of `parent` points at `child`.
pub(crate) fn detach_child(arena: &mut [Node], parent: u32, child: u32) {
    if arena[parent as usize].l == Some(child) {
        arena[parent as usize].l = None;
    } else {
        arena[parent as usize].r = None;
    }
}

/// Parent/child index pairs around `i` are mutually consistent.
pub(crate) fn links_consistent(arena: &[Node], i: u32) -> bool {
    let node = &arena[i as usize];
    if let Some(l) = node.l {
        if arena[l as usize].p != Some(i) {
            return false;
        }
    }
    if let Some(r) = node.r {
        if arena[r as usize].p != Some(i) {
            return false;
        }
    }
    match node.p {
        None => true,
        Some(p) => arena[p as usize].l == Some(i) || arena[p as usize].r == Some(i),
    }
}
