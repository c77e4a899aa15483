//! Invariant checkers used by tests and debugging callers.
//!
//! Checkers never trust the recorded aggregates: heights, sizes and
//! black-heights are recomputed from the ground up and compared against
//! what the nodes claim.

use thiserror::Error;

use crate::node::{Node, Payload};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root node {0} keeps a parent link")]
    RootHasParent(u32),
    #[error("child {child} does not point back to parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("key order violated at node {0}")]
    OrderViolation(u32),
    #[error("stale height at node {node}: recorded {recorded}, actual {actual}")]
    StaleHeight { node: u32, recorded: u32, actual: u32 },
    #[error("stale subtree size at node {node}: recorded {recorded}, actual {actual}")]
    StaleSize { node: u32, recorded: u32, actual: u32 },
    #[error("height balance violated at node {0}")]
    Imbalance(u32),
    #[error("root node {0} is red")]
    RedRoot(u32),
    #[error("red node {0} has a red child")]
    RedRedViolation(u32),
    #[error("black-height mismatch under node {0}")]
    BlackHeightMismatch(u32),
    #[error("heap order violated at node {0}")]
    HeapViolation(u32),
    #[error("node {0} carries the wrong payload tag")]
    PayloadMismatch(u32),
}

/// Checks what every variant promises: mutual parent/child links, strict
/// BST order, and exact `h`/`n` on every node.
pub fn check_search_tree(arena: &[Node], root: Option<u32>) -> Result<(), InvariantError> {
    let Some(root) = root else {
        return Ok(());
    };
    if arena[root as usize].p.is_some() {
        return Err(InvariantError::RootHasParent(root));
    }
    structure(arena, root, None, None).map(|_| ())
}

/// Recursive walk returning (height, size) of the verified subtree.
fn structure(
    arena: &[Node],
    i: u32,
    lo: Option<u64>,
    hi: Option<u64>,
) -> Result<(u32, u32), InvariantError> {
    let node = &arena[i as usize];
    if lo.map_or(false, |lo| node.k <= lo) || hi.map_or(false, |hi| node.k >= hi) {
        return Err(InvariantError::OrderViolation(i));
    }
    let mut max_height = 0;
    let mut total = 0;
    if let Some(l) = node.l {
        if arena[l as usize].p != Some(i) {
            return Err(InvariantError::BrokenParentLink { parent: i, child: l });
        }
        let (h, n) = structure(arena, l, lo, Some(node.k))?;
        max_height = max_height.max(h);
        total += n;
    }
    if let Some(r) = node.r {
        if arena[r as usize].p != Some(i) {
            return Err(InvariantError::BrokenParentLink { parent: i, child: r });
        }
        let (h, n) = structure(arena, r, Some(node.k), hi)?;
        max_height = max_height.max(h);
        total += n;
    }
    let actual_h = max_height + 1;
    let actual_n = total + 1;
    if node.h != actual_h {
        return Err(InvariantError::StaleHeight {
            node: i,
            recorded: node.h,
            actual: actual_h,
        });
    }
    if node.n != actual_n {
        return Err(InvariantError::StaleSize {
            node: i,
            recorded: node.n,
            actual: actual_n,
        });
    }
    Ok((actual_h, actual_n))
}

/// Height balance: `|height(left) − height(right)| ≤ 1` everywhere.
pub fn check_avl(arena: &[Node], root: Option<u32>) -> Result<(), InvariantError> {
    fn height_of(arena: &[Node], i: Option<u32>) -> Result<u32, InvariantError> {
        let Some(i) = i else {
            return Ok(0);
        };
        let lh = height_of(arena, arena[i as usize].l)?;
        let rh = height_of(arena, arena[i as usize].r)?;
        if lh.abs_diff(rh) > 1 {
            return Err(InvariantError::Imbalance(i));
        }
        Ok(1 + lh.max(rh))
    }
    height_of(arena, root).map(|_| ())
}

/// Color rules: black root, no red-red edge, equal black count on every
/// path to an absent child.
pub fn check_red_black(arena: &[Node], root: Option<u32>) -> Result<(), InvariantError> {
    fn red_of(arena: &[Node], i: u32) -> Result<bool, InvariantError> {
        match arena[i as usize].payload {
            Payload::Colored { red } => Ok(red),
            _ => Err(InvariantError::PayloadMismatch(i)),
        }
    }

    fn black_height(arena: &[Node], i: Option<u32>) -> Result<u32, InvariantError> {
        let Some(i) = i else {
            return Ok(0);
        };
        let node = &arena[i as usize];
        let red = red_of(arena, i)?;
        if red {
            for child in [node.l, node.r].into_iter().flatten() {
                if red_of(arena, child)? {
                    return Err(InvariantError::RedRedViolation(i));
                }
            }
        }
        let lh = black_height(arena, node.l)?;
        let rh = black_height(arena, node.r)?;
        if lh != rh {
            return Err(InvariantError::BlackHeightMismatch(i));
        }
        Ok(lh + u32::from(!red))
    }

    let Some(root) = root else {
        return Ok(());
    };
    match arena[root as usize].payload {
        Payload::Colored { red: true } => return Err(InvariantError::RedRoot(root)),
        Payload::Colored { red: false } => {}
        _ => return Err(InvariantError::PayloadMismatch(root)),
    }
    black_height(arena, Some(root)).map(|_| ())
}

/// Max-heap order on priorities.
pub fn check_heap(arena: &[Node], root: Option<u32>) -> Result<(), InvariantError> {
    fn priority_of(arena: &[Node], i: u32) -> Result<u64, InvariantError> {
        match arena[i as usize].payload {
            Payload::Prioritized { priority } => Ok(priority),
            _ => Err(InvariantError::PayloadMismatch(i)),
        }
    }

    fn heap(arena: &[Node], i: Option<u32>) -> Result<(), InvariantError> {
        let Some(i) = i else {
            return Ok(());
        };
        let node = &arena[i as usize];
        let prior = priority_of(arena, i)?;
        for child in [node.l, node.r].into_iter().flatten() {
            if priority_of(arena, child)? > prior {
                return Err(InvariantError::HeapViolation(i));
            }
        }
        heap(arena, node.l)?;
        heap(arena, node.r)
    }

    heap(arena, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::update;

    fn linked_pair(parent: Node, child: Node, child_left: bool) -> Vec<Node> {
        let mut arena = vec![parent, child];
        if child_left {
            arena[0].l = Some(1);
        } else {
            arena[0].r = Some(1);
        }
        arena[1].p = Some(0);
        update(&mut arena, 0);
        arena
    }

    #[test]
    fn rejects_stale_size() {
        let mut arena = linked_pair(Node::plain(2), Node::plain(1), true);
        arena[0].n = 7;
        assert_eq!(
            check_search_tree(&arena, Some(0)),
            Err(InvariantError::StaleSize {
                node: 0,
                recorded: 7,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_order_violation() {
        let arena = linked_pair(Node::plain(2), Node::plain(9), true);
        assert_eq!(
            check_search_tree(&arena, Some(0)),
            Err(InvariantError::OrderViolation(1))
        );
    }

    #[test]
    fn rejects_broken_parent_link() {
        let mut arena = linked_pair(Node::plain(2), Node::plain(1), true);
        arena[1].p = None;
        assert_eq!(
            check_search_tree(&arena, Some(0)),
            Err(InvariantError::BrokenParentLink {
                parent: 0,
                child: 1
            })
        );
    }

    #[test]
    fn rejects_red_red_edge() {
        let arena = linked_pair(Node::colored(2, false), Node::colored(1, true), true);
        assert!(check_red_black(&arena, Some(0)).is_ok());

        let mut arena = vec![
            Node::colored(3, false),
            Node::colored(2, true),
            Node::colored(1, true),
        ];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);
        assert_eq!(
            check_red_black(&arena, Some(0)),
            Err(InvariantError::RedRedViolation(1))
        );
    }

    #[test]
    fn rejects_red_root_and_black_height_mismatch() {
        let arena = vec![Node::colored(1, true)];
        assert_eq!(
            check_red_black(&arena, Some(0)),
            Err(InvariantError::RedRoot(0))
        );

        let arena = linked_pair(Node::colored(2, false), Node::colored(1, false), true);
        assert_eq!(
            check_red_black(&arena, Some(0)),
            Err(InvariantError::BlackHeightMismatch(0))
        );
    }

    #[test]
    fn rejects_heap_violation() {
        let arena = linked_pair(
            Node::prioritized(2, 10),
            Node::prioritized(1, 50),
            true,
        );
        assert_eq!(
            check_heap(&arena, Some(0)),
            Err(InvariantError::HeapViolation(0))
        );
    }

    #[test]
    fn rejects_foreign_payload() {
        let arena = vec![Node::plain(1)];
        assert_eq!(
            check_red_black(&arena, Some(0)),
            Err(InvariantError::PayloadMismatch(0))
        );
        assert_eq!(
            check_heap(&arena, Some(0)),
            Err(InvariantError::PayloadMismatch(0))
        );
    }

    #[test]
    fn rejects_imbalance() {
        let mut arena = vec![Node::plain(3), Node::plain(2), Node::plain(1)];
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);
        update(&mut arena, 2);
        update(&mut arena, 1);
        update(&mut arena, 0);
        assert!(check_search_tree(&arena, Some(0)).is_ok());
        assert_eq!(check_avl(&arena, Some(0)), Err(InvariantError::Imbalance(0)));
    }
}
