//! Plain-text tree dump.
//!
//! The library-side stand-in for graphical rendering: one node per line
//! with its aggregates and payload, `∅` for an absent child.

use crate::node::{Node, Payload};

pub(crate) fn subtree(arena: &[Node], node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let label = match n.payload {
                Payload::Plain => String::new(),
                Payload::Colored { red: true } => " red".to_string(),
                Payload::Colored { red: false } => " black".to_string(),
                Payload::Prioritized { priority } => format!(" prior={priority}"),
            };
            let left = subtree(arena, n.l, &format!("{tab}  "));
            let right = subtree(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [h={} n={}{label}] {{ {} }}\n{tab}L={left}\n{tab}R={right}",
                n.h, n.n, n.k
            )
        }
    }
}
