//! Cycle detection for the BOM graph.
//!
//! # Overview
//!
//! A bill of materials must be a DAG: an item cannot, directly or through
//! intermediate assemblies, consume itself. This module answers two
//! questions:
//!
//! - Does the edge `parent → child` close a cycle? ([`detect_cycle_on_add`])
//! - Does the graph contain any cycle at all? ([`has_cycles`])
//!
//! # Design
//!
//! - **Reachability**: adding `parent → child` closes a cycle exactly when
//!   `parent` is already reachable from `child`. The search only walks the
//!   descendants of `child`, breadth first, so the reported cycle is a
//!   shortest one.
//! - **Reject, don't warn**: [`crate::network::Network`] rolls the edge back
//!   and surfaces the [`CycleWarning`] inside
//!   [`crate::error::NetworkError::CycleDetected`].
//! - **No recursion**: both checks keep their frontier on the heap, so BOM
//!   depth is bounded by memory rather than the thread stack.

#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn
)]

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use super::bom::BomGraph;
use super::order::topological_order;

// ---------------------------------------------------------------------------
// CycleWarning
// ---------------------------------------------------------------------------

/// Description of a cycle closed by a BOM edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWarning {
    /// The ordered list of node ids forming the cycle.
    ///
    /// Starts at the parent of the offending edge, follows BOM edges, and
    /// ends at the parent again. Adding `C → A` on top of `A → B → C` gives
    /// `["C", "A", "B", "C"]`.
    pub cycle_path: Vec<String>,

    /// Parent of the offending edge.
    pub edge_from: String,

    /// Child of the offending edge.
    pub edge_to: String,
}

impl CycleWarning {
    /// Number of distinct nodes in the cycle.
    pub fn cycle_len(&self) -> usize {
        self.cycle_path.len().saturating_sub(1)
    }

    /// `true` when an item is declared as its own component.
    pub fn is_self_loop(&self) -> bool {
        self.edge_from == self.edge_to
    }

    /// `true` for a 2-node cycle (A uses B and B uses A).
    pub fn is_mutual(&self) -> bool {
        self.cycle_len() == 2
    }
}

impl fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_self_loop() {
            write!(
                f,
                "cycle detected: self-loop on '{}' (item consumes itself)",
                self.edge_from
            )
        } else if self.is_mutual() {
            write!(
                f,
                "cycle detected: '{}' and '{}' consume each other",
                self.edge_from, self.edge_to
            )
        } else {
            write!(
                f,
                "cycle detected ({} items): {}",
                self.cycle_len(),
                self.cycle_path.join(" → ")
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Check whether the edge `parent → child` closes a cycle in `graph`.
///
/// Works both before and after the edge is inserted: the search starts at
/// `child` and stops as soon as it reaches `parent`, so the new edge itself
/// is never traversed.
pub fn detect_cycle_on_add(graph: &BomGraph, parent: &str, child: &str) -> Option<CycleWarning> {
    let cycle_path = if parent == child {
        vec![parent.to_string(), parent.to_string()]
    } else {
        let mut path = vec![parent.to_string()];
        path.extend(shortest_path(graph, child, parent)?);
        path
    };

    Some(CycleWarning {
        cycle_path,
        edge_from: parent.to_string(),
        edge_to: child.to_string(),
    })
}

/// `true` if the graph has at least one cycle.
///
/// A graph is acyclic exactly when Kahn's algorithm can place every vertex.
pub fn has_cycles(graph: &BomGraph) -> bool {
    topological_order(graph).is_err()
}

/// Breadth-first search from `from` along child edges. Returns
/// `[from, …, to]` when `to` is reachable.
fn shortest_path(graph: &BomGraph, from: &str, to: &str) -> Option<Vec<String>> {
    // Each discovered vertex maps to the vertex it was first reached from.
    let mut reached_via: BTreeMap<&str, &str> = BTreeMap::new();
    let mut frontier: VecDeque<&str> = VecDeque::from([from]);

    while let Some(id) = frontier.pop_front() {
        for next in graph.successors(id) {
            if next == from || reached_via.contains_key(next) {
                continue;
            }
            reached_via.insert(next, id);
            if next == to {
                return Some(trace_back(&reached_via, from, to));
            }
            frontier.push_back(next);
        }
    }

    None
}

fn trace_back<'a>(
    reached_via: &BTreeMap<&'a str, &'a str>,
    from: &str,
    to: &'a str,
) -> Vec<String> {
    let mut path = vec![to.to_string()];
    let mut cursor = to;
    while cursor != from {
        let Some(&prev) = reached_via.get(cursor) else {
            break;
        };
        cursor = prev;
        path.push(cursor.to_string());
    }
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
