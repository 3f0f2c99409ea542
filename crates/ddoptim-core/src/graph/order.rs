//! Ordering and reachability over a [`BomGraph`].
//!
//! Topological order uses Kahn's algorithm with an ordered ready set, so
//! parents always precede children and ties break by ascending id. Two runs
//! over the same graph produce the same sequence.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet};

use super::bom::BomGraph;

/// Parents-before-children order of every vertex.
///
/// # Errors
///
/// Returns the ids that could not be ordered (every vertex on or downstream
/// of a cycle) when the graph is not a DAG.
pub fn topological_order(graph: &BomGraph) -> Result<Vec<String>, Vec<String>> {
    let mut in_degree: BTreeMap<&str, usize> = graph
        .vertices()
        .map(|id| (id, graph.predecessors(id).count()))
        .collect();

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(id, _)| *id)
        .collect();

    let mut order = Vec::with_capacity(in_degree.len());

    while let Some(id) = ready.pop_first() {
        order.push(id.to_string());
        for child in graph.successors(id) {
            if let Some(deg) = in_degree.get_mut(child) {
                *deg = deg.saturating_sub(1);
                if *deg == 0 {
                    ready.insert(child);
                }
            }
        }
    }

    if order.len() == in_degree.len() {
        Ok(order)
    } else {
        let placed: BTreeSet<&str> = order.iter().map(String::as_str).collect();
        Err(in_degree
            .keys()
            .filter(|id| !placed.contains(*id))
            .map(|id| (*id).to_string())
            .collect())
    }
}

/// Every vertex reachable from `start` following child edges, excluding
/// `start` itself.
pub fn descendants(graph: &BomGraph, start: &str) -> BTreeSet<String> {
    reach(start, |id| graph.successors(id).collect())
}

/// Every vertex that reaches `start` following child edges, excluding
/// `start` itself.
pub fn ancestors(graph: &BomGraph, start: &str) -> BTreeSet<String> {
    reach(start, |id| graph.predecessors(id).collect())
}

fn reach<'g, F>(start: &str, next: F) -> BTreeSet<String>
where
    F: Fn(&str) -> Vec<&'g str>,
{
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut stack: Vec<String> = next(start).into_iter().map(str::to_string).collect();

    while let Some(id) = stack.pop() {
        if id == start || !seen.insert(id.clone()) {
            continue;
        }
        stack.extend(
            next(&id)
                .into_iter()
                .filter(|n| !seen.contains(*n))
                .map(str::to_string),
        );
    }

    seen
}

/// Every simple path that starts at a vertex accepted by `is_root` and ends
/// at `target`, following child edges.
///
/// Paths read `[root, …, target]`. Roots are not barriers: when one root
/// sits below another, paths from both are listed. If `target` is itself a
/// root the trivial path `[target]` is included. A vertex never repeats
/// within a path, so the walk terminates even on cyclic input.
pub fn paths_from_roots<F>(graph: &BomGraph, target: &str, is_root: F) -> Vec<Vec<String>>
where
    F: Fn(&str) -> bool,
{
    let mut paths = Vec::new();
    if is_root(target) {
        paths.push(vec![target.to_string()]);
    }

    // `current` is the path being extended upward; `pending[i]` holds the
    // parents of `current[i]` not yet tried.
    let mut current: Vec<&str> = vec![target];
    let mut pending = vec![graph.predecessors(target)];

    while let Some(parents) = pending.last_mut() {
        let Some(parent) = parents.find(|parent| !current.contains(parent)) else {
            pending.pop();
            current.pop();
            continue;
        };
        current.push(parent);
        if is_root(parent) {
            paths.push(current.iter().rev().map(|id| (*id).to_string()).collect());
        }
        pending.push(graph.predecessors(parent));
    }

    paths
}
