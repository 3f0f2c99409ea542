//! Quantity-weighted BOM adjacency keyed by node id.
//!
//! # Data Model
//!
//! An edge `parent → child` with quantity `q` means "one unit of `parent`
//! consumes `q` units of `child`". Both directions are stored so that
//! parent and child lookups are O(log n):
//!
//! - `children: parent → {child → q}`
//! - `parents:  child  → {parent → q}`
//!
//! Every vertex has an entry in both maps, possibly empty. Maps are ordered,
//! so every traversal built on top of this type is deterministic.
//!
//! At most one edge exists per ordered pair; inserting the same pair again
//! replaces the quantity.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::BTreeMap;

/// Adjacency for the BOM graph. Holds ids and quantities only; node payloads
/// live in [`crate::network::Network`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BomGraph {
    children: BTreeMap<String, BTreeMap<String, f64>>,
    parents: BTreeMap<String, BTreeMap<String, f64>>,
}

impl BomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated vertex. Returns `false` if it already existed.
    pub fn add_vertex(&mut self, id: &str) -> bool {
        if self.children.contains_key(id) {
            return false;
        }
        self.children.insert(id.to_string(), BTreeMap::new());
        self.parents.insert(id.to_string(), BTreeMap::new());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.children.contains_key(id)
    }

    /// Insert or overwrite `parent → child`, returning the previous quantity.
    ///
    /// Both endpoints must already be vertices; unknown endpoints are added
    /// implicitly so the two maps never disagree.
    pub fn insert_edge(&mut self, parent: &str, child: &str, quantity: f64) -> Option<f64> {
        self.add_vertex(parent);
        self.add_vertex(child);
        self.parents
            .entry(child.to_string())
            .or_default()
            .insert(parent.to_string(), quantity);
        self.children
            .entry(parent.to_string())
            .or_default()
            .insert(child.to_string(), quantity)
    }

    /// Remove `parent → child`, returning its quantity if it existed.
    pub fn remove_edge(&mut self, parent: &str, child: &str) -> Option<f64> {
        if let Some(parents) = self.parents.get_mut(child) {
            parents.remove(parent);
        }
        self.children
            .get_mut(parent)
            .and_then(|children| children.remove(child))
    }

    /// Quantity of `child` consumed per unit of `parent`, if the edge exists.
    pub fn quantity(&self, parent: &str, child: &str) -> Option<f64> {
        self.children
            .get(parent)
            .and_then(|children| children.get(child))
            .copied()
    }

    /// Direct children (components) of `id` with their quantities.
    pub fn children(&self, id: &str) -> Option<&BTreeMap<String, f64>> {
        self.children.get(id)
    }

    /// Direct parents (consumers) of `id` with their quantities.
    pub fn parents(&self, id: &str) -> Option<&BTreeMap<String, f64>> {
        self.parents.get(id)
    }

    /// Child ids of `id`; empty for unknown ids.
    pub fn successors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.children
            .get(id)
            .into_iter()
            .flat_map(|children| children.keys().map(String::as_str))
    }

    /// Parent ids of `id`; empty for unknown ids.
    pub fn predecessors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.parents
            .get(id)
            .into_iter()
            .flat_map(|parents| parents.keys().map(String::as_str))
    }

    /// All vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// All edges as `(parent, child, quantity)`, ordered by parent then child.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.children.iter().flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |(child, quantity)| (parent.as_str(), child.as_str(), *quantity))
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.children.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
