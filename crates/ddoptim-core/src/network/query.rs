//! Read-only graph queries.

use std::collections::{BTreeMap, BTreeSet};

use super::Network;
use crate::error::NetworkError;
use crate::graph::order;

impl Network {
    fn require(&self, id: &str) -> Result<(), NetworkError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(NetworkError::UnknownNode(id.to_string()))
        }
    }

    /// Consumers of `id` and the quantity each uses per unit.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if `id` is not registered.
    pub fn parents(&self, id: &str) -> Result<&BTreeMap<String, f64>, NetworkError> {
        self.graph
            .parents(id)
            .ok_or_else(|| NetworkError::UnknownNode(id.to_string()))
    }

    /// Components of `id` and the quantity used per unit of `id`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if `id` is not registered.
    pub fn children(&self, id: &str) -> Result<&BTreeMap<String, f64>, NetworkError> {
        self.graph
            .children(id)
            .ok_or_else(|| NetworkError::UnknownNode(id.to_string()))
    }

    /// Quantity of `child` per unit of `parent`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownEdge`] if there is no such relationship.
    pub fn bom_quantity(&self, parent: &str, child: &str) -> Result<f64, NetworkError> {
        self.graph
            .quantity(parent, child)
            .ok_or_else(|| NetworkError::UnknownEdge {
                parent: parent.to_string(),
                child: child.to_string(),
            })
    }

    /// Parents-before-children order; the order propagation uses.
    ///
    /// # Errors
    ///
    /// [`NetworkError::CyclicGraph`] if the graph has a cycle.
    pub fn topological_order(&self) -> Result<Vec<String>, NetworkError> {
        order::topological_order(&self.graph)
            .map_err(|remaining| NetworkError::CyclicGraph { remaining })
    }

    /// Children-before-parents order, for bottom-up calculations.
    ///
    /// # Errors
    ///
    /// [`NetworkError::CyclicGraph`] if the graph has a cycle.
    pub fn reverse_topological_order(&self) -> Result<Vec<String>, NetworkError> {
        let mut order = self.topological_order()?;
        order.reverse();
        Ok(order)
    }

    /// Every node that consumes `id`, directly or through assemblies.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if `id` is not registered.
    pub fn upstream_nodes(&self, id: &str) -> Result<BTreeSet<String>, NetworkError> {
        self.require(id)?;
        Ok(order::ancestors(&self.graph, id))
    }

    /// Every component `id` consumes, directly or through assemblies.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if `id` is not registered.
    pub fn downstream_nodes(&self, id: &str) -> Result<BTreeSet<String>, NetworkError> {
        self.require(id)?;
        Ok(order::descendants(&self.graph, id))
    }

    /// Every simple path from a finished product down to `id`, each listed
    /// finished product first.
    ///
    /// A finished product's own list includes the trivial path `[id]`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNode`] if `id` is not registered.
    pub fn paths_to_finished_products(&self, id: &str) -> Result<Vec<Vec<String>>, NetworkError> {
        self.require(id)?;
        Ok(order::paths_from_roots(&self.graph, id, |candidate| {
            self.nodes
                .get(candidate)
                .is_some_and(|node| node.is_finished_product())
        }))
    }
}
