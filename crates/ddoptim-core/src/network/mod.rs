//! The supply-chain network: profiles, nodes and the BOM graph between them.
//!
//! # Mutation rules
//!
//! - Profiles must be registered before nodes that reference them.
//! - Nodes must be registered before edges that reference them.
//! - Every failed mutation leaves the network exactly as it was.
//! - An edge that would close a cycle is inserted, checked, then rolled back and
//!   reported as [`NetworkError::CycleDetected`].
//!
//! # Propagation mode
//!
//! In [`PropagationMode::Immediate`] (the default) every structural edit
//! re-runs [`Network::propagate_adu`] before returning. In
//! [`PropagationMode::Deferred`] edits only mark the network stale; call
//! `propagate_adu` before reading `adu` values. The batch loader
//! [`Network::add_bom_relationships`] always defers to a single pass at the
//! end.

mod document;
mod propagate;
mod query;
mod validate;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::graph::BomGraph;
use crate::graph::cycles::detect_cycle_on_add;
use crate::model::node::{NetworkNode, ParseEnumError};
use crate::profile::BufferProfile;

pub use document::{BomEdge, NetworkDocument};
pub use propagate::PropagationSummary;

/// When ADU is recomputed after a structural edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationMode {
    /// Recompute after every edit.
    #[default]
    Immediate,
    /// Mark the network stale; the caller runs the pass.
    Deferred,
}

impl PropagationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Deferred => "deferred",
        }
    }
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropagationMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "deferred" | "batch" => Ok(Self::Deferred),
            _ => Err(ParseEnumError {
                expected: "propagation mode",
                got: s.to_string(),
            }),
        }
    }
}

/// A BOM network with derived demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    profiles: BTreeMap<String, BufferProfile>,
    nodes: BTreeMap<String, NetworkNode>,
    graph: BomGraph,
    mode: PropagationMode,
    stale: bool,
}

impl Network {
    /// An empty network in [`PropagationMode::Immediate`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty network using `mode`.
    #[must_use]
    pub fn with_mode(mode: PropagationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switch modes. Switching to `Immediate` does not propagate by itself.
    pub const fn set_propagation_mode(&mut self, mode: PropagationMode) {
        self.mode = mode;
    }

    #[must_use]
    pub const fn propagation_mode(&self) -> PropagationMode {
        self.mode
    }

    /// `true` when a structural edit has happened since the last pass.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Register a profile.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateProfile`] if the name is taken.
    pub fn add_profile(&mut self, profile: BufferProfile) -> Result<(), NetworkError> {
        if self.profiles.contains_key(profile.name()) {
            return Err(NetworkError::DuplicateProfile(profile.name().to_string()));
        }
        debug!(profile = profile.name(), "profile registered");
        self.profiles.insert(profile.name().to_string(), profile);
        Ok(())
    }

    /// Register a node as an isolated vertex.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateNode`] if the id is taken, or
    /// [`NetworkError::UnknownProfile`] if its profile is not registered.
    pub fn add_node(&mut self, mut node: NetworkNode) -> Result<(), NetworkError> {
        if self.nodes.contains_key(node.node_id()) {
            return Err(NetworkError::DuplicateNode(node.node_id().to_string()));
        }
        if !self.profiles.contains_key(node.buffer_profile_name()) {
            return Err(NetworkError::UnknownProfile {
                node_id: node.node_id().to_string(),
                profile: node.buffer_profile_name().to_string(),
                available: self
                    .profiles
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        match self.mode {
            // A vertex without edges propagates to its own independent demand.
            PropagationMode::Immediate => {
                node.set_adu(propagate::normalize(node.independent_adu().unwrap_or(0.0)));
            }
            PropagationMode::Deferred => self.stale = true,
        }

        let id = node.node_id().to_string();
        self.graph.add_vertex(&id);
        debug!(node = %id, node_type = %node.node_type(), "node registered");
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Declare that one unit of `parent` consumes `quantity` units of
    /// `child`. Re-declaring an existing pair replaces its quantity.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::UnknownNode`] if either id is not registered.
    /// - [`NetworkError::InvalidQuantity`] unless `quantity` is finite and
    ///   strictly positive.
    /// - [`NetworkError::CycleDetected`] if the edge would close a cycle.
    ///   The graph is restored before returning.
    pub fn add_bom_relationship(
        &mut self,
        parent: &str,
        child: &str,
        quantity: f64,
    ) -> Result<(), NetworkError> {
        self.insert_edge(parent, child, quantity)?;
        match self.mode {
            PropagationMode::Immediate => {
                self.propagate_adu()?;
            }
            PropagationMode::Deferred => self.stale = true,
        }
        Ok(())
    }

    /// Insert many edges, then run exactly one propagation pass.
    ///
    /// Stops at the first failing edge. Edges inserted before the failure
    /// are kept and the pass still runs, so `adu` reflects them.
    ///
    /// Returns the number of edges inserted.
    ///
    /// # Errors
    ///
    /// The first insertion error, as for [`Network::add_bom_relationship`].
    pub fn add_bom_relationships<I, P, C>(&mut self, edges: I) -> Result<usize, NetworkError>
    where
        I: IntoIterator<Item = (P, C, f64)>,
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let mut inserted = 0_usize;
        let mut outcome = Ok(());
        for (parent, child, quantity) in edges {
            if let Err(err) = self.insert_edge(parent.as_ref(), child.as_ref(), quantity) {
                outcome = Err(err);
                break;
            }
            inserted += 1;
        }

        let propagated = self.propagate_adu();
        outcome?;
        propagated?;
        debug!(inserted, "batch edge load complete");
        Ok(inserted)
    }

    fn insert_edge(&mut self, parent: &str, child: &str, quantity: f64) -> Result<(), NetworkError> {
        for id in [parent, child] {
            if !self.nodes.contains_key(id) {
                warn!(parent, child, missing = id, "edge rejected: unknown node");
                return Err(NetworkError::UnknownNode(id.to_string()));
            }
        }

        let quantity_ok = quantity.is_finite() && quantity > 0.0;
        if !quantity_ok {
            warn!(parent, child, quantity, "edge rejected: non-positive quantity");
            return Err(NetworkError::InvalidQuantity {
                parent: parent.to_string(),
                child: child.to_string(),
                quantity,
            });
        }

        let previous = self.graph.insert_edge(parent, child, quantity);
        if let Some(cycle) = detect_cycle_on_add(&self.graph, parent, child) {
            self.graph.remove_edge(parent, child);
            if let Some(previous) = previous {
                self.graph.insert_edge(parent, child, previous);
            }
            warn!(parent, child, cycle = %cycle, "edge rejected: cycle");
            return Err(NetworkError::CycleDetected(cycle));
        }

        match previous {
            Some(previous) => {
                debug!(parent, child, previous, quantity, "bom quantity updated");
            }
            None => debug!(parent, child, quantity, "bom edge added"),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&BufferProfile> {
        self.profiles.get(name)
    }

    /// Registered profiles in name order.
    pub fn profiles(&self) -> impl Iterator<Item = &BufferProfile> {
        self.profiles.values()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.get(id)
    }

    /// Mutable view of a node limited to buffer-status transitions.
    pub fn node_mut(&mut self, id: &str) -> Option<NodeMut<'_>> {
        self.nodes.get_mut(id).map(|node| NodeMut { node })
    }

    /// Registered nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NetworkNode> {
        self.nodes.values()
    }

    /// Finished-product nodes in id order.
    pub fn finished_products(&self) -> impl Iterator<Item = &NetworkNode> {
        self.nodes.values().filter(|node| node.is_finished_product())
    }

    /// BOM edges as `(parent, child, quantity)`, ordered by parent then child.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.graph.edges()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Write access to one node's buffer decision.
///
/// Reads go through [`Deref`] to the node. Identity, planning attributes and
/// `adu` stay out of reach.
#[derive(Debug)]
pub struct NodeMut<'a> {
    node: &'a mut NetworkNode,
}

impl NodeMut<'_> {
    pub fn set_user_fixed_buffer(&mut self, rationale: impl Into<String>) {
        self.node.set_user_fixed_buffer(rationale);
    }

    pub fn set_user_forbidden_buffer(&mut self, rationale: impl Into<String>) {
        self.node.set_user_forbidden_buffer(rationale);
    }

    pub fn set_algorithm_recommended_buffer(&mut self, rationale: impl Into<String>) {
        self.node.set_algorithm_recommended_buffer(rationale);
    }

    pub fn clear_buffer(&mut self) {
        self.node.clear_buffer();
    }
}

impl Deref for NodeMut<'_> {
    type Target = NetworkNode;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}
