//! Plain serialized form of a [`Network`]: profiles, nodes, edges.
//!
//! ```json
//! {
//!   "profiles": { "F": { "name": "F", "dlt_threshold_short": 1, ... } },
//!   "nodes": [ { "node_id": "BIKE", "node_type": "finished_product", ... } ],
//!   "edges": [ { "parent_id": "BIKE", "child_id": "WHEEL", "quantity": 2.0 } ]
//! }
//! ```
//!
//! Nodes and edges are emitted sorted by id, so the same network always
//! produces the same bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Network, PropagationMode};
use crate::error::NetworkError;
use crate::model::node::NetworkNode;
use crate::profile::BufferProfile;

/// One BOM relationship: one `parent_id` consumes `quantity` of `child_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEdge {
    pub parent_id: String,
    pub child_id: String,
    pub quantity: f64,
}

/// Serialized network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub profiles: BTreeMap<String, BufferProfile>,
    #[serde(default)]
    pub nodes: Vec<NetworkNode>,
    #[serde(default)]
    pub edges: Vec<BomEdge>,
}

impl Network {
    /// Snapshot the network as a [`NetworkDocument`].
    #[must_use]
    pub fn to_document(&self) -> NetworkDocument {
        NetworkDocument {
            profiles: self.profiles.clone(),
            nodes: self.nodes.values().cloned().collect(),
            edges: self
                .graph
                .edges()
                .map(|(parent, child, quantity)| BomEdge {
                    parent_id: parent.to_string(),
                    child_id: child.to_string(),
                    quantity,
                })
                .collect(),
        }
    }

    /// Rebuild a network: profiles, then nodes, then edges in one batch,
    /// then one propagation pass.
    ///
    /// Profile map keys are informational; each profile registers under its
    /// own `name`. The result is in [`PropagationMode::Immediate`].
    ///
    /// # Errors
    ///
    /// The first duplicate, unknown reference, bad quantity or cycle.
    #[instrument(skip(document), fields(
        profiles = document.profiles.len(),
        nodes = document.nodes.len(),
        edges = document.edges.len()
    ))]
    pub fn from_document(document: NetworkDocument) -> Result<Self, NetworkError> {
        let mut network = Self::with_mode(PropagationMode::Deferred);
        for profile in document.profiles.into_values() {
            network.add_profile(profile)?;
        }
        for node in document.nodes {
            network.add_node(node)?;
        }
        network.add_bom_relationships(
            document
                .edges
                .into_iter()
                .map(|edge| (edge.parent_id, edge.child_id, edge.quantity)),
        )?;
        network.set_propagation_mode(PropagationMode::Immediate);
        Ok(network)
    }

    /// Parse a JSON document and rebuild the network.
    ///
    /// # Errors
    ///
    /// [`NetworkError::MalformedDocument`] for bad JSON or a record that
    /// fails its own validation, otherwise as [`Network::from_document`].
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Canonical pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails, which the document types do not
    /// trigger.
    pub fn to_json_pretty(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}

impl TryFrom<NetworkDocument> for Network {
    type Error = NetworkError;

    fn try_from(document: NetworkDocument) -> Result<Self, Self::Error> {
        Self::from_document(document)
    }
}

impl From<&Network> for NetworkDocument {
    fn from(network: &Network) -> Self {
        network.to_document()
    }
}
