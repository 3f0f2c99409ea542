//! Top-down ADU propagation.

use tracing::{debug, instrument};

use super::Network;
use crate::error::NetworkError;
use crate::graph::order::topological_order;
use crate::model::node::NetworkNode;

/// Counters from one propagation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    pub nodes_visited: usize,
    /// Nodes left with `Some(adu)` after the pass.
    pub nodes_with_demand: usize,
}

/// Exact zero means "no demand flows here".
#[allow(clippy::float_cmp)]
pub(super) fn normalize(total: f64) -> Option<f64> {
    if total == 0.0 { None } else { Some(total) }
}

impl Network {
    /// Recompute every node's `adu` from independent demand and BOM edges.
    ///
    /// Nodes are visited parents-first. Each node starts from its
    /// `independent_adu` (or zero) and adds `parent_adu * quantity` for every
    /// parent whose `adu` is strictly positive. A total of exactly zero is
    /// stored as `None`.
    ///
    /// The pass is idempotent and clears [`Network::is_stale`].
    ///
    /// # Errors
    ///
    /// [`NetworkError::CyclicGraph`] if the graph has a cycle. No node is
    /// touched in that case.
    #[instrument(skip(self), fields(nodes = self.nodes.len(), edges = self.graph.edge_count()))]
    pub fn propagate_adu(&mut self) -> Result<PropagationSummary, NetworkError> {
        let order = topological_order(&self.graph)
            .map_err(|remaining| NetworkError::CyclicGraph { remaining })?;

        let mut summary = PropagationSummary::default();
        for id in &order {
            let mut total = self
                .nodes
                .get(id)
                .and_then(NetworkNode::independent_adu)
                .unwrap_or(0.0);

            for (parent, quantity) in self.graph.parents(id).into_iter().flatten() {
                let parent_adu = self
                    .nodes
                    .get(parent)
                    .and_then(NetworkNode::adu)
                    .filter(|adu| *adu > 0.0);
                if let Some(parent_adu) = parent_adu {
                    total += parent_adu * quantity;
                }
            }

            let adu = normalize(total);
            if let Some(node) = self.nodes.get_mut(id) {
                node.set_adu(adu);
                summary.nodes_visited += 1;
                if adu.is_some() {
                    summary.nodes_with_demand += 1;
                }
            }
        }

        self.stale = false;
        debug!(
            visited = summary.nodes_visited,
            with_demand = summary.nodes_with_demand,
            "adu propagation complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::NodeType;
    use crate::network::PropagationMode;
    use crate::profile::default_profiles;

    fn net() -> Network {
        let mut net = Network::with_mode(PropagationMode::Deferred);
        for profile in default_profiles().into_values() {
            net.add_profile(profile).expect("profile");
        }
        net
    }

    fn fp(id: &str, adu: f64) -> NetworkNode {
        NetworkNode::builder(id, id, NodeType::FinishedProduct, 5, "F")
            .customer_tolerance_time(5)
            .independent_adu(adu)
            .build()
            .expect("fp")
    }

    fn part(id: &str) -> NetworkNode {
        NetworkNode::builder(id, id, NodeType::Intermediate, 3, "I")
            .build()
            .expect("part")
    }

    fn adu(net: &Network, id: &str) -> Option<f64> {
        net.node(id).and_then(NetworkNode::adu)
    }

    #[test]
    fn linear_chain() {
        let mut net = net();
        net.add_node(fp("A", 40.0)).expect("A");
        net.add_node(part("B")).expect("B");
        net.add_bom_relationship("A", "B", 2.0).expect("edge");
        let summary = net.propagate_adu().expect("propagate");
        assert_eq!(adu(&net, "A"), Some(40.0));
        assert_eq!(adu(&net, "B"), Some(80.0));
        assert_eq!(
            summary,
            PropagationSummary {
                nodes_visited: 2,
                nodes_with_demand: 2
            }
        );
    }

    #[test]
    fn fan_in_sums_parents() {
        let mut net = net();
        net.add_node(fp("A", 40.0)).expect("A");
        net.add_node(fp("C", 10.0)).expect("C");
        net.add_node(part("D")).expect("D");
        net.add_bom_relationship("A", "D", 2.0).expect("A-D");
        net.add_bom_relationship("C", "D", 3.0).expect("C-D");
        net.propagate_adu().expect("propagate");
        assert_eq!(adu(&net, "D"), Some(110.0));
    }

    #[test]
    fn zero_demand_is_absent() {
        let mut net = net();
        net.add_node(part("E")).expect("E");
        net.add_node(part("F")).expect("F");
        net.add_bom_relationship("E", "F", 4.0).expect("edge");
        let summary = net.propagate_adu().expect("propagate");
        assert_eq!(adu(&net, "E"), None);
        assert_eq!(adu(&net, "F"), None);
        assert_eq!(summary.nodes_with_demand, 0);
    }

    #[test]
    fn independent_and_dependent_demand_add_up() {
        let mut net = net();
        net.add_node(fp("A", 10.0)).expect("A");
        let spare = NetworkNode::builder("S", "spare", NodeType::Intermediate, 2, "I")
            .independent_adu(3.0)
            .build()
            .expect("S");
        net.add_node(spare).expect("S");
        net.add_bom_relationship("A", "S", 2.0).expect("edge");
        net.propagate_adu().expect("propagate");
        assert_eq!(adu(&net, "S"), Some(23.0));
    }

    #[test]
    fn multi_level_demand_compounds() {
        let mut net = net();
        net.add_node(fp("A", 5.0)).expect("A");
        for id in ["B", "C", "D"] {
            net.add_node(part(id)).expect("part");
        }
        net.add_bom_relationships([("A", "B", 2.0), ("B", "C", 3.0), ("A", "C", 1.0), ("C", "D", 0.5)])
            .expect("edges");
        assert_eq!(adu(&net, "B"), Some(10.0));
        assert_eq!(adu(&net, "C"), Some(35.0));
        assert_eq!(adu(&net, "D"), Some(17.5));
    }

    #[test]
    fn propagation_is_idempotent() {
        let mut net = net();
        net.add_node(fp("A", 7.0)).expect("A");
        net.add_node(part("B")).expect("B");
        net.add_bom_relationship("A", "B", 1.5).expect("edge");
        net.propagate_adu().expect("first");
        let first = net.clone();
        net.propagate_adu().expect("second");
        assert_eq!(net, first);
    }

    #[test]
    fn stale_adu_is_overwritten() {
        let mut net = net();
        let seeded = NetworkNode::builder("A", "A", NodeType::FinishedProduct, 1, "F")
            .customer_tolerance_time(1)
            .adu(12.0)
            .build()
            .expect("A");
        net.add_node(seeded).expect("A");
        net.propagate_adu().expect("propagate");
        assert_eq!(adu(&net, "A"), Some(12.0));
    }

    #[test]
    fn normalize_collapses_zero_only() {
        assert_eq!(normalize(0.0), None);
        assert_eq!(normalize(-0.0), None);
        assert_eq!(normalize(0.25), Some(0.25));
    }
}
