//! Whole-network validation. Findings are data, never errors.

use super::Network;
use crate::graph::cycles::has_cycles;

impl Network {
    /// Human-readable problems, in check order. Empty means valid.
    ///
    /// Checks: the network has nodes, the graph is acyclic, every profile
    /// reference resolves, and every finished product carries a positive
    /// customer tolerance time. `adu` is not inspected.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.nodes.is_empty() {
            findings.push("Network is empty - no nodes defined".to_string());
            return findings;
        }

        if has_cycles(&self.graph) {
            findings.push(
                "Network contains cycles - must be a directed acyclic graph (DAG)".to_string(),
            );
        }

        for node in self.nodes.values() {
            if !self.profiles.contains_key(node.buffer_profile_name()) {
                findings.push(format!(
                    "Node {}: references undefined profile '{}'",
                    node.node_id(),
                    node.buffer_profile_name()
                ));
            }

            if node.is_finished_product() {
                match node.customer_tolerance_time() {
                    None => findings.push(format!(
                        "Finished product {}: missing customer_tolerance_time",
                        node.node_id()
                    )),
                    Some(0) => findings.push(format!(
                        "Finished product {}: customer_tolerance_time must be > 0",
                        node.node_id()
                    )),
                    Some(_) => {}
                }
            }
        }

        if !findings.is_empty() {
            tracing::debug!(count = findings.len(), "validation findings");
        }
        findings
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
