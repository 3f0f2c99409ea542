use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, str::FromStr};

/// The five item categories of a supply-chain network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    FinishedProduct,
    Intermediate,
    Machined,
    PurchasedLocal,
    PurchasedInternational,
}

impl NodeType {
    pub const ALL: [Self; 5] = [
        Self::FinishedProduct,
        Self::Intermediate,
        Self::Machined,
        Self::PurchasedLocal,
        Self::PurchasedInternational,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FinishedProduct => "finished_product",
            Self::Intermediate => "intermediate",
            Self::Machined => "machined",
            Self::PurchasedLocal => "purchased_local",
            Self::PurchasedInternational => "purchased_international",
        }
    }
}

/// Buffer positioning decision for a node.
///
/// ```text
///            set_user_fixed / set_user_forbidden / set_algorithm_recommended
///   any state ───────────────────────────────────────────────────────────▶ target
///
///   AlgorithmRecommended ── clear_buffer ──▶ NoBuffer
/// ```
///
/// `UserFixed` and `UserForbidden` survive [`NetworkNode::clear_buffer`];
/// only another explicit setter replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferStatus {
    #[default]
    NoBuffer,
    UserFixed,
    UserForbidden,
    AlgorithmRecommended,
}

impl BufferStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoBuffer => "no_buffer",
            Self::UserFixed => "user_fixed",
            Self::UserForbidden => "user_forbidden",
            Self::AlgorithmRecommended => "algorithm_recommended",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for NodeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "node type",
                got: s.to_string(),
            })
    }
}

impl FromStr for BufferStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "no_buffer" => Ok(Self::NoBuffer),
            "user_fixed" => Ok(Self::UserFixed),
            "user_forbidden" => Ok(Self::UserForbidden),
            "algorithm_recommended" => Ok(Self::AlgorithmRecommended),
            _ => Err(ParseEnumError {
                expected: "buffer status",
                got: s.to_string(),
            }),
        }
    }
}

/// Errors raised when node attributes violate their invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NodeError {
    #[error("node id must not be empty")]
    EmptyId,

    #[error("lead time must be > 0, got 0 for node {node_id}")]
    NonPositiveLeadTime { node_id: String },

    #[error("unit cost must be >= 0, got {value} for node {node_id}")]
    InvalidUnitCost { node_id: String, value: f64 },

    #[error("finished product {node_id} must have customer_tolerance_time")]
    MissingCustomerTolerance { node_id: String },

    #[error("customer tolerance time must be > 0, got 0 for node {node_id}")]
    NonPositiveCustomerTolerance { node_id: String },

    #[error("{field} must be a finite number >= 0, got {value} for node {node_id}")]
    InvalidDemand {
        node_id: String,
        field: &'static str,
        value: f64,
    },
}

/// One item of the bill of materials.
///
/// Identity and planning attributes are fixed at construction. Afterwards
/// only two things change: the buffer decision, through the four transition
/// methods, and `adu`, which only the owning network's propagation pass
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord", into = "NodeRecord")]
pub struct NetworkNode {
    node_id: String,
    name: String,
    node_type: NodeType,
    lead_time: u32,
    buffer_profile_name: String,
    moq: u32,
    order_cycle: u32,
    unit_cost: f64,
    customer_tolerance_time: Option<u32>,
    independent_adu: Option<f64>,
    adu: Option<f64>,
    sales_order_visibility_horizon: u32,
    buffer_status: BufferStatus,
    buffer_rationale: String,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl NetworkNode {
    /// Start building a node from its required attributes.
    #[must_use]
    pub fn builder(
        node_id: impl Into<String>,
        name: impl Into<String>,
        node_type: NodeType,
        lead_time: u32,
        buffer_profile_name: impl Into<String>,
    ) -> NodeBuilder {
        NodeBuilder {
            node: Self {
                node_id: node_id.into(),
                name: name.into(),
                node_type,
                lead_time,
                buffer_profile_name: buffer_profile_name.into(),
                moq: 0,
                order_cycle: 0,
                unit_cost: 0.0,
                customer_tolerance_time: None,
                independent_adu: None,
                adu: None,
                sales_order_visibility_horizon: 0,
                buffer_status: BufferStatus::NoBuffer,
                buffer_rationale: String::new(),
                metadata: BTreeMap::new(),
            },
        }
    }

    fn check(&self) -> Result<(), NodeError> {
        if self.node_id.is_empty() {
            return Err(NodeError::EmptyId);
        }
        if self.lead_time == 0 {
            return Err(NodeError::NonPositiveLeadTime {
                node_id: self.node_id.clone(),
            });
        }
        let cost_ok = self.unit_cost.is_finite() && self.unit_cost >= 0.0;
        if !cost_ok {
            return Err(NodeError::InvalidUnitCost {
                node_id: self.node_id.clone(),
                value: self.unit_cost,
            });
        }
        if self.is_finished_product() {
            match self.customer_tolerance_time {
                None => {
                    return Err(NodeError::MissingCustomerTolerance {
                        node_id: self.node_id.clone(),
                    });
                }
                Some(0) => {
                    return Err(NodeError::NonPositiveCustomerTolerance {
                        node_id: self.node_id.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        for (field, value) in [
            ("independent_adu", self.independent_adu),
            ("adu", self.adu),
        ] {
            if let Some(value) = value {
                let demand_ok = value.is_finite() && value >= 0.0;
                if !demand_ok {
                    return Err(NodeError::InvalidDemand {
                        node_id: self.node_id.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_finished_product(&self) -> bool {
        self.node_type == NodeType::FinishedProduct
    }

    /// `true` when a buffer is placed here, by a user or by an algorithm.
    #[must_use]
    pub const fn is_buffered(&self) -> bool {
        matches!(
            self.buffer_status,
            BufferStatus::UserFixed | BufferStatus::AlgorithmRecommended
        )
    }

    /// `false` only when a user has forbidden a buffer on this node.
    #[must_use]
    pub fn can_be_buffered(&self) -> bool {
        self.buffer_status != BufferStatus::UserForbidden
    }

    pub fn set_user_fixed_buffer(&mut self, rationale: impl Into<String>) {
        self.set_buffer(BufferStatus::UserFixed, rationale.into());
    }

    pub fn set_user_forbidden_buffer(&mut self, rationale: impl Into<String>) {
        self.set_buffer(BufferStatus::UserForbidden, rationale.into());
    }

    pub fn set_algorithm_recommended_buffer(&mut self, rationale: impl Into<String>) {
        self.set_buffer(BufferStatus::AlgorithmRecommended, rationale.into());
    }

    /// Drop an algorithm-recommended buffer. No-op in every other state.
    pub fn clear_buffer(&mut self) {
        if self.buffer_status == BufferStatus::AlgorithmRecommended {
            self.buffer_status = BufferStatus::NoBuffer;
            self.buffer_rationale.clear();
        }
    }

    fn set_buffer(&mut self, status: BufferStatus, rationale: String) {
        tracing::debug!(node = %self.node_id, from = %self.buffer_status, to = %status, "buffer status change");
        self.buffer_status = status;
        self.buffer_rationale = rationale;
    }

    /// Written only by [`crate::network::Network::propagate_adu`].
    pub(crate) const fn set_adu(&mut self, adu: Option<f64>) {
        self.adu = adu;
    }

    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    #[must_use]
    pub const fn lead_time(&self) -> u32 {
        self.lead_time
    }

    #[must_use]
    pub fn buffer_profile_name(&self) -> &str {
        &self.buffer_profile_name
    }

    #[must_use]
    pub const fn moq(&self) -> u32 {
        self.moq
    }

    #[must_use]
    pub const fn order_cycle(&self) -> u32 {
        self.order_cycle
    }

    #[must_use]
    pub const fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    #[must_use]
    pub const fn customer_tolerance_time(&self) -> Option<u32> {
        self.customer_tolerance_time
    }

    #[must_use]
    pub const fn independent_adu(&self) -> Option<f64> {
        self.independent_adu
    }

    /// Total demand after the last propagation pass. `None` means no demand
    /// reaches this node (an exact zero is folded into `None`).
    #[must_use]
    pub const fn adu(&self) -> Option<f64> {
        self.adu
    }

    #[must_use]
    pub const fn sales_order_visibility_horizon(&self) -> u32 {
        self.sales_order_visibility_horizon
    }

    #[must_use]
    pub const fn buffer_status(&self) -> BufferStatus {
        self.buffer_status
    }

    #[must_use]
    pub fn buffer_rationale(&self) -> &str {
        &self.buffer_rationale
    }

    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }
}

/// Builder for [`NetworkNode`]; obtain via [`NetworkNode::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct NodeBuilder {
    node: NetworkNode,
}

impl NodeBuilder {
    pub const fn moq(mut self, moq: u32) -> Self {
        self.node.moq = moq;
        self
    }

    pub const fn order_cycle(mut self, days: u32) -> Self {
        self.node.order_cycle = days;
        self
    }

    pub const fn unit_cost(mut self, cost: f64) -> Self {
        self.node.unit_cost = cost;
        self
    }

    pub const fn customer_tolerance_time(mut self, days: u32) -> Self {
        self.node.customer_tolerance_time = Some(days);
        self
    }

    pub const fn independent_adu(mut self, adu: f64) -> Self {
        self.node.independent_adu = Some(adu);
        self
    }

    /// Initial ADU. Seeds `independent_adu` when that is not set separately.
    pub const fn adu(mut self, adu: f64) -> Self {
        self.node.adu = Some(adu);
        self
    }

    pub const fn sales_order_visibility_horizon(mut self, days: u32) -> Self {
        self.node.sales_order_visibility_horizon = days;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.node.metadata.insert(key.into(), value.into());
        self
    }

    /// Validate and return the node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError`] when lead time is zero, unit cost is negative,
    /// demand is negative or non-finite, or a finished product lacks a
    /// positive customer tolerance time.
    pub fn build(self) -> Result<NetworkNode, NodeError> {
        let mut node = self.node;
        if node.independent_adu.is_none() {
            node.independent_adu = node.adu;
        }
        node.check()?;
        Ok(node)
    }
}

/// Flat key-value form of a [`NetworkNode`], as found in network documents.
///
/// Unlike [`NodeBuilder`], a record restores `adu` and `independent_adu`
/// verbatim: a stored, propagated `adu` never turns into independent demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,
    pub name: String,
    pub node_type: NodeType,
    pub lead_time: u32,
    pub buffer_profile_name: String,
    #[serde(default)]
    pub moq: u32,
    #[serde(default)]
    pub order_cycle: u32,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub customer_tolerance_time: Option<u32>,
    #[serde(default)]
    pub independent_adu: Option<f64>,
    #[serde(default)]
    pub adu: Option<f64>,
    #[serde(default)]
    pub sales_order_visibility_horizon: u32,
    #[serde(default)]
    pub buffer_status: BufferStatus,
    #[serde(default)]
    pub buffer_rationale: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<NodeRecord> for NetworkNode {
    type Error = NodeError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let node = Self {
            node_id: record.node_id,
            name: record.name,
            node_type: record.node_type,
            lead_time: record.lead_time,
            buffer_profile_name: record.buffer_profile_name,
            moq: record.moq,
            order_cycle: record.order_cycle,
            unit_cost: record.unit_cost,
            customer_tolerance_time: record.customer_tolerance_time,
            independent_adu: record.independent_adu,
            adu: record.adu,
            sales_order_visibility_horizon: record.sales_order_visibility_horizon,
            buffer_status: record.buffer_status,
            buffer_rationale: record.buffer_rationale,
            metadata: record.metadata,
        };
        node.check()?;
        Ok(node)
    }
}

impl From<NetworkNode> for NodeRecord {
    fn from(node: NetworkNode) -> Self {
        Self {
            node_id: node.node_id,
            name: node.name,
            node_type: node.node_type,
            lead_time: node.lead_time,
            buffer_profile_name: node.buffer_profile_name,
            moq: node.moq,
            order_cycle: node.order_cycle,
            unit_cost: node.unit_cost,
            customer_tolerance_time: node.customer_tolerance_time,
            independent_adu: node.independent_adu,
            adu: node.adu,
            sales_order_visibility_horizon: node.sales_order_visibility_horizon,
            buffer_status: node.buffer_status,
            buffer_rationale: node.buffer_rationale,
            metadata: node.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: &str) -> NodeBuilder {
        NetworkNode::builder(id, "Bike", NodeType::FinishedProduct, 5, "F")
            .customer_tolerance_time(5)
    }

    fn component(id: &str) -> NetworkNode {
        NetworkNode::builder(id, "Wheel", NodeType::Intermediate, 4, "I")
            .build()
            .expect("valid component")
    }

    #[test]
    fn enum_json_tags_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&NodeType::PurchasedInternational).expect("ser"),
            "\"purchased_international\""
        );
        assert_eq!(
            serde_json::to_string(&BufferStatus::AlgorithmRecommended).expect("ser"),
            "\"algorithm_recommended\""
        );
        assert_eq!(
            serde_json::from_str::<NodeType>("\"machined\"").expect("de"),
            NodeType::Machined
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in NodeType::ALL {
            assert_eq!(NodeType::from_str(&value.to_string()), Ok(value));
        }
        for value in [
            BufferStatus::NoBuffer,
            BufferStatus::UserFixed,
            BufferStatus::UserForbidden,
            BufferStatus::AlgorithmRecommended,
        ] {
            assert_eq!(BufferStatus::from_str(&value.to_string()), Ok(value));
        }
        assert_eq!(
            NodeType::from_str("Purchased-Local"),
            Ok(NodeType::PurchasedLocal)
        );
        assert!(NodeType::from_str("raw").is_err());
        assert!(BufferStatus::from_str("maybe").is_err());
    }

    #[test]
    fn adu_seeds_independent_adu() {
        let node = finished("BIKE").adu(40.0).build().expect("valid");
        assert_eq!(node.independent_adu(), Some(40.0));
        assert_eq!(node.adu(), Some(40.0));
    }

    #[test]
    fn explicit_independent_adu_is_not_overwritten() {
        let node = finished("BIKE")
            .independent_adu(10.0)
            .adu(40.0)
            .build()
            .expect("valid");
        assert_eq!(node.independent_adu(), Some(10.0));
    }

    #[test]
    fn finished_product_requires_tolerance() {
        let err = NetworkNode::builder("BIKE", "Bike", NodeType::FinishedProduct, 5, "F")
            .build()
            .expect_err("missing tolerance");
        assert!(matches!(err, NodeError::MissingCustomerTolerance { .. }));

        let err = NetworkNode::builder("BIKE", "Bike", NodeType::FinishedProduct, 5, "F")
            .customer_tolerance_time(0)
            .build()
            .expect_err("zero tolerance");
        assert!(matches!(err, NodeError::NonPositiveCustomerTolerance { .. }));
    }

    #[test]
    fn rejects_zero_lead_time_and_bad_cost() {
        let err = NetworkNode::builder("A", "A", NodeType::Machined, 0, "U")
            .build()
            .expect_err("zero lead time");
        assert!(matches!(err, NodeError::NonPositiveLeadTime { .. }));

        let err = NetworkNode::builder("A", "A", NodeType::Machined, 3, "U")
            .unit_cost(-0.01)
            .build()
            .expect_err("negative cost");
        assert!(matches!(err, NodeError::InvalidUnitCost { .. }));

        let err = NetworkNode::builder("A", "A", NodeType::Machined, 3, "U")
            .independent_adu(f64::NAN)
            .build()
            .expect_err("nan demand");
        assert!(matches!(
            err,
            NodeError::InvalidDemand {
                field: "independent_adu",
                ..
            }
        ));

        let err = NetworkNode::builder("", "A", NodeType::Machined, 3, "U")
            .build()
            .expect_err("empty id");
        assert_eq!(err, NodeError::EmptyId);
    }

    #[test]
    fn buffer_state_machine() {
        let mut node = component("WHEEL");
        assert_eq!(node.buffer_status(), BufferStatus::NoBuffer);
        assert!(!node.is_buffered());
        assert!(node.can_be_buffered());

        node.set_algorithm_recommended_buffer("decouples long lead time");
        assert!(node.is_buffered());
        node.clear_buffer();
        assert_eq!(node.buffer_status(), BufferStatus::NoBuffer);
        assert_eq!(node.buffer_rationale(), "");

        node.set_user_fixed_buffer("planner decision");
        node.clear_buffer();
        assert_eq!(node.buffer_status(), BufferStatus::UserFixed);
        assert_eq!(node.buffer_rationale(), "planner decision");

        node.set_user_forbidden_buffer("no floor space");
        assert!(!node.can_be_buffered());
        assert!(!node.is_buffered());
        node.clear_buffer();
        assert_eq!(node.buffer_status(), BufferStatus::UserForbidden);

        // Last explicit write wins.
        node.set_algorithm_recommended_buffer("rerun");
        assert_eq!(node.buffer_status(), BufferStatus::AlgorithmRecommended);
    }

    #[test]
    fn record_roundtrip_keeps_stored_adu_verbatim() {
        let json = r#"{
            "node_id": "WHEEL", "name": "Wheel", "node_type": "intermediate",
            "lead_time": 4, "buffer_profile_name": "I",
            "independent_adu": null, "adu": 80.0,
            "buffer_status": "user_fixed", "buffer_rationale": "bottleneck"
        }"#;
        let node: NetworkNode = serde_json::from_str(json).expect("valid record");
        assert_eq!(node.independent_adu(), None);
        assert_eq!(node.adu(), Some(80.0));
        assert_eq!(node.buffer_status(), BufferStatus::UserFixed);

        let again: NetworkNode =
            serde_json::from_str(&serde_json::to_string(&node).expect("ser")).expect("de");
        assert_eq!(again, node);
    }

    #[test]
    fn invalid_record_fails_like_construction() {
        let json = r#"{
            "node_id": "BIKE", "name": "Bike", "node_type": "finished_product",
            "lead_time": 5, "buffer_profile_name": "F"
        }"#;
        let err = serde_json::from_str::<NetworkNode>(json).expect_err("missing tolerance");
        assert!(err.to_string().contains("customer_tolerance_time"));
    }

    #[test]
    fn metadata_is_kept() {
        let node = finished("BIKE")
            .metadata("production_type", "finish to order")
            .build()
            .expect("valid");
        assert_eq!(
            node.metadata()["production_type"],
            serde_json::json!("finish to order")
        );
    }
}
