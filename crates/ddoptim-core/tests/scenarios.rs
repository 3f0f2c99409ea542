//! End-to-end network scenarios: linear chain, fan-in, zero demand, cycle
//! rejection and finished-product construction rules.

use ddoptim_core::{
    BufferProfile, DltThresholds, ErrorCode, LeadTimeFactors, Network, NetworkError, NetworkNode,
    NodeError, NodeType, PropagationMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn profile() -> BufferProfile {
    BufferProfile::new(
        "P",
        "any valid profile",
        DltThresholds {
            short: 2,
            medium: 6,
            long: 12,
        },
        LeadTimeFactors::STANDARD,
        0.4,
    )
    .expect("valid profile")
}

fn network(mode: PropagationMode) -> Network {
    let mut net = Network::with_mode(mode);
    net.add_profile(profile()).expect("profile");
    net
}

fn finished(id: &str, adu: f64) -> NetworkNode {
    NetworkNode::builder(id, id, NodeType::FinishedProduct, 3, "P")
        .customer_tolerance_time(5)
        .independent_adu(adu)
        .build()
        .expect("finished product")
}

fn component(id: &str) -> NetworkNode {
    NetworkNode::builder(id, id, NodeType::Intermediate, 2, "P")
        .build()
        .expect("component")
}

fn adu(net: &Network, id: &str) -> Option<f64> {
    net.node(id).and_then(NetworkNode::adu)
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

#[test]
fn linear_chain() {
    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 40.0)).expect("A");
    net.add_node(component("B")).expect("B");
    net.add_bom_relationship("A", "B", 2.0).expect("A->B");

    assert_eq!(adu(&net, "A"), Some(40.0));
    assert_eq!(adu(&net, "B"), Some(80.0));
}

#[test]
fn fan_in() {
    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 40.0)).expect("A");
    net.add_node(finished("C", 10.0)).expect("C");
    net.add_node(component("D")).expect("D");
    net.add_bom_relationship("A", "D", 2.0).expect("A->D");
    net.add_bom_relationship("C", "D", 3.0).expect("C->D");

    assert_eq!(adu(&net, "D"), Some(110.0));
}

#[test]
fn zero_demand_is_absent_not_zero() {
    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 40.0)).expect("A");
    net.add_node(component("E")).expect("E");
    net.add_node(component("F")).expect("F");
    net.add_bom_relationship("E", "F", 5.0).expect("E->F");
    net.propagate_adu().expect("propagate");

    assert_eq!(adu(&net, "E"), None);
    assert_eq!(adu(&net, "F"), None);
}

#[test]
fn deliberate_zero_independent_demand_collapses() {
    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 0.0)).expect("A");
    assert_eq!(net.node("A").and_then(NetworkNode::independent_adu), Some(0.0));
    assert_eq!(adu(&net, "A"), None);
}

#[test]
fn deferred_and_immediate_agree() {
    let build = |mode| {
        let mut net = network(mode);
        net.add_node(finished("A", 40.0)).expect("A");
        net.add_node(finished("C", 10.0)).expect("C");
        net.add_node(component("D")).expect("D");
        net.add_node(component("E")).expect("E");
        net.add_bom_relationship("A", "D", 2.0).expect("A->D");
        net.add_bom_relationship("C", "D", 3.0).expect("C->D");
        net.add_bom_relationship("D", "E", 0.5).expect("D->E");
        net.propagate_adu().expect("propagate");
        net
    };
    let immediate = build(PropagationMode::Immediate);
    let mut deferred = build(PropagationMode::Deferred);
    deferred.set_propagation_mode(PropagationMode::Immediate);
    assert_eq!(immediate, deferred);
    assert_eq!(adu(&immediate, "E"), Some(55.0));
}

// ---------------------------------------------------------------------------
// Cycle rejection
// ---------------------------------------------------------------------------

#[test]
fn cycle_rejection_keeps_chain_intact() {
    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 4.0)).expect("A");
    net.add_node(component("B")).expect("B");
    net.add_node(component("C")).expect("C");
    net.add_bom_relationship("A", "B", 1.0).expect("A->B");
    net.add_bom_relationship("B", "C", 1.0).expect("B->C");
    let before = net.clone();

    let err = net
        .add_bom_relationship("C", "A", 1.0)
        .expect_err("C->A closes a cycle");
    assert_eq!(err.code(), ErrorCode::CycleDetected);
    let message = err.to_string();
    assert!(message.contains("'C' -> 'A'"), "{message}");
    assert!(message.contains("C → A → B → C"), "{message}");

    assert_eq!(net, before);
    assert_eq!(net.bom_quantity("A", "B"), Ok(1.0));
    assert_eq!(net.bom_quantity("B", "C"), Ok(1.0));
    assert!(net.bom_quantity("C", "A").is_err());
    assert_eq!(adu(&net, "C"), Some(4.0));
}

#[test]
fn deep_bom_chain_is_handled_end_to_end() {
    const DEPTH: usize = 5_000;
    let ids: Vec<String> = (0..DEPTH).map(|i| format!("L{i:04}")).collect();
    let mut net = network(PropagationMode::Deferred);
    net.add_node(finished(&ids[0], 1.0)).expect("head");
    for id in &ids[1..] {
        net.add_node(component(id)).expect("level");
    }
    let loaded = net
        .add_bom_relationships(ids.windows(2).map(|pair| (&pair[0], &pair[1], 1.0)))
        .expect("chain");
    assert_eq!(loaded, DEPTH - 1);

    let (head, tail) = (&ids[0], &ids[DEPTH - 1]);
    assert!(net.validate().is_empty());
    assert_eq!(adu(&net, tail), Some(1.0));
    assert_eq!(net.paths_to_finished_products(tail), Ok(vec![ids.clone()]));
    assert_eq!(net.upstream_nodes(tail).map(|up| up.len()), Ok(DEPTH - 1));

    let before = net.clone();
    let err = net
        .add_bom_relationship(tail, head, 1.0)
        .expect_err("tail -> head closes a cycle");
    let NetworkError::CycleDetected(cycle) = &err else {
        panic!("expected a cycle, got {err:?}");
    };
    assert_eq!(cycle.cycle_len(), DEPTH);
    assert_eq!(net, before);
}

// ---------------------------------------------------------------------------
// Construction rules
// ---------------------------------------------------------------------------

#[test]
fn finished_product_requires_customer_tolerance() {
    let missing = NetworkNode::builder("FP", "FP", NodeType::FinishedProduct, 3, "P").build();
    assert_eq!(
        missing,
        Err(NodeError::MissingCustomerTolerance {
            node_id: "FP".into()
        })
    );

    let zero = NetworkNode::builder("FP", "FP", NodeType::FinishedProduct, 3, "P")
        .customer_tolerance_time(0)
        .build();
    assert!(matches!(
        zero,
        Err(NodeError::NonPositiveCustomerTolerance { .. })
    ));
}

#[test]
fn construction_errors_surface_through_network_error() {
    let err: NetworkError = NetworkNode::builder("X", "X", NodeType::Machined, 0, "P")
        .build()
        .expect_err("zero lead time")
        .into();
    assert_eq!(err.code(), ErrorCode::InvalidNode);
    assert!(err.to_string().contains("lead"), "{err}");
}

#[test]
fn validation_reports_findings_without_failing() {
    let net = network(PropagationMode::Immediate);
    assert_eq!(net.validate(), ["Network is empty - no nodes defined"]);

    let mut net = network(PropagationMode::Immediate);
    net.add_node(finished("A", 1.0)).expect("A");
    assert!(net.validate().is_empty());
}
