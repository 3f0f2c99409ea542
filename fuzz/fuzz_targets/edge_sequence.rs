#![no_main]

use ddoptim_core::{Network, NetworkNode, NodeType, default_profiles};
use libfuzzer_sys::fuzz_target;

const NODES: u8 = 12;

// Each pair of bytes is an edge attempt; the graph must stay acyclic and a
// rejected edge must leave the network unchanged.
fuzz_target!(|data: &[u8]| {
    let mut net = Network::new();
    for profile in default_profiles().into_values() {
        net.add_profile(profile).expect("profile");
    }
    for i in 0..NODES {
        let id = format!("N{i}");
        let node = if i == 0 {
            NetworkNode::builder(&id, &id, NodeType::FinishedProduct, 1, "F")
                .customer_tolerance_time(1)
                .independent_adu(10.0)
                .build()
        } else {
            NetworkNode::builder(&id, &id, NodeType::Machined, 1, "U").build()
        };
        net.add_node(node.expect("node")).expect("add node");
    }

    for pair in data.chunks_exact(2) {
        let parent = format!("N{}", pair[0] % NODES);
        let child = format!("N{}", pair[1] % NODES);
        let quantity = f64::from(pair[0] / NODES % 4 + 1);
        let before = net.clone();
        if net.add_bom_relationship(&parent, &child, quantity).is_err() {
            assert_eq!(net, before);
        }
        assert!(net.topological_order().is_ok());
    }
});
