#![no_main]

use ddoptim_core::Network;
use libfuzzer_sys::fuzz_target;

// Any document that loads must be acyclic and propagated. With finite
// demand it also re-serializes to a fixed point.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(network) = Network::from_json(text) else {
        return;
    };

    assert!(!network.is_stale());
    assert!(network.topological_order().is_ok());
    if network.nodes().any(|node| node.adu().is_some_and(|adu| !adu.is_finite())) {
        return;
    }

    let json = network.to_json_pretty().expect("serialize loaded network");
    let back = Network::from_json(&json).expect("reload serialized network");
    assert_eq!(back, network);
    assert_eq!(back.to_json_pretty().expect("serialize again"), json);
});
