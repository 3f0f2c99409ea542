use ddoptim_core::sample::{BIKE_ADU, bicycle_network};
use ddoptim_core::{BufferStatus, Network, NetworkNode};

fn adu(net: &Network, id: &str) -> Option<f64> {
    net.node(id).and_then(NetworkNode::adu)
}

#[test]
fn sample_adu_follows_the_bom() {
    let net = bicycle_network().expect("sample");
    let expected = [
        ("BIKE", BIKE_ADU),
        ("WHEEL", 80.0),
        ("FRAME_ASSY", 40.0),
        ("HANDLEBAR_ASSY", 40.0),
        ("SADDLE_ASSY", 40.0),
        ("SPOKE", 5760.0),
        ("TIRE", 80.0),
        ("RIM", 80.0),
        ("VALVE", 80.0),
        ("REFLECTOR", 160.0),
        ("FRAME", 40.0),
        ("CRANKSET", 80.0),
        ("CHAINRING", 120.0),
        ("SPROCKET", 200.0),
        ("CHAIN", 40.0),
        ("HANDLEBAR", 40.0),
        ("GRIP", 80.0),
        ("BRAKE", 80.0),
        ("SADDLE", 40.0),
        ("SEATPOST", 40.0),
        ("BLANK_A", 360.0),
        ("BLANK_B", 1000.0),
        ("STEEL_PLATE", 1080.0),
        ("BUSHING", 80_000.0),
        ("PIN", 80_000.0),
        ("ROLLER", 80_000.0),
    ];
    assert_eq!(expected.len(), net.len());
    for (id, want) in expected {
        assert_eq!(adu(&net, id), Some(want), "{id}");
    }
}

#[test]
fn sample_order_starts_at_the_bike() {
    let net = bicycle_network().expect("sample");
    let order = net.topological_order().expect("acyclic");
    assert_eq!(order.first().map(String::as_str), Some("BIKE"));
    let reverse = net.reverse_topological_order().expect("acyclic");
    assert_eq!(reverse.last().map(String::as_str), Some("BIKE"));
}

#[test]
fn raw_material_where_used() {
    let net = bicycle_network().expect("sample");
    let upstream: Vec<_> = net
        .upstream_nodes("STEEL_PLATE")
        .expect("known")
        .into_iter()
        .collect();
    assert_eq!(upstream, ["BIKE", "BLANK_A", "CHAINRING", "FRAME_ASSY"]);

    let paths = net.paths_to_finished_products("STEEL_PLATE").expect("paths");
    assert_eq!(
        paths,
        vec![vec![
            "BIKE".to_string(),
            "FRAME_ASSY".into(),
            "CHAINRING".into(),
            "BLANK_A".into(),
            "STEEL_PLATE".into(),
        ]]
    );
}

#[test]
fn bike_reaches_every_component() {
    let net = bicycle_network().expect("sample");
    let downstream = net.downstream_nodes("BIKE").expect("known");
    assert_eq!(downstream.len(), net.len() - 1);
}

#[test]
fn sample_survives_json_round_trip_with_buffer_decisions() {
    let mut net = bicycle_network().expect("sample");
    if let Some(mut wheel) = net.node_mut("WHEEL") {
        wheel.set_user_fixed_buffer("bottleneck assembly");
    }
    if let Some(mut tire) = net.node_mut("TIRE") {
        tire.set_algorithm_recommended_buffer("30 day lead time");
    }

    let json = net.to_json_pretty().expect("json");
    let back = Network::from_json(&json).expect("reload");
    assert_eq!(back, net);
    assert_eq!(
        back.node("WHEEL").map(NetworkNode::buffer_status),
        Some(BufferStatus::UserFixed)
    );
    assert_eq!(adu(&back, "SPOKE"), Some(5760.0));
}

#[test]
fn profiles_select_factor_for_component_lead_times() {
    let net = bicycle_network().expect("sample");
    let tire = net.node("TIRE").expect("tire");
    let profile = net.profile(tire.buffer_profile_name()).expect("AI");
    assert!((profile.select_lead_time_factor(f64::from(tire.lead_time())) - 0.25).abs() < f64::EPSILON);

    let brake = net.node("BRAKE").expect("brake");
    let profile = net.profile(brake.buffer_profile_name()).expect("AL");
    assert!((profile.select_lead_time_factor(f64::from(brake.lead_time())) - 0.5).abs() < f64::EPSILON);
}
