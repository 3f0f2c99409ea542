//! Reference bicycle-assembly network.
//!
//! One finished bike built from four subassemblies, five machined parts and
//! sixteen purchased parts. Demand is 40 bikes a day; every component's ADU
//! follows from the BOM below.
//!
//! ```text
//! BIKE ─┬─ 2 WHEEL ─────── 72 SPOKE, 1 TIRE, 1 RIM, 1 VALVE, 2 REFLECTOR
//!       ├─ 1 FRAME_ASSY ── 1 FRAME, 2 CRANKSET, 3 CHAINRING, 5 SPROCKET, 1 CHAIN
//!       ├─ 1 HANDLEBAR_ASSY ─ 1 HANDLEBAR, 2 GRIP, 2 BRAKE
//!       └─ 1 SADDLE_ASSY ─ 1 SADDLE, 1 SEATPOST
//! CHAINRING ─ 3 BLANK_A ─ 3 STEEL_PLATE
//! SPROCKET ── 5 BLANK_B ─ 80 BUSHING, 80 PIN, 80 ROLLER
//! ```

use crate::error::NetworkError;
use crate::model::node::{NetworkNode, NodeType};
use crate::network::Network;
use crate::profile::default_profiles;

/// Independent daily demand for the finished bike.
pub const BIKE_ADU: f64 = 40.0;

struct Part {
    id: &'static str,
    name: &'static str,
    node_type: NodeType,
    lead_time: u32,
    profile: &'static str,
    moq: u32,
    order_cycle: u32,
    unit_cost: f64,
}

const fn part(
    id: &'static str,
    name: &'static str,
    node_type: NodeType,
    lead_time: u32,
    profile: &'static str,
    unit_cost: f64,
) -> Part {
    Part {
        id,
        name,
        node_type,
        lead_time,
        profile,
        moq: 0,
        order_cycle: 0,
        unit_cost,
    }
}

const fn with_moq(mut p: Part, moq: u32) -> Part {
    p.moq = moq;
    p
}

const fn with_cycle(mut p: Part, days: u32) -> Part {
    p.order_cycle = days;
    p
}

const PARTS: [Part; 25] = {
    use NodeType::{
        Intermediate as I, Machined as U, PurchasedInternational as AI, PurchasedLocal as AL,
    };
    [
        with_moq(part("WHEEL", "Wheel", I, 4, "I", 50.0), 200),
        part("FRAME_ASSY", "Frame assembly", I, 4, "I", 80.0),
        part("HANDLEBAR_ASSY", "Handlebar assembly", I, 3, "I", 25.0),
        with_cycle(part("SADDLE_ASSY", "Saddle assembly", I, 2, "I", 20.0), 7),
        with_moq(part("CHAINRING", "Chainring", U, 8, "U", 15.0), 300),
        with_moq(part("SPROCKET", "Sprocket", U, 8, "U", 12.0), 300),
        part("CHAIN", "Chain", U, 5, "U", 10.0),
        part("BLANK_A", "Machined blank A", U, 15, "U", 5.0),
        part("BLANK_B", "Machined blank B", U, 15, "U", 5.0),
        part("FRAME", "Frame", AL, 7, "AL", 70.0),
        part("CRANKSET", "Crankset", AL, 15, "AL", 20.0),
        part("HANDLEBAR", "Handlebar", AL, 5, "AL", 15.0),
        part("GRIP", "Grip", AL, 8, "AL", 3.0),
        part("BRAKE", "Brake", AL, 2, "AL", 8.0),
        part("SADDLE", "Saddle", AL, 2, "AL", 12.0),
        part("SEATPOST", "Seat post", AL, 2, "AL", 6.0),
        part("STEEL_PLATE", "Steel plate", AL, 12, "AL", 1.5),
        part("BUSHING", "Bushing", AL, 8, "AL", 0.05),
        part("PIN", "Pin", AL, 10, "AL", 0.02),
        part("ROLLER", "Roller", AL, 12, "AL", 0.05),
        with_cycle(with_moq(part("SPOKE", "Spoke", AI, 15, "AI", 0.3), 5000), 30),
        with_cycle(part("TIRE", "Tire", AI, 30, "AI", 9.0), 30),
        with_cycle(part("RIM", "Rim", AI, 10, "AI", 14.0), 30),
        part("VALVE", "Valve", AI, 5, "AI", 0.5),
        part("REFLECTOR", "Reflector", AI, 5, "AI", 0.8),
    ]
};

const EDGES: [(&str, &str, f64); 25] = [
    ("BIKE", "WHEEL", 2.0),
    ("BIKE", "FRAME_ASSY", 1.0),
    ("BIKE", "HANDLEBAR_ASSY", 1.0),
    ("BIKE", "SADDLE_ASSY", 1.0),
    ("WHEEL", "SPOKE", 72.0),
    ("WHEEL", "TIRE", 1.0),
    ("WHEEL", "RIM", 1.0),
    ("WHEEL", "VALVE", 1.0),
    ("WHEEL", "REFLECTOR", 2.0),
    ("FRAME_ASSY", "FRAME", 1.0),
    ("FRAME_ASSY", "CRANKSET", 2.0),
    ("FRAME_ASSY", "CHAINRING", 3.0),
    ("FRAME_ASSY", "SPROCKET", 5.0),
    ("FRAME_ASSY", "CHAIN", 1.0),
    ("HANDLEBAR_ASSY", "HANDLEBAR", 1.0),
    ("HANDLEBAR_ASSY", "GRIP", 2.0),
    ("HANDLEBAR_ASSY", "BRAKE", 2.0),
    ("SADDLE_ASSY", "SADDLE", 1.0),
    ("SADDLE_ASSY", "SEATPOST", 1.0),
    ("CHAINRING", "BLANK_A", 3.0),
    ("SPROCKET", "BLANK_B", 5.0),
    ("BLANK_A", "STEEL_PLATE", 3.0),
    ("BLANK_B", "BUSHING", 80.0),
    ("BLANK_B", "PIN", 80.0),
    ("BLANK_B", "ROLLER", 80.0),
];

/// Build the reference bicycle network with ADU already propagated.
///
/// # Errors
///
/// Only if the built-in tables are inconsistent.
pub fn bicycle_network() -> Result<Network, NetworkError> {
    let mut network = Network::new();
    for profile in default_profiles().into_values() {
        network.add_profile(profile)?;
    }

    let bike = NetworkNode::builder("BIKE", "City bicycle", NodeType::FinishedProduct, 5, "F")
        .unit_cost(500.0)
        .customer_tolerance_time(5)
        .adu(BIKE_ADU)
        .sales_order_visibility_horizon(7)
        .metadata("production_type", "finish to order")
        .metadata("seasonality", "85% winter, 130% summer")
        .build()?;
    network.add_node(bike)?;

    for p in &PARTS {
        let node = NetworkNode::builder(p.id, p.name, p.node_type, p.lead_time, p.profile)
            .moq(p.moq)
            .order_cycle(p.order_cycle)
            .unit_cost(p.unit_cost)
            .build()?;
        network.add_node(node)?;
    }

    network.add_bom_relationships(EDGES)?;
    tracing::debug!(
        nodes = network.len(),
        edges = network.edge_count(),
        "sample network built"
    );
    Ok(network)
}
