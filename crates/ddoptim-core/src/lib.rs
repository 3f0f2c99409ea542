#![forbid(unsafe_code)]
//! ddoptim-core library.
//!
//! A demand-driven supply-chain network: buffer profiles, BOM nodes, and a
//! network that keeps the BOM acyclic and derives each item's average daily
//! usage (ADU) from finished-product demand.
//!
//! ```no_run
//! use ddoptim_core::{Network, NetworkNode, NodeType, default_profiles};
//!
//! # fn main() -> Result<(), ddoptim_core::NetworkError> {
//! let mut net = Network::new();
//! for profile in default_profiles().into_values() {
//!     net.add_profile(profile)?;
//! }
//! net.add_node(
//!     NetworkNode::builder("BIKE", "Bike", NodeType::FinishedProduct, 5, "F")
//!         .customer_tolerance_time(5)
//!         .independent_adu(40.0)
//!         .build()?,
//! )?;
//! net.add_node(NetworkNode::builder("WHEEL", "Wheel", NodeType::Intermediate, 4, "I").build()?)?;
//! net.add_bom_relationship("BIKE", "WHEEL", 2.0)?;
//! assert_eq!(net.node("WHEEL").and_then(NetworkNode::adu), Some(80.0));
//! # Ok(())
//! # }
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in the library; `anyhow::Result` for
//!   configuration loading.
//! - **Logging**: the library never installs a subscriber. It emits `debug!`
//!   events whenever the network is modified and `warn!` when an edge is
//!   rejected. [`Network::propagate_adu`] and
//!   [`Network::from_document`] run inside `#[instrument]` spans. The CLI
//!   decides where events go.

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod network;
pub mod profile;
pub mod sample;

pub use error::{ErrorCode, NetworkError};
pub use graph::CycleWarning;
pub use model::{BufferStatus, NetworkNode, NodeBuilder, NodeError, NodeType};
pub use network::{
    BomEdge, Network, NetworkDocument, NodeMut, PropagationMode, PropagationSummary,
};
pub use profile::{BufferProfile, DltThresholds, LeadTimeFactors, ProfileError, default_profiles};
