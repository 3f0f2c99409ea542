//! Graph-level abstractions for BOM relationships.
//!
//! These functions operate on ids and quantities only. Node payloads and
//! profiles live in [`crate::network::Network`], which composes them.
//!
//! ## Submodules
//!
//! - [`bom`]: Quantity-weighted adjacency in both directions.
//! - [`cycles`]: Cycle checks for edge insertion and whole-graph checks.
//! - [`order`]: Topological order, reachability and path enumeration.

pub mod bom;
pub mod cycles;
pub mod order;

pub use bom::BomGraph;
pub use cycles::CycleWarning;
