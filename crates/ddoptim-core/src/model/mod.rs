//! Item-level data model: node categories, buffer decisions and the
//! [`node::NetworkNode`] entity itself.

pub mod node;

pub use node::{
    BufferStatus, NetworkNode, NodeBuilder, NodeError, NodeRecord, NodeType, ParseEnumError,
};
