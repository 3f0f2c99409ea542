use std::fmt;

use crate::graph::cycles::CycleWarning;
use crate::model::node::NodeError;
use crate::profile::ProfileError;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidProfile,
    InvalidNode,
    DuplicateProfile,
    DuplicateNode,
    UnknownProfile,
    UnknownNode,
    UnknownEdge,
    InvalidQuantity,
    CycleDetected,
    CyclicGraph,
    MalformedDocument,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidProfile => "E1001",
            Self::InvalidNode => "E1002",
            Self::DuplicateProfile => "E2001",
            Self::DuplicateNode => "E2002",
            Self::UnknownProfile => "E2003",
            Self::UnknownNode => "E2004",
            Self::UnknownEdge => "E2005",
            Self::InvalidQuantity => "E2006",
            Self::CycleDetected => "E3001",
            Self::CyclicGraph => "E3002",
            Self::MalformedDocument => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidProfile => "Invalid buffer profile",
            Self::InvalidNode => "Invalid network node",
            Self::DuplicateProfile => "Profile name already registered",
            Self::DuplicateNode => "Node id already registered",
            Self::UnknownProfile => "Buffer profile not found",
            Self::UnknownNode => "Node not found",
            Self::UnknownEdge => "BOM relationship not found",
            Self::InvalidQuantity => "BOM quantity must be positive",
            Self::CycleDetected => "Cycle would be created",
            Self::CyclicGraph => "Network graph contains a cycle",
            Self::MalformedDocument => "Malformed network document",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidProfile => Some(
                "Use ascending DLT thresholds and descending lead-time factors within (0, 1].",
            ),
            Self::InvalidNode => {
                Some("Lead time must be > 0; finished products need a customer tolerance time.")
            }
            Self::DuplicateProfile | Self::DuplicateNode => {
                Some("Pick a unique key; the existing entry was left untouched.")
            }
            Self::UnknownProfile => Some("Register the profile before adding nodes that use it."),
            Self::UnknownNode => Some("Add both nodes before declaring a BOM relationship."),
            Self::UnknownEdge => None,
            Self::InvalidQuantity => Some("Use a strictly positive quantity per parent."),
            Self::CycleDetected => Some("Remove or reverse a BOM link to keep the graph acyclic."),
            Self::CyclicGraph => Some("Rebuild the network; edge insertion should prevent this."),
            Self::MalformedDocument => Some("Check the JSON against the profiles/nodes/edges layout."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by [`crate::network::Network`] mutation, ordering and
/// (de)serialization.
///
/// Every variant leaves the network exactly as it was before the failing
/// call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),

    #[error(transparent)]
    InvalidNode(#[from] NodeError),

    #[error("profile '{0}' already exists")]
    DuplicateProfile(String),

    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    #[error("profile '{profile}' not found for node '{node_id}' (available: {available})")]
    UnknownProfile {
        node_id: String,
        profile: String,
        available: String,
    },

    #[error("node '{0}' not found")]
    UnknownNode(String),

    #[error("no BOM relationship between '{parent}' and '{child}'")]
    UnknownEdge { parent: String, child: String },

    #[error("quantity for '{parent}' -> '{child}' must be > 0, got {quantity}")]
    InvalidQuantity {
        parent: String,
        child: String,
        quantity: f64,
    },

    #[error("adding edge '{}' -> '{}' would create a cycle: {0}", .0.edge_from, .0.edge_to)]
    CycleDetected(CycleWarning),

    #[error("network contains a cycle through {} node(s); no topological order exists", .remaining.len())]
    CyclicGraph { remaining: Vec<String> },

    #[error("malformed network document: {0}")]
    MalformedDocument(String),
}

impl NetworkError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidProfile(_) => ErrorCode::InvalidProfile,
            Self::InvalidNode(_) => ErrorCode::InvalidNode,
            Self::DuplicateProfile(_) => ErrorCode::DuplicateProfile,
            Self::DuplicateNode(_) => ErrorCode::DuplicateNode,
            Self::UnknownProfile { .. } => ErrorCode::UnknownProfile,
            Self::UnknownNode(_) => ErrorCode::UnknownNode,
            Self::UnknownEdge { .. } => ErrorCode::UnknownEdge,
            Self::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            Self::CycleDetected(_) => ErrorCode::CycleDetected,
            Self::CyclicGraph { .. } => ErrorCode::CyclicGraph,
            Self::MalformedDocument(_) => ErrorCode::MalformedDocument,
        }
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, NetworkError};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 11] = [
        ErrorCode::InvalidProfile,
        ErrorCode::InvalidNode,
        ErrorCode::DuplicateProfile,
        ErrorCode::DuplicateNode,
        ErrorCode::UnknownProfile,
        ErrorCode::UnknownNode,
        ErrorCode::UnknownEdge,
        ErrorCode::InvalidQuantity,
        ErrorCode::CycleDetected,
        ErrorCode::CyclicGraph,
        ErrorCode::MalformedDocument,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let raw = code.code();
            assert_eq!(raw.len(), 5);
            assert!(raw.starts_with('E'));
            assert!(raw.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn network_errors_map_to_codes() {
        assert_eq!(
            NetworkError::DuplicateNode("A".into()).code(),
            ErrorCode::DuplicateNode
        );
        assert_eq!(
            NetworkError::CyclicGraph { remaining: vec![] }.code(),
            ErrorCode::CyclicGraph
        );
    }

    #[test]
    fn quantity_error_names_both_endpoints() {
        let err = NetworkError::InvalidQuantity {
            parent: "BIKE".into(),
            child: "WHEEL".into(),
            quantity: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("BIKE"), "msg: {msg}");
        assert!(msg.contains("WHEEL"), "msg: {msg}");
        assert!(msg.contains("-1"), "msg: {msg}");
    }
}
