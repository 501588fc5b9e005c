//! Choice graph module.
//!
//! # Overview
//!
//! This module turns packed choice rows into petgraph-backed directed
//! graphs and provides the structural queries the metrics, layout and
//! renderer rely on.
//!
//! ## Pipeline
//!
//! ```text
//! choices_a / choices_b (packed rows)
//!        ↓  build::ChoiceGraph::from_rows()
//! ChoiceGraph A, ChoiceGraph B
//!        ↓  validate::validate_nodes()
//! same participant set (or SnaError::NodeMismatch)
//!        ↓  components::components()
//! cliques / strongly / weakly connected groups
//! ```

pub mod build;
pub mod components;
pub mod validate;

use serde::{Deserialize, Serialize};

// Re-export primary types at module level for convenience.
pub use build::{ChoiceGraph, graph_from_edge_list};
pub use components::{Components, components};
pub use validate::{check_nodes, validate_nodes};

/// Which of the two questions a network answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkKind {
    A,
    B,
}

impl NetworkKind {
    /// Lowercase letter used in file names and report keys.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
        }
    }

    /// The network this one is compared against.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}
