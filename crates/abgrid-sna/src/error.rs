//! Error taxonomy for the analysis engine.
//!
//! Every failure is a value: a caller processing a batch of groups can log
//! the error for one group and carry on with the next. Variants are grouped
//! by [`ErrorKind`] so callers can tell bad input apart from computations
//! that are undefined for the given graph.

use std::fmt;

/// Coarse classification of an [`SnaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The two networks of a group do not describe the same participants.
    Input,
    /// A metric is undefined for this graph or failed to converge.
    Computation,
    /// The sociogram could not be written.
    Render,
    /// The configuration could not be parsed.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Computation => "computation",
            Self::Render => "render",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

/// Errors produced while analysing a group.
#[derive(Debug, thiserror::Error)]
pub enum SnaError {
    /// Participants appear in one network but not in the other.
    #[error(
        "node sets of networks A and B differ (only in A: [{}], only in B: [{}])",
        join_labels(.only_in_a),
        join_labels(.only_in_b)
    )]
    NodeMismatch {
        /// Labels present in network A only (sorted).
        only_in_a: Vec<String>,
        /// Labels present in network B only (sorted).
        only_in_b: Vec<String>,
    },

    /// The metric is not defined for a graph this small.
    #[error("{metric} is undefined for a graph with {node_count} node(s)")]
    DegenerateGraph {
        /// Name of the metric that could not be computed.
        metric: &'static str,
        /// Node count of the offending graph.
        node_count: usize,
    },

    /// PageRank power iteration hit the iteration cap.
    #[error("pagerank failed to converge within {iterations} iterations")]
    PageRankNotConverged {
        /// Number of iterations performed.
        iterations: usize,
    },

    /// Writing the SVG document failed.
    #[error("failed to render sociogram: {0}")]
    Render(#[from] fmt::Error),

    /// The TOML configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}

impl SnaError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NodeMismatch { .. } => "E1001",
            Self::DegenerateGraph { .. } => "E2001",
            Self::PageRankNotConverged { .. } => "E2002",
            Self::Render(_) => "E3001",
            Self::Config(_) => "E4001",
        }
    }

    /// Which class of failure this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeMismatch { .. } => ErrorKind::Input,
            Self::DegenerateGraph { .. } | Self::PageRankNotConverged { .. } => {
                ErrorKind::Computation
            }
            Self::Render(_) => ErrorKind::Render,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}
