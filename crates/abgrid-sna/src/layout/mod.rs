//! Deterministic 2-D layout of a choice graph.
//!
//! # Overview
//!
//! ```text
//! ChoiceGraph
//!     ↓  spring::spring_positions()   seeded Fruchterman–Reingold
//! positions centered on the origin, max |coord| = 1
//!     ↓  isolates::place_isolates()   nodes without edges moved outside
//! Layout (label → Point)
//! ```
//!
//! A single [`LayoutRng`] seeded from [`LayoutConfig::seed`] drives both the
//! initial placement and the isolate jitter, so the same graph and seed give
//! bit-identical coordinates on every run and machine. The generator is
//! ChaCha8 named directly, whose output stream is fixed across `rand`
//! releases. The seed is never derived from the clock or the graph content.

pub mod isolates;
pub mod spring;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::graph::{ChoiceGraph, NetworkKind};

/// Random source of the layout engine.
pub type LayoutRng = ChaCha8Rng;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Node coordinates keyed by label.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<String, Point>,
}

impl Layout {
    /// Position of `label`, if it is part of the layout.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Point> {
        self.positions.get(label).copied()
    }

    /// Positions in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions.iter().map(|(label, p)| (label.as_str(), *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lower-left and upper-right corners of the bounding box.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.positions.values();
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

impl FromIterator<(String, Point)> for Layout {
    fn from_iter<I: IntoIterator<Item = (String, Point)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Compute the layout of one network.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn compute_layout(g: &ChoiceGraph, config: &LayoutConfig, kind: NetworkKind) -> Layout {
    let mut rng = LayoutRng::seed_from_u64(config.seed);
    let k = config.k_for(kind);

    let mut positions = spring::spring_positions(g, k, config.iterations, &mut rng);
    let moved = isolates::place_isolates(g, &mut positions, config, &mut rng);
    debug!(?kind, k, isolates = moved, "layout computed");

    g.graph
        .node_indices()
        .map(|idx| (g.label(idx).to_string(), positions[idx.index()]))
        .collect()
}
