//! Fruchterman–Reingold force-directed placement.
//!
//! # Algorithm
//!
//! Nodes start uniformly in the unit square. On every iteration each node
//! `i` is displaced by
//!
//! ```text
//! Σ_j (p_i − p_j) · (k² / d² − A_ij · d / k)
//! ```
//!
//! where `d` is the distance (clipped to 0.01) and `A_ij` is 1 when `i`
//! chose `j`. The step length is capped by a temperature that starts at a
//! tenth of the initial spread and cools linearly to 0. Iteration stops
//! early once the mean step falls below [`THRESHOLD`].
//!
//! The result is centered on the origin and scaled so the largest absolute
//! coordinate is 1.

use petgraph::visit::EdgeRef;
use rand::Rng;

use crate::graph::build::ChoiceGraph;
use crate::layout::{LayoutRng, Point};

/// Mean step length below which the layout counts as settled.
pub const THRESHOLD: f64 = 1e-4;

const MIN_DISTANCE: f64 = 0.01;

/// Spring positions indexed by `NodeIndex::index()`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spring_positions(
    g: &ChoiceGraph,
    k: f64,
    iterations: usize,
    rng: &mut LayoutRng,
) -> Vec<Point> {
    let n = g.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::default()],
        _ => {}
    }

    let mut pos: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let mut adjacency = vec![0.0_f64; n * n];
    for e in g.graph.edge_references() {
        adjacency[e.source().index() * n + e.target().index()] = 1.0;
    }

    let mut t = initial_temperature(&pos);
    let dt = t / (iterations + 1) as f64;

    for _ in 0..iterations {
        let mut disp = vec![Point::default(); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let d = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / (d * d) - adjacency[i * n + j] * d / k;
                disp[i].x += dx * force;
                disp[i].y += dy * force;
            }
        }

        let mut moved_sq = 0.0;
        for (p, d) in pos.iter_mut().zip(&disp) {
            let length = d.x.hypot(d.y).max(MIN_DISTANCE);
            let step_x = d.x * t / length;
            let step_y = d.y * t / length;
            p.x += step_x;
            p.y += step_y;
            moved_sq += step_x * step_x + step_y * step_y;
        }

        t -= dt;
        if moved_sq.sqrt() / (n as f64) < THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos
}

fn initial_temperature(pos: &[Point]) -> f64 {
    let span = |f: fn(&Point) -> f64| {
        let lo = pos.iter().map(f).fold(f64::INFINITY, f64::min);
        let hi = pos.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        hi - lo
    };
    0.1 * span(|p| p.x).max(span(|p| p.y))
}

/// Center on the origin and scale the largest |coordinate| to 1.
#[allow(clippy::cast_precision_loss)]
fn rescale(pos: &mut [Point]) {
    if pos.is_empty() {
        return;
    }
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / n;
    for p in pos.iter_mut() {
        p.x -= cx;
        p.y -= cy;
    }

    let lim = pos
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.x /= lim;
            p.y /= lim;
        }
    }
}
