//! Peripheral placement of nodes without edges.
//!
//! Spring forces only push isolates away from everything, so they tend to
//! land among the connected nodes. They are moved outside the convex hull
//! of the connected positions instead, one per hull vertex per round:
//!
//! ```text
//! p = vertex + unit(vertex − centroid) · spacing · round + jitter
//! ```
//!
//! When the connected nodes have no proper hull (fewer than 3 non-collinear
//! points) the isolates are spread evenly on a circle around the centroid.

use std::f64::consts::TAU;

use petgraph::graph::NodeIndex;
use rand::Rng;

use crate::config::LayoutConfig;
use crate::graph::build::ChoiceGraph;
use crate::layout::{LayoutRng, Point};

/// Move every isolated node to the periphery. Returns how many were moved.
#[allow(clippy::cast_precision_loss)]
pub fn place_isolates(
    g: &ChoiceGraph,
    positions: &mut [Point],
    config: &LayoutConfig,
    rng: &mut LayoutRng,
) -> usize {
    let (isolated, connected): (Vec<NodeIndex>, Vec<NodeIndex>) =
        g.graph.node_indices().partition(|&idx| g.is_isolated(idx));

    if isolated.is_empty() {
        return 0;
    }

    let anchors: Vec<Point> = connected.iter().map(|idx| positions[idx.index()]).collect();
    let centroid = centroid(&anchors);
    let hull = convex_hull(&anchors);

    if hull.len() >= 3 {
        for (n, &node) in isolated.iter().enumerate() {
            let vertex = hull[n % hull.len()];
            let round = (n / hull.len() + 1) as f64;
            let dir = unit(centroid, vertex);
            let reach = config.isolate_spacing * round;
            positions[node.index()] = Point::new(
                vertex.x + dir.x * reach + jitter(rng, config.isolate_jitter),
                vertex.y + dir.y * reach + jitter(rng, config.isolate_jitter),
            );
        }
    } else {
        let radius = if anchors.is_empty() {
            1.0
        } else {
            anchors
                .iter()
                .map(|p| p.distance(centroid))
                .fold(0.0, f64::max)
                + config.isolate_spacing
        };
        let count = isolated.len() as f64;
        for (n, &node) in isolated.iter().enumerate() {
            let angle = TAU * n as f64 / count;
            positions[node.index()] = Point::new(
                centroid.x + radius * angle.cos() + jitter(rng, config.isolate_jitter),
                centroid.y + radius * angle.sin() + jitter(rng, config.isolate_jitter),
            );
        }
    }

    isolated.len()
}

/// Convex hull by Andrew's monotone chain, counter-clockwise, without
/// collinear points. Fewer than 3 distinct points yield them unchanged.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower = half_hull(sorted.iter().copied());
    let mut upper = half_hull(sorted.iter().rev().copied());
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn half_hull(points: impl Iterator<Item = Point>) -> Vec<Point> {
    let mut chain: Vec<Point> = Vec::new();
    for p in points {
        while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// z-component of `(a − o) × (b − o)`; positive for a left turn.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[allow(clippy::cast_precision_loss)]
fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let n = points.len() as f64;
    Point::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    )
}

fn unit(from: Point, to: Point) -> Point {
    let len = from.distance(to);
    if len > 0.0 {
        Point::new((to.x - from.x) / len, (to.y - from.y) / len)
    } else {
        Point::default()
    }
}

fn jitter(rng: &mut LayoutRng, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::PackedRow;
    use rand::SeedableRng;

    #[test]
    fn hull_of_square_with_interior_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(0.5, 0.5)));
        assert!(!hull.contains(&Point::new(0.5, 0.0)));
    }

    #[test]
    fn collinear_points_have_no_proper_hull() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert!(convex_hull(&pts).len() < 3);
    }

    fn isolate_fixture() -> ChoiceGraph {
        ChoiceGraph::from_rows(&[
            PackedRow::new("A", "B"),
            PackedRow::new("B", "C"),
            PackedRow::new("C", "A"),
            PackedRow::empty("D"),
            PackedRow::empty("E"),
            PackedRow::empty("F"),
            PackedRow::empty("G"),
        ])
    }

    #[test]
    fn isolates_land_outside_the_hull() {
        let g = isolate_fixture();
        let mut positions = vec![
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
            Point::new(0.1, 0.0),
            Point::new(0.0, 0.1),
            Point::new(-0.1, 0.0),
        ];
        let mut rng = LayoutRng::seed_from_u64(42);
        let moved = place_isolates(&g, &mut positions, &LayoutConfig::default(), &mut rng);
        assert_eq!(moved, 4);

        let centroid = Point::new(0.0, -1.0 / 3.0);
        let farthest_vertex = positions[..3]
            .iter()
            .map(|p| p.distance(centroid))
            .fold(0.0, f64::max);
        let nearest_vertex = positions[..3]
            .iter()
            .map(|p| p.distance(centroid))
            .fold(f64::INFINITY, f64::min);
        for p in &positions[3..] {
            assert!(p.distance(centroid) > nearest_vertex, "isolate at {p:?}");
            assert!(p.distance(centroid) < farthest_vertex + 1.0);
        }
        // Connected nodes are untouched.
        assert_eq!(positions[0], Point::new(-1.0, -1.0));
    }

    #[test]
    fn all_isolated_nodes_go_on_a_circle() {
        let g = ChoiceGraph::from_rows(&[
            PackedRow::empty("A"),
            PackedRow::empty("B"),
            PackedRow::empty("C"),
        ]);
        let mut positions = vec![Point::default(); 3];
        let config = LayoutConfig {
            isolate_jitter: 0.0,
            ..LayoutConfig::default()
        };
        let mut rng = LayoutRng::seed_from_u64(42);
        assert_eq!(place_isolates(&g, &mut positions, &config, &mut rng), 3);
        for p in &positions {
            assert!((p.distance(Point::default()) - 1.0).abs() < 1e-9);
        }
        assert!(positions[0].distance(positions[1]) > 1.0);
    }

    #[test]
    fn no_isolates_no_change() {
        let g = ChoiceGraph::from_rows(&[PackedRow::new("A", "B"), PackedRow::new("B", "A")]);
        let mut positions = vec![Point::new(0.3, 0.4), Point::new(-0.3, -0.4)];
        let before = positions.clone();
        let mut rng = LayoutRng::seed_from_u64(42);
        assert_eq!(
            place_isolates(&g, &mut positions, &LayoutConfig::default(), &mut rng),
            0
        );
        assert_eq!(positions, before);
    }
}
