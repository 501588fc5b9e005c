//! Sociogram rendering to SVG.
//!
//! # Overview
//!
//! Rendering is a pure function of the graph, its layout and an explicit
//! [`RenderConfig`]; there is no shared drawing context.
//!
//! - **Mutual** choices (`u ↔ v`) are drawn once as thick solid lines.
//! - **Non-mutual** choices are thin dashed lines ending in an arrowhead at
//!   the edge of the chosen node.
//! - Nodes are filled discs in the network color; isolates are drawn in
//!   [`RenderConfig::isolate_color`]. Labels are centered on the nodes.
//!
//! The canvas is a fixed square with a transparent background, independent
//! of the node count. [`to_data_uri`] wraps the document as a base64
//! `data:` URI for embedding.
//!
//! Overlapping nodes are never an error: they are logged and drawn anyway.

use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::config::RenderConfig;
use crate::error::SnaError;
use crate::graph::{ChoiceGraph, NetworkKind};
use crate::layout::{Layout, Point};

/// Distance in pixels below which two node centers count as coincident.
const COINCIDENT_PX: f64 = 0.5;

// ---------------------------------------------------------------------------
// Edge classification
// ---------------------------------------------------------------------------

/// Edges split by reciprocity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EdgeClasses {
    /// One entry per reciprocated pair, `(u, v)` with `u < v`.
    pub mutual: Vec<(String, String)>,
    /// Directed edges whose reverse is absent.
    pub non_mutual: Vec<(String, String)>,
}

/// Split the edges of `g` into mutual pairs and one-way choices.
#[must_use]
pub fn classify_edges(g: &ChoiceGraph) -> EdgeClasses {
    let mut classes = EdgeClasses::default();
    for (u, v) in g.edges() {
        if g.contains_edge(v, u) {
            if u < v {
                classes.mutual.push((u.to_string(), v.to_string()));
            }
        } else {
            classes.non_mutual.push((u.to_string(), v.to_string()));
        }
    }
    classes.mutual.sort_unstable();
    classes.non_mutual.sort_unstable();
    classes
}

// ---------------------------------------------------------------------------
// SVG
// ---------------------------------------------------------------------------

/// Maps layout coordinates onto the canvas, y axis pointing up.
struct Viewport {
    origin: Point,
    scale: f64,
    offset: Point,
    size: f64,
}

impl Viewport {
    fn fit(layout: &Layout, config: &RenderConfig) -> Self {
        let size = config.canvas_size;
        let inner = (size - 2.0 * config.margin).max(0.0);
        let Some((lo, hi)) = layout.bounds() else {
            return Self {
                origin: Point::default(),
                scale: 0.0,
                offset: Point::new(size / 2.0, size / 2.0),
                size,
            };
        };

        let span = (hi.x - lo.x).max(hi.y - lo.y);
        let scale = if span > 0.0 { inner / span } else { 0.0 };
        // Center the drawing along the shorter axis.
        let offset = Point::new(
            (size - (hi.x - lo.x) * scale) / 2.0,
            (size - (hi.y - lo.y) * scale) / 2.0,
        );
        Self {
            origin: lo,
            scale,
            offset,
            size,
        }
    }

    fn project(&self, p: Point) -> Point {
        Point::new(
            self.offset.x + (p.x - self.origin.x) * self.scale,
            self.size - (self.offset.y + (p.y - self.origin.y) * self.scale),
        )
    }
}

/// Render the sociogram of one network as an SVG document.
///
/// # Errors
///
/// Returns [`SnaError::Render`] if writing the document fails.
#[instrument(skip(g, layout, config), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn render_svg(
    g: &ChoiceGraph,
    layout: &Layout,
    kind: NetworkKind,
    config: &RenderConfig,
) -> Result<String, SnaError> {
    let viewport = Viewport::fit(layout, config);
    let color = escape_xml(config.color_for(kind));
    let marker_id = format!("arrow-{}", kind.letter());
    let size = config.canvas_size;

    let pixel = |label: &str| layout.get(label).map(|p| viewport.project(p));

    warn_coincident(layout, &viewport);

    let mut svg = String::new();
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.0} {size:.0}">
  <defs>
    <marker id="{marker_id}" markerWidth="{a:.1}" markerHeight="{a:.1}" refX="{a:.1}" refY="{h:.1}" orient="auto" markerUnits="userSpaceOnUse">
      <path d="M0,0 L{a:.1},{h:.1} L0,{a:.1} z" fill="{color}" />
    </marker>
  </defs>
"#,
        a = config.arrow_size,
        h = config.arrow_size / 2.0,
    )?;

    let classes = classify_edges(g);

    svg.push_str("  <g class=\"mutual\">\n");
    for (u, v) in &classes.mutual {
        let (Some(a), Some(b)) = (pixel(u), pixel(v)) else {
            continue;
        };
        writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}" stroke-width="{:.1}" />"#,
            a.x, a.y, b.x, b.y, config.mutual_width
        )?;
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"non-mutual\">\n");
    for (u, v) in &classes.non_mutual {
        let (Some(a), Some(b)) = (pixel(u), pixel(v)) else {
            continue;
        };
        let tip = arrow_tip(a, b, config.node_radius);
        writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}" stroke-width="{:.1}" stroke-dasharray="6 4" marker-end="url(#{marker_id})" />"#,
            a.x, a.y, tip.x, tip.y, config.non_mutual_width
        )?;
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"nodes\">\n");
    for idx in g.graph.node_indices() {
        let label = g.label(idx);
        let Some(p) = pixel(label) else {
            continue;
        };
        let fill = if g.is_isolated(idx) {
            escape_xml(&config.isolate_color)
        } else {
            color.clone()
        };
        writeln!(
            svg,
            r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{fill}" />"#,
            p.x, p.y, config.node_radius
        )?;
        writeln!(
            svg,
            r#"    <text x="{:.1}" y="{:.1}" fill="{}" font-family="Times New Roman, serif" font-size="{:.1}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            p.x,
            p.y,
            escape_xml(&config.label_color),
            config.font_size,
            escape_xml(label)
        )?;
    }
    svg.push_str("  </g>\n</svg>\n");

    Ok(svg)
}

/// End point of a one-way edge: the rim of the target node, pulled in to
/// the midpoint when the two discs overlap, the target centre when the
/// nodes coincide.
fn arrow_tip(from: Point, to: Point, radius: f64) -> Point {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let dist = dx.hypot(dy);
    if dist <= f64::EPSILON {
        return to;
    }
    let back = radius.min(dist / 2.0);
    Point::new((dx / dist).mul_add(-back, to.x), (dy / dist).mul_add(-back, to.y))
}

/// Wrap an SVG document as a self-contained `data:` URI.
#[must_use]
pub fn to_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        BASE64_STANDARD.encode(svg.as_bytes())
    )
}

fn warn_coincident(layout: &Layout, viewport: &Viewport) {
    let points: Vec<(&str, Point)> = layout
        .iter()
        .map(|(label, p)| (label, viewport.project(p)))
        .collect();
    let mut overlapping = 0_usize;
    for (i, (a, pa)) in points.iter().enumerate() {
        for (b, pb) in &points[i + 1..] {
            if pa.distance(*pb) < COINCIDENT_PX {
                overlapping += 1;
                warn!(a, b, "coincident nodes in sociogram");
            }
        }
    }
    if overlapping > 0 {
        warn!(pairs = overlapping, "sociogram drawn with overlapping nodes");
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
