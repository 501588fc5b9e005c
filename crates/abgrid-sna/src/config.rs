//! Tunable parameters for metrics, layout and rendering.
//!
//! Every field has a default so a partial TOML document (or none at all)
//! yields a usable configuration:
//!
//! ```toml
//! precision = 3
//! relevance_threshold = 0.05
//!
//! [pagerank]
//! max_iter = 1000
//!
//! [layout]
//! seed = 42
//! k_a = 0.5
//! k_b = 0.3
//!
//! [render]
//! color_a = "#0000FF"
//! color_b = "#FF0000"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SnaError;
use crate::graph::NetworkKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnaConfig {
    /// Decimal places kept in every float output.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Rank quantile below which a node counts as relevant.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for SnaConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            relevance_threshold: default_relevance_threshold(),
            pagerank: PageRankConfig::default(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SnaConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SnaError::Config`] if the document is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, SnaError> {
        Ok(toml::from_str(text)?)
    }
}

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Per-node convergence tolerance; iteration stops once the L1 norm of
    /// the rank delta drops below `node_count * tolerance`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of power iterations before giving up.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

/// Configuration for the spring layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Optimal edge length for network A.
    #[serde(default = "default_k_a")]
    pub k_a: f64,
    /// Optimal edge length for network B.
    #[serde(default = "default_k_b")]
    pub k_b: f64,
    /// Distance added per placement round for isolated nodes.
    #[serde(default = "default_isolate_spacing")]
    pub isolate_spacing: f64,
    /// Half-width of the random offset applied to isolated nodes.
    #[serde(default = "default_isolate_jitter")]
    pub isolate_jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            iterations: default_iterations(),
            k_a: default_k_a(),
            k_b: default_k_b(),
            isolate_spacing: default_isolate_spacing(),
            isolate_jitter: default_isolate_jitter(),
        }
    }
}

impl LayoutConfig {
    /// Spring constant used for the given network.
    #[must_use]
    pub const fn k_for(&self, kind: NetworkKind) -> f64 {
        match kind {
            NetworkKind::A => self.k_a,
            NetworkKind::B => self.k_b,
        }
    }
}

/// Explicit drawing parameters for one sociogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Width and height of the square canvas, in pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_node_radius")]
    pub node_radius: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_color_a")]
    pub color_a: String,
    #[serde(default = "default_color_b")]
    pub color_b: String,
    #[serde(default = "default_isolate_color")]
    pub isolate_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_mutual_width")]
    pub mutual_width: f64,
    #[serde(default = "default_non_mutual_width")]
    pub non_mutual_width: f64,
    #[serde(default = "default_arrow_size")]
    pub arrow_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            margin: default_margin(),
            node_radius: default_node_radius(),
            font_size: default_font_size(),
            color_a: default_color_a(),
            color_b: default_color_b(),
            isolate_color: default_isolate_color(),
            label_color: default_label_color(),
            mutual_width: default_mutual_width(),
            non_mutual_width: default_non_mutual_width(),
            arrow_size: default_arrow_size(),
        }
    }
}

impl RenderConfig {
    /// Node and edge color for the given network.
    #[must_use]
    pub fn color_for(&self, kind: NetworkKind) -> &str {
        match kind {
            NetworkKind::A => &self.color_a,
            NetworkKind::B => &self.color_b,
        }
    }
}

const fn default_precision() -> u32 {
    3
}

const fn default_relevance_threshold() -> f64 {
    0.05
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    1000
}

const fn default_seed() -> u64 {
    42
}

const fn default_iterations() -> usize {
    50
}

const fn default_k_a() -> f64 {
    0.5
}

const fn default_k_b() -> f64 {
    0.3
}

const fn default_isolate_spacing() -> f64 {
    0.15
}

const fn default_isolate_jitter() -> f64 {
    0.05
}

const fn default_canvas_size() -> f64 {
    340.0
}

const fn default_margin() -> f64 {
    24.0
}

const fn default_node_radius() -> f64 {
    11.0
}

const fn default_font_size() -> f64 {
    14.0
}

fn default_color_a() -> String {
    "#0000FF".to_string()
}

fn default_color_b() -> String {
    "#FF0000".to_string()
}

fn default_isolate_color() -> String {
    "#000000".to_string()
}

fn default_label_color() -> String {
    "#FFFFFF".to_string()
}

const fn default_mutual_width() -> f64 {
    3.0
}

const fn default_non_mutual_width() -> f64 {
    1.0
}

const fn default_arrow_size() -> f64 {
    8.0
}
