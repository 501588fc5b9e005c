#![forbid(unsafe_code)]
//! abgrid-sna library.
//!
//! Social network analysis for AB-Grid groups: every group answers two
//! preference questions, producing a "choice" network A and a "choice"
//! network B over the same participants. This crate turns the packed choice
//! lists into directed graphs and computes per-node centralities, network
//! level statistics, a seeded force-directed layout and an embeddable SVG
//! sociogram for each network.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return `Result<T, SnaError>`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Precision**: Every float handed to callers is rounded to
//!   [`SnaConfig::precision`] decimal places (3 by default).
//!
//! # Typical Usage
//!
//! ```rust,ignore
//! use abgrid_sna::{analyze_group, GroupChoices, PackedRow, SnaConfig};
//!
//! let group = GroupChoices {
//!     group: 1,
//!     choices_a: vec![PackedRow::new("A", "B,C"), PackedRow::new("B", "A"), PackedRow::new("C", "A")],
//!     choices_b: vec![PackedRow::new("A", "C"), PackedRow::new("B", "C"), PackedRow::new("C", "B")],
//! };
//!
//! let report = analyze_group(&group, &SnaConfig::default())?;
//! println!("{}", report.a.summary.reciprocity);
//! ```

pub mod adjacency;
pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod render;

pub use adjacency::{Edge, PackedRow};
pub use analysis::{GroupChoices, GroupReport, NetworkReport, analyze_group, analyze_network};
pub use config::SnaConfig;
pub use error::{ErrorKind, SnaError};
pub use graph::{ChoiceGraph, NetworkKind};
