//! Human and JSON rendering of group reports and errors.
//!
//! Reports go to stdout, errors to stderr. In JSON mode every group report
//! is a single line so a batch can be consumed as JSON Lines.

use std::io::{self, Write};

use abgrid_sna::metrics::Metric;
use abgrid_sna::{GroupReport, NetworkReport, SnaError};
use serde::Serialize;

/// Shared width for human separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<24} {}", format!("{key}:"), value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (`E1001`, `invalid_label`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

impl From<&SnaError> for CliError {
    fn from(err: &SnaError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: None,
            error_code: Some(err.code().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Write one group report in the requested mode.
pub fn write_report(w: &mut dyn Write, mode: OutputMode, report: &GroupReport) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer(&mut *w, report)?;
            writeln!(w)
        }
        OutputMode::Human => {
            write_network(w, report.group, &report.a)?;
            writeln!(w)?;
            write_network(w, report.group, &report.b)?;
            writeln!(w)?;
            write_relevant(w, report)
        }
    }
}

fn write_network(w: &mut dyn Write, group: u32, net: &NetworkReport) -> io::Result<()> {
    pretty_section(w, &format!("Group {group} · network {:?}", net.kind))?;

    let s = &net.summary;
    pretty_kv(w, "nodes", s.node_count.to_string())?;
    pretty_kv(
        w,
        "edges",
        format!("{} ({} mutual pairs)", s.edge_count, s.reciprocal_edge_count),
    )?;
    pretty_kv(w, "density", s.density.to_string())?;
    pretty_kv(w, "degree centralization", s.degree_centralization.to_string())?;
    pretty_kv(w, "transitivity", s.transitivity.to_string())?;
    pretty_kv(w, "reciprocity", s.reciprocity.to_string())?;

    let t = &net.edge_types;
    pretty_kv(
        w,
        "edge types I-V",
        format!(
            "{} / {} / {} / {} / {}",
            t.type_i.len(),
            t.type_ii.len(),
            t.type_iii.len(),
            t.type_iv.len(),
            t.type_v.len()
        ),
    )?;
    let c = &net.components;
    pretty_kv(w, "cliques", c.cliques.join(" "))?;
    pretty_kv(w, "strongly connected", c.strongly_connected.join(" "))?;
    pretty_kv(w, "weakly connected", c.weakly_connected.join(" "))?;
    writeln!(w)?;

    write!(w, "{:<6} {:<16}", "node", "links")?;
    for metric in Metric::ALL {
        write!(w, " {:>10}", metric.short_name())?;
    }
    writeln!(w)?;
    pretty_rule(w)?;
    for (label, row) in &net.nodes {
        write!(w, "{label:<6} {:<16}", row.links)?;
        for metric in Metric::ALL {
            let cell = format!("{} ({})", row.value(metric), row.rank(metric));
            write!(w, " {cell:>10}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_relevant(w: &mut dyn Write, report: &GroupReport) -> io::Result<()> {
    pretty_section(w, &format!("Group {} · relevant participants", report.group))?;
    for (kind, nodes) in &report.relevant_nodes {
        for metric in Metric::ALL {
            let labels: Vec<&str> = nodes
                .iter()
                .filter(|n| n.metric == metric)
                .map(|n| n.label.as_str())
                .collect();
            pretty_kv(
                w,
                &format!("{kind:?} {}", metric.short_name()),
                labels.join(" "),
            )?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Write an error for `source` (usually a file path).
pub fn write_error(
    w: &mut dyn Write,
    mode: OutputMode,
    source: &str,
    error: &CliError,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "file": source,
                "error": error,
            });
            serde_json::to_writer(&mut *w, &wrapper)?;
            writeln!(w)
        }
        OutputMode::Human => {
            write!(w, "error: {source}: {}", error.message)?;
            if let Some(code) = &error.error_code {
                write!(w, " [{code}]")?;
            }
            writeln!(w)?;
            if let Some(suggestion) = &error.suggestion {
                writeln!(w, "  suggestion: {suggestion}")?;
            }
            Ok(())
        }
    }
}

/// Render an error to stderr.
pub fn render_error(mode: OutputMode, source: &str, error: &CliError) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, source, error)
}
