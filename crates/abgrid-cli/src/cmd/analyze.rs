//! `abgrid analyze`: metrics, layouts and sociograms for group files.
//!
//! Each file is one group and is processed on its own: a file that cannot
//! be read, fails validation or trips an engine error is reported and
//! skipped, and the remaining files are still analysed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use abgrid_sna::{GroupReport, SnaConfig, SnaError, analyze_group};
use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::input::load_group;
use crate::output::{CliError, OutputMode, render_error, write_report};
use crate::validate::ValidationError;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

/// Arguments for `abgrid analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Group YAML files to analyse.
    #[arg(required = true, value_name = "GROUP_YAML")]
    pub files: Vec<PathBuf>,

    /// TOML file with metric, layout and rendering parameters.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write sociograms as `group_<n>_a.svg` and `group_<n>_b.svg` here.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Outcome counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeSummary {
    pub analysed: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

pub fn run_analyze(args: &AnalyzeArgs, mode: OutputMode) -> anyhow::Result<AnalyzeSummary> {
    let config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summary = AnalyzeSummary::default();

    for path in &args.files {
        let source = path.display().to_string();
        match analyze_file(path, &config, args.out_dir.as_deref()) {
            Ok(report) => {
                write_report(&mut out, mode, &report)?;
                summary.analysed += 1;
            }
            Err(err) => {
                warn!(file = %source, error = %format!("{err:#}"), "group skipped");
                render_error(mode, &source, &to_cli_error(&err))?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Load the engine configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SnaConfig> {
    let Some(path) = path else {
        return Ok(SnaConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SnaConfig::from_toml_str(&text).with_context(|| format!("in config {}", path.display()))
}

fn analyze_file(
    path: &Path,
    config: &SnaConfig,
    out_dir: Option<&Path>,
) -> anyhow::Result<GroupReport> {
    let choices = load_group(path)?;
    let report = analyze_group(&choices, config)?;
    if let Some(dir) = out_dir {
        write_sociograms(dir, &report)?;
    }
    Ok(report)
}

/// Write both SVG documents of a report into `dir`.
pub fn write_sociograms(dir: &Path, report: &GroupReport) -> anyhow::Result<Vec<PathBuf>> {
    [&report.a, &report.b]
        .into_iter()
        .map(|net| {
            let path = dir.join(format!(
                "group_{}_{}.svg",
                report.group,
                net.kind.letter()
            ));
            fs::write(&path, &net.svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "sociogram written");
            Ok(path)
        })
        .collect()
}

fn to_cli_error(err: &anyhow::Error) -> CliError {
    if let Some(validation) = err.downcast_ref::<ValidationError>() {
        return validation.to_cli_error();
    }
    if let Some(sna) = err.downcast_ref::<SnaError>() {
        return CliError::from(sna);
    }
    CliError::new(format!("{err:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use abgrid_sna::{GroupChoices, PackedRow};

    fn report() -> GroupReport {
        let choices = GroupChoices {
            group: 4,
            choices_a: vec![
                PackedRow::new("A", "B"),
                PackedRow::new("B", "C"),
                PackedRow::new("C", "A"),
            ],
            choices_b: vec![
                PackedRow::new("A", "C"),
                PackedRow::new("B", "A"),
                PackedRow::new("C", "B"),
            ],
        };
        analyze_group(&choices, &SnaConfig::default()).expect("valid group")
    }

    #[test]
    fn sociograms_are_named_by_group_and_network() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = write_sociograms(dir.path(), &report()).expect("write");
        assert_eq!(
            written,
            vec![
                dir.path().join("group_4_a.svg"),
                dir.path().join("group_4_b.svg"),
            ]
        );
        let svg = fs::read_to_string(&written[0]).expect("read");
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).expect("defaults"), SnaConfig::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("abgrid.toml");
        fs::write(&path, "[layout]\nseed = 9\n").expect("write");
        let config = load_config(Some(&path)).expect("parse");
        assert_eq!(config.layout.seed, 9);
    }

    #[test]
    fn engine_errors_keep_their_code() {
        let err = anyhow::Error::new(SnaError::PageRankNotConverged { iterations: 5 });
        assert_eq!(to_cli_error(&err).error_code.as_deref(), Some("E2002"));
    }

    #[test]
    fn other_errors_keep_their_context() {
        let err = anyhow::anyhow!("disk full").context("failed to write x.svg");
        let cli = to_cli_error(&err);
        assert_eq!(cli.message, "failed to write x.svg: disk full");
        assert!(cli.error_code.is_none());
    }
}
