#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;
mod validate;

use std::env;
use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "abgrid: social network analysis of AB-Grid groups",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        OutputMode::from_json_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute metrics, layouts and sociograms for group files",
        after_help = "EXAMPLES:\n    # Print both networks of one group\n    abgrid analyze group_1.yaml\n\n    # Several groups as JSON lines, sociograms into ./out\n    abgrid analyze --json --out-dir out group_*.yaml"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ABGRID_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "abgrid=debug,abgrid_sna=debug,info"
        } else {
            "abgrid=info,abgrid_sna=info,warn"
        })
    });

    let format = env::var("ABGRID_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "arguments parsed");

    let mode = cli.output_mode();
    let summary = match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, mode)?,
    };

    info!(
        analysed = summary.analysed,
        failed = summary.failed,
        "analysis finished"
    );

    Ok(if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
