//! Doctor command implementation
//!
//! Checks that the Graphviz toolchain can be found and run.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use dotpipe_backend::{Graphviz, GraphvizResult, ENGINES, FORMATS, FORMATTERS, RENDERERS};

use super::ToolchainFlags;

/// Outcome of a single toolchain check.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CheckStatus {
    Found { path: PathBuf },
    Missing { code: &'static str, message: String },
}

impl CheckStatus {
    fn from_lookup(lookup: GraphvizResult<PathBuf>) -> Self {
        match lookup {
            Ok(path) => CheckStatus::Found { path },
            Err(e) => CheckStatus::Missing {
                code: e.code(),
                message: e.to_string(),
            },
        }
    }

    fn is_found(&self) -> bool {
        matches!(self, CheckStatus::Found { .. })
    }
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    ok: bool,
    dot: CheckStatus,
    unflatten: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    graphviz_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_error: Option<String>,
    engines: usize,
    formats: usize,
    renderers: usize,
    formatters: usize,
}

fn collect(gv: &Graphviz) -> DoctorReport {
    let dot = CheckStatus::from_lookup(gv.locate_dot());
    let unflatten = CheckStatus::from_lookup(gv.locate_unflatten());

    let (graphviz_version, version_error) = if dot.is_found() {
        match gv.version() {
            Ok(version) => (Some(version.to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        }
    } else {
        (None, None)
    };

    DoctorReport {
        ok: dot.is_found() && version_error.is_none(),
        dot,
        unflatten,
        graphviz_version,
        version_error,
        engines: ENGINES.len(),
        formats: FORMATS.len(),
        renderers: RENDERERS.len(),
        formatters: FORMATTERS.len(),
    }
}

/// Run the doctor command
///
/// Checks:
/// - `dot` on PATH (or the configured override)
/// - `dot -V` output parses
/// - `unflatten` on PATH (optional)
///
/// # Returns
/// Exit code: 0 if `dot` is usable, 1 otherwise
pub fn run(json: bool, toolchain: &ToolchainFlags) -> Result<ExitCode> {
    let gv = Graphviz::with_config(toolchain.toolchain());
    let report = collect(&gv);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_report(report: &DoctorReport) {
    println!("{}", "dotpipe Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!("  {} dotpipe v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    match (&report.graphviz_version, &report.version_error) {
        (Some(version), _) => println!("  {} graphviz {}", "->".green(), version),
        (None, Some(e)) => println!("  {} graphviz version unknown: {}", "!!".red(), e),
        (None, None) => println!("  {} graphviz (not found)", "->".yellow()),
    }
    println!();

    println!("{}", "Toolchain:".bold());
    match &report.dot {
        CheckStatus::Found { path } => {
            println!("  {} dot ({})", "ok".green(), path.display());
        }
        CheckStatus::Missing { message, .. } => {
            println!("  {} {}", "!!".red(), message);
            println!(
                "     {}",
                "Install Graphviz from https://graphviz.org/download/".dimmed()
            );
        }
    }
    match &report.unflatten {
        CheckStatus::Found { path } => {
            println!("  {} unflatten ({})", "ok".green(), path.display());
        }
        CheckStatus::Missing { message, .. } => {
            // Only needed for the unflatten command
            println!("  {} {}", "!!".yellow(), message);
        }
    }
    println!();

    println!("{}", "Capabilities:".bold());
    println!(
        "  {} {} engines, {} formats, {} renderers, {} formatters",
        "->".green(),
        report.engines,
        report.formats,
        report.renderers,
        report.formatters
    );
    println!();

    if report.ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "FAILURE".red().bold()
        );
    }
}
