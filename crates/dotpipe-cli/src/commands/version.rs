//! Version command implementation

use anyhow::Result;
use serde::Serialize;
use std::process::ExitCode;

use dotpipe_backend::{Graphviz, VersionInfo};

use super::ToolchainFlags;

/// JSON report for `dotpipe version --json`.
#[derive(Debug, Serialize)]
struct VersionReport<'a> {
    dotpipe: &'static str,
    graphviz: &'a VersionInfo,
}

/// Run the version command
///
/// Prints the installed Graphviz version, as text or JSON.
pub fn run(json: bool, toolchain: &ToolchainFlags) -> Result<ExitCode> {
    let gv = Graphviz::with_config(toolchain.toolchain());
    let version = gv.version()?;

    if json {
        let report = VersionReport {
            dotpipe: env!("CARGO_PKG_VERSION"),
            graphviz: &version,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("graphviz {}", version);
    }
    Ok(ExitCode::SUCCESS)
}
