//! Unflatten command implementation

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

use dotpipe_backend::{Encoding, Graphviz, UnflattenOptions};

use super::stdio::{read_input, write_output};
use super::ToolchainFlags;

/// Run the unflatten command
///
/// Reads the graph from `input` (or stdin), pipes it through `unflatten` and
/// writes the transformed graph to `output` (or stdout).
pub fn run(
    input: Option<&Path>,
    output: Option<&Path>,
    options: UnflattenOptions,
    encoding: Encoding,
    toolchain: &ToolchainFlags,
) -> Result<ExitCode> {
    options.validate()?;

    let data = read_input(input)?;
    let source = encoding
        .decode(&data)
        .with_context(|| format!("failed to decode input as {}", encoding))?;

    let gv = Graphviz::with_config(toolchain.toolchain());
    let result = gv.unflatten(&source, &options, encoding)?;

    write_output(output, &encoding.encode(&result)?)?;
    Ok(ExitCode::SUCCESS)
}
