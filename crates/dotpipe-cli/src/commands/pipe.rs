//! Pipe command implementation
//!
//! Feeds a graph through `dot` on stdin and writes the rendered result.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use dotpipe_backend::{Encoding, Graphviz, RenderOptions};

use super::stdio::{input_lines, open_output, read_input, write_output};
use super::{RenderFlags, ToolchainFlags};

/// How the input is handed to `dot`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipeMode {
    /// Read everything, render, write everything
    #[default]
    Bytes,
    /// Decode the input and encode the result with the given encoding
    Text(Encoding),
    /// Stream input lines in and output lines out
    Lines,
}

/// Run the pipe command
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    input: Option<&Path>,
    output: Option<&Path>,
    mode: PipeMode,
    flags: &RenderFlags,
    toolchain: &ToolchainFlags,
) -> Result<ExitCode> {
    let options = flags.options()?;
    let gv = Graphviz::with_config(toolchain.toolchain());
    pipe_graph(&gv, &options, input, output, mode)?;
    Ok(ExitCode::SUCCESS)
}

fn pipe_graph(
    gv: &Graphviz,
    options: &RenderOptions,
    input: Option<&Path>,
    output: Option<&Path>,
    mode: PipeMode,
) -> Result<()> {
    match mode {
        PipeMode::Bytes => {
            let data = read_input(input)?;
            let rendered = gv.pipe(options, &data)?;
            write_output(output, &rendered)?;
        }
        PipeMode::Text(encoding) => {
            let source = encoding
                .decode(&read_input(input)?)
                .with_context(|| format!("failed to decode input as {}", encoding))?;
            let rendered = gv.pipe_string(options, &source, encoding)?;
            write_output(output, &encoding.encode(&rendered)?)?;
        }
        PipeMode::Lines => {
            let lines = gv.pipe_lines_fallible(options, input_lines(input)?)?;
            let mut out = open_output(output)?;
            for line in lines {
                out.write_all(&line?).context("failed to write output")?;
            }
            out.flush().context("failed to flush output")?;
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use dotpipe_backend::ToolchainConfig;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// A backend whose `dot` copies stdin to stdout.
    fn echo_graphviz(dir: &Path) -> Graphviz {
        let dot = dir.join("dot");
        fs::write(&dot, "#!/bin/sh\nexec cat\n").unwrap();
        fs::set_permissions(&dot, fs::Permissions::from_mode(0o755)).unwrap();
        Graphviz::with_config(ToolchainConfig::default().dot_binary(dot).quiet(true))
    }

    fn svg() -> RenderOptions {
        RenderOptions::new("dot", "svg")
    }

    #[test]
    fn test_text_mode_uses_encoding_both_ways() {
        let tmp = tempfile::tempdir().unwrap();
        let gv = echo_graphviz(tmp.path());
        let input = tmp.path().join("latin1.gv");
        let output = tmp.path().join("out.txt");
        let source = b"graph { \"caf\xe9\" }\n";
        fs::write(&input, source).unwrap();

        pipe_graph(
            &gv,
            &svg(),
            Some(&input),
            Some(&output),
            PipeMode::Text(Encoding::Latin1),
        )
        .unwrap();
        assert_eq!(fs::read(&output).unwrap(), source);
    }

    #[test]
    fn test_text_mode_rejects_input_invalid_in_encoding() {
        let tmp = tempfile::tempdir().unwrap();
        let gv = echo_graphviz(tmp.path());
        let input = tmp.path().join("latin1.gv");
        fs::write(&input, b"graph { \"caf\xe9\" }\n").unwrap();

        let err = pipe_graph(
            &gv,
            &svg(),
            Some(&input),
            Some(&tmp.path().join("out.txt")),
            PipeMode::Text(Encoding::Ascii),
        )
        .unwrap_err();
        assert!(err.to_string().contains("ascii"), "{err:#}");
    }

    #[test]
    fn test_lines_mode_copies_input_exactly() {
        let tmp = tempfile::tempdir().unwrap();
        let gv = echo_graphviz(tmp.path());
        let input = tmp.path().join("graph.gv");
        let output = tmp.path().join("out.gv");
        fs::write(&input, "graph {\n  a -- b\n}").unwrap();

        pipe_graph(&gv, &svg(), Some(&input), Some(&output), PipeMode::Lines).unwrap();
        assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn test_lines_mode_reports_read_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let gv = echo_graphviz(tmp.path());
        let unreadable = tmp.path().join("graphs");
        fs::create_dir(&unreadable).unwrap();

        let result = pipe_graph(
            &gv,
            &svg(),
            Some(&unreadable),
            Some(&tmp.path().join("out.gv")),
            PipeMode::Lines,
        );
        assert!(result.is_err());
    }
}
