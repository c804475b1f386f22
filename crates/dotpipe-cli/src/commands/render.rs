//! Render command implementation
//!
//! Renders a graph file with `dot`, which writes the output file itself.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use dotpipe_backend::{Graphviz, RenderRequest, FORMATS};

use super::{RenderFlags, ToolchainFlags};

/// Options for the render command besides the shared flag groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderTarget<'a> {
    /// Output file; `None` lets `dot` pick `<file>.<format>`. Its suffix
    /// selects the format when none is given.
    pub outfile: Option<&'a Path>,
    /// Fail if the output file already exists
    pub no_clobber: bool,
    /// Allow the output path to equal the input path
    pub overwrite_input: bool,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on failure. The output path is printed to stdout.
pub fn run(
    file: &Path,
    target: RenderTarget<'_>,
    flags: &RenderFlags,
    toolchain: &ToolchainFlags,
) -> Result<ExitCode> {
    let options = format_from_outfile(flags, target.outfile).options()?;

    let mut request = RenderRequest::new(file)
        .raise_if_result_exists(target.no_clobber)
        .overwrite_filepath(target.overwrite_input);
    if let Some(outfile) = target.outfile {
        request = request.outfile(outfile);
    }

    log::debug!(
        "rendering {} with -K{} -T{}",
        file.display(),
        options.engine,
        options.output_format_token()
    );

    let gv = Graphviz::with_config(toolchain.toolchain());
    let output = gv.render(&options, &request)?;

    if toolchain.quiet {
        println!("{}", output.display());
    } else {
        println!("{} {}", "rendered".green(), output.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Fills in the format from the outfile suffix when none was given and the
/// suffix names a known format.
fn format_from_outfile(flags: &RenderFlags, outfile: Option<&Path>) -> RenderFlags {
    let mut flags = flags.clone();
    if flags.format.is_none() {
        flags.format = outfile
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .filter(|ext| FORMATS.contains(ext));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outfile_suffix_selects_format() {
        let flags = format_from_outfile(&RenderFlags::default(), Some(Path::new("out.SVG")));
        assert_eq!(flags.format.as_deref(), Some("svg"));
        assert_eq!(flags.options().unwrap().format, "svg");
    }

    #[test]
    fn test_explicit_format_wins_over_suffix() {
        let flags = RenderFlags {
            format: Some("png".into()),
            ..Default::default()
        };
        let flags = format_from_outfile(&flags, Some(Path::new("out.svg")));
        assert_eq!(flags.format.as_deref(), Some("png"));
    }

    #[test]
    fn test_unknown_or_missing_suffix_keeps_default() {
        let unknown = format_from_outfile(&RenderFlags::default(), Some(Path::new("out.txt")));
        assert_eq!(unknown.format, None);
        assert_eq!(unknown.options().unwrap().format, "pdf");

        let auto = format_from_outfile(&RenderFlags::default(), None);
        assert_eq!(auto.format, None);
    }
}
