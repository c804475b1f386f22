//! Option groups shared by the rendering commands.

use anyhow::{Context, Result};
use clap::Args;
use dotpipe_backend::{RenderConfig, RenderOptions, RenderOverrides, ToolchainConfig};

/// Layout and output options for `dot`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// Layout engine (dot, neato, circo, ...)
    #[arg(short = 'K', long)]
    pub engine: Option<String>,

    /// Output format (pdf, png, svg, ...)
    #[arg(short = 'T', long)]
    pub format: Option<String>,

    /// Output renderer (cairo, gd, ...)
    #[arg(long)]
    pub renderer: Option<String>,

    /// Output formatter (cairo, core, gd, ...); requires --renderer
    #[arg(long)]
    pub formatter: Option<String>,

    /// Run neato in no-op mode 1 or 2 (-n1/-n2)
    #[arg(long, value_name = "MODE")]
    pub neato_no_op: Option<u8>,

    /// Invert y coordinates in the output (-y)
    #[arg(long)]
    pub y_invert: bool,

    /// Extra argument passed to dot verbatim (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

impl RenderFlags {
    /// Builds the stored configuration from the engine and format flags.
    pub fn config(&self) -> Result<RenderConfig> {
        let mut config = RenderConfig::new();
        if let Some(engine) = &self.engine {
            config.set_engine(engine).context("invalid --engine")?;
        }
        if let Some(format) = &self.format {
            config.set_format(format).context("invalid --format")?;
        }
        Ok(config)
    }

    /// Per-call overrides from the remaining flags.
    pub fn overrides(&self) -> RenderOverrides {
        let mut overrides = RenderOverrides::new().y_invert(self.y_invert);
        overrides.renderer = self.renderer.clone();
        overrides.formatter = self.formatter.clone();
        overrides.neato_no_op = self.neato_no_op;
        overrides.extra_args = self.extra_args.clone();
        overrides
    }

    /// Resolves the flags into validated render options.
    pub fn options(&self) -> Result<RenderOptions> {
        let options = self.config()?.effective_options(&self.overrides());
        Ok(options.validated()?)
    }
}

/// Toolchain options shared by every command that launches Graphviz.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainFlags {
    /// Do not log toolchain warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl ToolchainFlags {
    /// Environment-derived toolchain configuration with these flags applied.
    pub fn toolchain(&self) -> ToolchainConfig {
        ToolchainConfig::from_env().quiet(self.quiet)
    }
}
