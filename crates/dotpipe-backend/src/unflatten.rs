//! `unflatten`: improves the aspect ratio of graphs with wide, shallow trees.

use std::ffi::OsString;
use std::path::Path;

use crate::command::CommandSpec;
use crate::encoding::Encoding;
use crate::error::{GraphvizError, GraphvizResult};
use crate::locator::ExecutableLocator;
use crate::runner::{CaptureMode, ProcessRunner};

/// Options for an `unflatten` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnflattenOptions {
    /// Stagger the minimum length of leaf edges between 1 and this (`-l`).
    pub stagger: Option<u32>,
    /// Fan out nodes with in-degree and out-degree 1 (`-f`). Requires `stagger`.
    pub fanout: bool,
    /// Form disconnected nodes into chains of up to this many nodes (`-c`).
    pub chain: Option<u32>,
}

impl UnflattenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stagger(mut self, stagger: u32) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn fanout(mut self, fanout: bool) -> Self {
        self.fanout = fanout;
        self
    }

    pub fn chain(mut self, chain: u32) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Checks option combinations.
    pub fn validate(&self) -> GraphvizResult<()> {
        if self.fanout && self.stagger.is_none() {
            return Err(GraphvizError::required_argument("fanout given without stagger"));
        }
        Ok(())
    }
}

/// Builds the `unflatten` invocation. The graph is read from stdin.
pub fn build_unflatten_command(
    program: &Path,
    options: &UnflattenOptions,
) -> GraphvizResult<CommandSpec> {
    options.validate()?;

    let mut args: Vec<OsString> = Vec::new();
    if let Some(stagger) = options.stagger {
        args.push("-l".into());
        args.push(stagger.to_string().into());
    }
    if options.fanout {
        args.push("-f".into());
    }
    if let Some(chain) = options.chain {
        args.push("-c".into());
        args.push(chain.to_string().into());
    }

    Ok(CommandSpec::piped(program, args))
}

/// Pipes `source` through `unflatten` and returns the transformed graph.
pub fn unflatten(
    locator: &dyn ExecutableLocator,
    runner: &dyn ProcessRunner,
    binary: &Path,
    source: &str,
    options: &UnflattenOptions,
    encoding: Encoding,
) -> GraphvizResult<String> {
    options.validate()?;
    let program = locator.locate(binary)?;
    let spec = build_unflatten_command(&program, options)?;

    let input = encoding.encode(source)?;
    let result = runner.run(&spec, Some(&input), CaptureMode::Output)?;
    encoding.decode(&result.stdout)
}
