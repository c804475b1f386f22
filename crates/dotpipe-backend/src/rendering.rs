//! Public rendering operations.
//!
//! [`Graphviz`] composes command building, executable lookup and process
//! execution into the render-to-file and in-memory piping operations. The
//! locator and runner are injected, so tests can substitute either one.

use std::io;
use std::path::{Path, PathBuf};

use crate::command::{
    auto_output_path, build_command, CommandSpec, IoMode, OutputTarget, RenderOptions,
};
use crate::config::{RenderConfig, RenderOverrides};
use crate::encoding::Encoding;
use crate::error::{GraphvizError, GraphvizResult};
use crate::locator::{ExecutableLocator, SearchPathLocator};
use crate::runner::{CaptureMode, InputLines, OutputLines, ProcessRunner, SystemRunner};
use crate::toolchain::ToolchainConfig;
use crate::unflatten::{self, UnflattenOptions};
use crate::version::{self, VersionInfo};

/// A render-to-file request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Existing graph description file. Never deleted.
    pub filepath: PathBuf,
    /// Explicit output path; `None` writes next to `filepath`.
    pub outfile: Option<PathBuf>,
    /// Fail if the output file already exists.
    pub raise_if_result_exists: bool,
    /// Allow `outfile` to be the input file.
    pub overwrite_filepath: bool,
}

impl RenderRequest {
    /// Creates a request that renders `filepath` next to itself.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            outfile: None,
            raise_if_result_exists: false,
            overwrite_filepath: false,
        }
    }

    /// Sets an explicit output path.
    pub fn outfile(mut self, outfile: impl Into<PathBuf>) -> Self {
        self.outfile = Some(outfile.into());
        self
    }

    /// Fails instead of overwriting an existing result.
    pub fn raise_if_result_exists(mut self, raise: bool) -> Self {
        self.raise_if_result_exists = raise;
        self
    }

    /// Allows overwriting the input file with the result.
    pub fn overwrite_filepath(mut self, overwrite: bool) -> Self {
        self.overwrite_filepath = overwrite;
        self
    }
}

/// Entry point for running the Graphviz toolchain.
pub struct Graphviz {
    toolchain: ToolchainConfig,
    locator: Box<dyn ExecutableLocator>,
    runner: Box<dyn ProcessRunner>,
}

impl Graphviz {
    /// Creates a facade with the default toolchain configuration.
    pub fn new() -> Self {
        Self::with_config(ToolchainConfig::default())
    }

    /// Creates a facade with the given toolchain configuration.
    pub fn with_config(toolchain: ToolchainConfig) -> Self {
        let runner = SystemRunner::new().quiet(toolchain.quiet);
        Self {
            toolchain,
            locator: Box::new(SearchPathLocator),
            runner: Box::new(runner),
        }
    }

    /// Replaces the executable locator.
    pub fn with_locator(mut self, locator: impl ExecutableLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Replaces the process runner.
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// The toolchain configuration.
    pub fn config(&self) -> &ToolchainConfig {
        &self.toolchain
    }

    /// Resolves the `dot` executable.
    pub fn locate_dot(&self) -> GraphvizResult<PathBuf> {
        self.locator.locate(&self.toolchain.dot_name())
    }

    /// Resolves the `unflatten` executable.
    pub fn locate_unflatten(&self) -> GraphvizResult<PathBuf> {
        self.locator.locate(&self.toolchain.unflatten_name())
    }

    /// Renders an existing file and returns the path of the result.
    pub fn render(
        &self,
        options: &RenderOptions,
        request: &RenderRequest,
    ) -> GraphvizResult<PathBuf> {
        let options = options.validated()?;

        let (output, target) = match &request.outfile {
            Some(outfile) => {
                if !request.overwrite_filepath && same_file(outfile, &request.filepath) {
                    return Err(GraphvizError::OutfileIsInput {
                        path: outfile.clone(),
                    });
                }
                (outfile.clone(), OutputTarget::Path(outfile.clone()))
            }
            None => (
                auto_output_path(
                    &request.filepath,
                    &options.format,
                    options.renderer.as_deref(),
                    options.formatter.as_deref(),
                ),
                OutputTarget::Auto,
            ),
        };

        if request.raise_if_result_exists && output.exists() {
            return Err(GraphvizError::ResultExists { path: output });
        }

        let io_mode = IoMode::File {
            input: request.filepath.clone(),
            output: target,
        };
        let spec = self.dot_command(&options, &io_mode)?;
        self.runner.run(&spec, None, CaptureMode::StderrOnly)?;
        Ok(output)
    }

    /// Pipes `data` through `dot` and returns the rendered bytes.
    pub fn pipe(&self, options: &RenderOptions, data: &[u8]) -> GraphvizResult<Vec<u8>> {
        let spec = self.dot_command(options, &IoMode::Pipe)?;
        let result = self.runner.run(&spec, Some(data), CaptureMode::Output)?;
        Ok(result.stdout)
    }

    /// Pipes `source` through `dot` and decodes the result with `encoding`.
    pub fn pipe_string(
        &self,
        options: &RenderOptions,
        source: &str,
        encoding: Encoding,
    ) -> GraphvizResult<String> {
        let spec = self.dot_command(options, &IoMode::Pipe)?;
        let input = encoding.encode(source)?;
        let result = self.runner.run(&spec, Some(&input), CaptureMode::Output)?;
        encoding.decode(&result.stdout)
    }

    /// Streams `input_lines` into `dot` and returns its output line by line.
    ///
    /// The returned sequence is lazy and single-pass. A non-zero exit is
    /// reported as its last item.
    pub fn pipe_lines<I>(
        &self,
        options: &RenderOptions,
        input_lines: I,
    ) -> GraphvizResult<OutputLines>
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
        I::IntoIter: Send + 'static,
    {
        let input: InputLines = Box::new(
            input_lines
                .into_iter()
                .map(|line| Ok::<Vec<u8>, io::Error>(line.into())),
        );
        self.stream(options, input)
    }

    /// Variant of [`Graphviz::pipe_lines`] for input that can fail while it
    /// is read.
    ///
    /// An `Err` unit closes stdin and is reported as the last output item,
    /// after whatever `dot` produced from the input before it.
    pub fn pipe_lines_fallible<I>(
        &self,
        options: &RenderOptions,
        input_lines: I,
    ) -> GraphvizResult<OutputLines>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
        I::IntoIter: Send + 'static,
    {
        self.stream(options, Box::new(input_lines.into_iter()))
    }

    /// Text variant of [`Graphviz::pipe_lines`].
    pub fn pipe_lines_string<I>(
        &self,
        options: &RenderOptions,
        input_lines: I,
        encoding: Encoding,
    ) -> GraphvizResult<impl Iterator<Item = GraphvizResult<String>> + Send>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        I::IntoIter: Send + 'static,
    {
        let input: InputLines = Box::new(input_lines.into_iter().map(move |line| {
            encoding
                .encode(line.as_ref())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }));
        let lines = self.stream(options, input)?;
        Ok(lines.map(move |line| line.and_then(|bytes| encoding.decode(&bytes))))
    }

    /// Pipes `source` through `unflatten`.
    pub fn unflatten(
        &self,
        source: &str,
        options: &UnflattenOptions,
        encoding: Encoding,
    ) -> GraphvizResult<String> {
        unflatten::unflatten(
            self.locator.as_ref(),
            self.runner.as_ref(),
            &self.toolchain.unflatten_name(),
            source,
            options,
            encoding,
        )
    }

    /// Probes the installed `dot` version. Starts a new process on every call.
    pub fn version(&self) -> GraphvizResult<VersionInfo> {
        version::probe(
            self.locator.as_ref(),
            self.runner.as_ref(),
            &self.toolchain.dot_name(),
        )
    }

    /// Renders `request` with `config` and per-call `overrides`.
    pub fn render_with(
        &self,
        config: &RenderConfig,
        overrides: &RenderOverrides,
        request: &RenderRequest,
    ) -> GraphvizResult<PathBuf> {
        self.render(&config.effective_options(overrides), request)
    }

    /// Pipes `data` with `config` and per-call `overrides`.
    pub fn pipe_with(
        &self,
        config: &RenderConfig,
        overrides: &RenderOverrides,
        data: &[u8],
    ) -> GraphvizResult<Vec<u8>> {
        self.pipe(&config.effective_options(overrides), data)
    }

    /// Pipes `source` as text with `config` and per-call `overrides`.
    pub fn pipe_string_with(
        &self,
        config: &RenderConfig,
        overrides: &RenderOverrides,
        source: &str,
        encoding: Encoding,
    ) -> GraphvizResult<String> {
        self.pipe_string(&config.effective_options(overrides), source, encoding)
    }

    /// Streams `input_lines` with `config` and per-call `overrides`.
    pub fn pipe_lines_with<I>(
        &self,
        config: &RenderConfig,
        overrides: &RenderOverrides,
        input_lines: I,
    ) -> GraphvizResult<OutputLines>
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
        I::IntoIter: Send + 'static,
    {
        self.pipe_lines(&config.effective_options(overrides), input_lines)
    }

    /// Streams text lines with `config` and per-call `overrides`.
    pub fn pipe_lines_string_with<I>(
        &self,
        config: &RenderConfig,
        overrides: &RenderOverrides,
        input_lines: I,
        encoding: Encoding,
    ) -> GraphvizResult<impl Iterator<Item = GraphvizResult<String>> + Send>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        I::IntoIter: Send + 'static,
    {
        self.pipe_lines_string(&config.effective_options(overrides), input_lines, encoding)
    }

    fn stream(&self, options: &RenderOptions, input: InputLines) -> GraphvizResult<OutputLines> {
        let spec = self.dot_command(options, &IoMode::Pipe)?;
        self.runner.run_streaming(&spec, input)
    }

    /// Validates before locating, so option errors never depend on the
    /// toolchain being installed.
    fn dot_command(&self, options: &RenderOptions, io: &IoMode) -> GraphvizResult<CommandSpec> {
        let options = options.validated()?;
        let program = self.locate_dot()?;
        build_command(&program, &options, io)
    }
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
