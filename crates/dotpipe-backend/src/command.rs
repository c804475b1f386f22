//! Command construction for the layout toolchain.
//!
//! The argument grammar follows `dot`'s command line:
//!
//! ```text
//! dot -K<engine> -T<format>[:<renderer>[:<formatter>]] [-n<mode>] [-y] [extra...] [-O | -o<outfile>] [<file>]
//! ```
//!
//! Without a file argument the toolchain reads the graph from stdin and
//! writes the result to stdout.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::capabilities::{validate_engine, validate_format, validate_formatter, validate_renderer};
use crate::error::{GraphvizError, GraphvizResult};

/// Delimiter between format, renderer and formatter in `-T`.
pub const FORMAT_DELIMITER: char = ':';

/// Options for a single `dot` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Layout engine.
    pub engine: String,
    /// Output format.
    pub format: String,
    /// Renderer backend.
    pub renderer: Option<String>,
    /// Formatter backend; requires a renderer.
    pub formatter: Option<String>,
    /// `neato -n` mode (0 or absent: off, 1 or 2).
    pub neato_no_op: Option<u8>,
    /// Invert y coordinates (`-y`).
    pub y_invert: bool,
    /// Extra arguments placed before the file arguments.
    pub extra_args: Vec<String>,
}

impl RenderOptions {
    /// Creates options for the given engine and format.
    pub fn new(engine: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            format: format.into(),
            renderer: None,
            formatter: None,
            neato_no_op: None,
            y_invert: false,
            extra_args: Vec::new(),
        }
    }

    /// Sets the renderer.
    pub fn renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Sets the formatter.
    pub fn formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    /// Sets `neato -n` mode.
    pub fn neato_no_op(mut self, mode: u8) -> Self {
        self.neato_no_op = Some(mode);
        self
    }

    /// Sets y inversion.
    pub fn y_invert(mut self, y_invert: bool) -> Self {
        self.y_invert = y_invert;
        self
    }

    /// Appends an extra argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Validates every field and returns the normalized options.
    pub fn validated(&self) -> GraphvizResult<Self> {
        let engine = validate_engine(&self.engine)?;
        let format = validate_format(&self.format)?;
        let renderer = self.renderer.as_deref().map(validate_renderer).transpose()?;
        let formatter = self
            .formatter
            .as_deref()
            .map(validate_formatter)
            .transpose()?;

        if formatter.is_some() && renderer.is_none() {
            return Err(GraphvizError::required_argument(
                "formatter given without renderer",
            ));
        }

        if let Some(mode) = self.neato_no_op {
            if mode > 2 {
                return Err(GraphvizError::InvalidNeatoNoOp { value: mode });
            }
        }

        Ok(Self {
            engine,
            format,
            renderer,
            formatter,
            neato_no_op: self.neato_no_op,
            y_invert: self.y_invert,
            extra_args: self.extra_args.clone(),
        })
    }

    /// The `-T` value: `format[:renderer[:formatter]]`.
    pub fn output_format_token(&self) -> String {
        output_format_token(
            &self.format,
            self.renderer.as_deref(),
            self.formatter.as_deref(),
        )
    }
}

/// Joins format, renderer and formatter with [`FORMAT_DELIMITER`].
pub fn output_format_token(
    format: &str,
    renderer: Option<&str>,
    formatter: Option<&str>,
) -> String {
    let mut token = format.to_string();
    for part in [renderer, formatter].into_iter().flatten() {
        token.push(FORMAT_DELIMITER);
        token.push_str(part);
    }
    token
}

/// Where the rendered output of a file-mode invocation goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `-O`: next to the input, named by [`auto_output_path`].
    Auto,
    /// `-o<path>`.
    Path(PathBuf),
}

/// Input/output wiring for an invocation, decided once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoMode {
    /// Graph on stdin, result on stdout.
    Pipe,
    /// Graph read from `input`, result written to `output`.
    File { input: PathBuf, output: OutputTarget },
}

/// The full argument vector of one subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    pipe_stdin: bool,
}

impl CommandSpec {
    /// Creates a command that takes no stdin.
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            pipe_stdin: false,
        }
    }

    /// Creates a command that reads its input from stdin.
    pub fn piped<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            pipe_stdin: true,
            ..Self::new(program, args)
        }
    }

    /// Path of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, if not inherited.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Returns true if input is fed through stdin.
    pub fn pipes_stdin(&self) -> bool {
        self.pipe_stdin
    }

    /// Program followed by the arguments.
    pub fn argv(&self) -> Vec<&OsStr> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Space-joined rendering for log output.
    pub fn display(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builds a [`Command`] with program, arguments and working directory set.
    ///
    /// Stdio wiring is left to the caller.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

/// Builds the `dot` invocation for `options` and `io`.
///
/// In file mode the process runs in the input file's directory with the bare
/// file name as argument; a relative outfile is resolved against the current
/// directory beforehand so it keeps pointing at the same place.
pub fn build_command(
    program: &Path,
    options: &RenderOptions,
    io: &IoMode,
) -> GraphvizResult<CommandSpec> {
    let options = options.validated()?;

    let mut args: Vec<OsString> = vec![
        format!("-K{}", options.engine).into(),
        format!("-T{}", options.output_format_token()).into(),
    ];

    if let Some(mode) = options.neato_no_op.filter(|mode| *mode > 0) {
        args.push(format!("-n{mode}").into());
    }

    if options.y_invert {
        args.push("-y".into());
    }

    args.extend(options.extra_args.iter().map(OsString::from));

    match io {
        IoMode::Pipe => Ok(CommandSpec::piped(program, args)),
        IoMode::File { input, output } => {
            match output {
                OutputTarget::Auto => args.push("-O".into()),
                OutputTarget::Path(path) => {
                    let path = absolute(path)?;
                    let mut flag = OsString::from("-o");
                    flag.push(path.as_os_str());
                    args.push(flag);
                }
            }

            let (cwd, file_arg) = split_input(input);
            args.push(file_arg);

            let mut spec = CommandSpec::new(program, args);
            spec.cwd = cwd;
            Ok(spec)
        }
    }
}

/// Path `dot -O` writes to: `input` with `.{formatter}.{renderer}.{format}` appended.
pub fn auto_output_path(
    input: &Path,
    format: &str,
    renderer: Option<&str>,
    formatter: Option<&str>,
) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    for part in [formatter, renderer, Some(format)].into_iter().flatten() {
        name.push(".");
        name.push(part);
    }
    PathBuf::from(name)
}

fn absolute(path: &Path) -> GraphvizResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn split_input(input: &Path) -> (Option<PathBuf>, OsString) {
    match (input.parent(), input.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            (Some(parent.to_path_buf()), name.to_os_string())
        }
        _ => (None, input.as_os_str().to_os_string()),
    }
}
