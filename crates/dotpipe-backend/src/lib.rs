//! dotpipe Graphviz Backend
//!
//! This crate drives the Graphviz command-line toolchain as a subprocess. It
//! builds `dot` invocations, feeds graph descriptions through stdin or a file,
//! collects the rendered output and turns toolchain failures into typed errors.
//!
//! # Overview
//!
//! The backend supports four rendering shapes:
//!
//! - **render** - Render an existing file; the toolchain writes the output file
//! - **pipe** - Pipe bytes in, get rendered bytes back
//! - **pipe_string** - Pipe text in, get decoded text back
//! - **pipe_lines** - Stream input lines in, pull output lines back lazily
//!
//! plus [`unflatten`](Graphviz::unflatten) preprocessing and
//! [`version`](Graphviz::version) probing.
//!
//! # Architecture
//!
//! 1. **Validation** - Engines, formats, renderers and formatters are checked
//!    against the [`capabilities`] registries before anything is launched
//! 2. **Command construction** - [`command::build_command`] produces the exact
//!    argument vector (`-K<engine> -T<format>[:<renderer>[:<formatter>]] ...`)
//! 3. **Lookup** - An [`ExecutableLocator`] resolves `dot`/`unflatten` on `PATH`
//! 4. **Execution** - A [`ProcessRunner`] launches the process, wires stdin and
//!    stdout, and reaps it on every exit path
//!
//! Locator and runner are injected into [`Graphviz`], so either can be
//! replaced in tests.
//!
//! # Example
//!
//! ```ignore
//! use dotpipe_backend::{Encoding, Graphviz, RenderConfig, RenderOverrides};
//!
//! let gv = Graphviz::new();
//! let mut config = RenderConfig::new();
//! config.set_engine("neato")?;
//!
//! let options = config.effective_options(&RenderOverrides::new().format("svg"));
//! let svg = gv.pipe_string(&options, "graph { a -- b }", Encoding::Utf8)?;
//! println!("{}", svg);
//! ```
//!
//! # Toolchain Requirements
//!
//! Graphviz must be installed. Executables are looked up in:
//!
//! 1. [`ToolchainConfig`] overrides
//! 2. `DOTPIPE_DOT_BINARY` / `DOTPIPE_UNFLATTEN_BINARY` (via [`ToolchainConfig::from_env`])
//! 3. System PATH
//!
//! # Crate Structure
//!
//! - [`capabilities`] - Engine/format/renderer/formatter registries
//! - [`config`] - Render configuration with copy support
//! - [`command`] - Command construction
//! - [`locator`] - Executable lookup
//! - [`runner`] - Subprocess execution
//! - [`rendering`] - Public rendering operations
//! - [`unflatten`] - `unflatten` pipeline
//! - [`version`] - Version probing
//! - [`encoding`] - Text encodings
//! - [`toolchain`] - Toolchain configuration
//! - [`error`] - Error types

pub mod capabilities;
pub mod command;
pub mod config;
pub mod encoding;
pub mod error;
pub mod locator;
pub mod rendering;
pub mod runner;
pub mod toolchain;
pub mod unflatten;
pub mod version;

// Re-export main types at crate root
pub use capabilities::{CapabilitySet, ValueKind, ENGINES, FORMATS, FORMATTERS, RENDERERS};
pub use command::{CommandSpec, IoMode, OutputTarget, RenderOptions};
pub use config::{RenderConfig, RenderOverrides, RenderSettings, DEFAULT_ENGINE, DEFAULT_FORMAT};
pub use encoding::Encoding;
pub use error::{GraphvizError, GraphvizResult};
pub use locator::{ExecutableLocator, PassthroughLocator, SearchPathLocator};
pub use rendering::{Graphviz, RenderRequest};
pub use runner::{CaptureMode, ExecutionResult, OutputLines, ProcessRunner, SystemRunner};
pub use toolchain::{ToolchainConfig, DOT_BINARY, UNFLATTEN_BINARY};
pub use unflatten::UnflattenOptions;
pub use version::VersionInfo;
