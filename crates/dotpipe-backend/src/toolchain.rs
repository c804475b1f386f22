//! Toolchain configuration: which executables to run and how chatty they may be.

use std::path::PathBuf;

/// Default layout executable.
pub const DOT_BINARY: &str = "dot";

/// Default unflatten executable.
pub const UNFLATTEN_BINARY: &str = "unflatten";

/// Environment variable overriding the `dot` executable.
pub const DOT_BINARY_ENV: &str = "DOTPIPE_DOT_BINARY";

/// Environment variable overriding the `unflatten` executable.
pub const UNFLATTEN_BINARY_ENV: &str = "DOTPIPE_UNFLATTEN_BINARY";

/// Configuration for locating and running the Graphviz executables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Path or name of the `dot` executable.
    pub dot_binary: Option<PathBuf>,
    /// Path or name of the `unflatten` executable.
    pub unflatten_binary: Option<PathBuf>,
    /// Suppress toolchain stderr warnings on successful runs.
    pub quiet: bool,
}

impl ToolchainConfig {
    /// Creates a config with overrides taken from the environment.
    pub fn from_env() -> Self {
        Self {
            dot_binary: std::env::var_os(DOT_BINARY_ENV).map(PathBuf::from),
            unflatten_binary: std::env::var_os(UNFLATTEN_BINARY_ENV).map(PathBuf::from),
            quiet: false,
        }
    }

    /// Sets the `dot` executable.
    pub fn dot_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_binary = Some(path.into());
        self
    }

    /// Sets the `unflatten` executable.
    pub fn unflatten_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.unflatten_binary = Some(path.into());
        self
    }

    /// Sets quiet mode.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Name or path to look up for `dot`.
    pub fn dot_name(&self) -> PathBuf {
        self.dot_binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(DOT_BINARY))
    }

    /// Name or path to look up for `unflatten`.
    pub fn unflatten_name(&self) -> PathBuf {
        self.unflatten_binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(UNFLATTEN_BINARY))
    }
}
