//! Toolchain version probing.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::command::CommandSpec;
use crate::error::{GraphvizError, GraphvizResult};
use crate::locator::ExecutableLocator;
use crate::runner::{CaptureMode, ProcessRunner};

/// Flag that makes `dot` print its version.
pub const VERSION_FLAG: &str = "-V";

/// Version reported by the toolchain, e.g. `2.43.0`.
///
/// Holds between two and four numeric components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionInfo(Vec<u32>);

impl VersionInfo {
    /// The numeric components in order.
    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// The first component.
    pub fn major(&self) -> u32 {
        self.0[0]
    }

    /// The second component.
    pub fn minor(&self) -> u32 {
        self.0[1]
    }

    /// The third component, if reported.
    pub fn patch(&self) -> Option<u32> {
        self.0.get(2).copied()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"graphviz version (\d+\.\d+(?:\.\d+){0,2})").expect("valid version regex")
    })
}

/// Extracts the version from `dot -V` output such as
/// `dot - graphviz version 2.43.0 (0)`.
pub fn parse_version(output: &str) -> GraphvizResult<VersionInfo> {
    let parse_error = || GraphvizError::VersionParse {
        output: output.to_string(),
    };

    let captures = version_pattern().captures(output).ok_or_else(parse_error)?;
    let parts = captures[1]
        .split('.')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| parse_error())?;

    Ok(VersionInfo(parts))
}

/// Runs `<binary> -V` and parses the reported version.
///
/// Every call starts a new process; callers wanting a single authoritative
/// version should probe once and keep the result.
pub fn probe(
    locator: &dyn ExecutableLocator,
    runner: &dyn ProcessRunner,
    binary: &Path,
) -> GraphvizResult<VersionInfo> {
    let program = locator.locate(binary)?;
    let spec = CommandSpec::new(program, [VERSION_FLAG]);
    let result = runner.run(&spec, None, CaptureMode::Combined)?;
    parse_version(&String::from_utf8_lossy(&result.stdout))
}
