//! Error types for the Graphviz backend.

use std::path::PathBuf;
use thiserror::Error;

use crate::capabilities::ValueKind;
use crate::encoding::Encoding;

/// Result type for Graphviz backend operations.
pub type GraphvizResult<T> = Result<T, GraphvizError>;

/// Errors that can occur while building or running Graphviz commands.
#[derive(Debug, Error)]
pub enum GraphvizError {
    /// Unknown engine, format, renderer or formatter token.
    #[error("unknown {kind}: {value:?}")]
    UnknownValue { kind: ValueKind, value: String },

    /// `neato_no_op` outside of the values the toolchain accepts.
    #[error("neato_no_op must be 0, 1 or 2, got {value}")]
    InvalidNeatoNoOp { value: u8 },

    /// An option was given without the option it depends on.
    #[error("required argument missing: {message}")]
    RequiredArgument { message: String },

    /// Executable not found on the search path.
    #[error("failed to execute {name:?}, make sure the Graphviz executables are on your system's PATH")]
    ExecutableNotFound { name: String },

    /// Executable lookup failed for a reason other than absence.
    #[error("failed to locate {name:?}: {source}")]
    LocateFailed {
        name: String,
        #[source]
        source: which::Error,
    },

    /// The OS refused to start the process.
    #[error("failed to launch {}: {source}", program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero status.
    #[error("{} exited with status {exit_code}: {stderr}", program.display())]
    ExecutionFailed {
        program: PathBuf,
        exit_code: i32,
        stderr: String,
    },

    /// Captured output is not valid text in the requested encoding.
    #[error("output is not valid {encoding} at byte {position}")]
    Decoding { encoding: Encoding, position: usize },

    /// Input text cannot be represented in the requested encoding.
    #[error("input cannot be encoded as {encoding} at char {position}")]
    Encoding { encoding: Encoding, position: usize },

    /// Encoding label not supported.
    #[error("unknown encoding: {label:?}")]
    UnknownEncoding { label: String },

    /// Version output did not contain a version number.
    #[error("cannot parse Graphviz version from output: {output:?}")]
    VersionParse { output: String },

    /// Explicit outfile is the same path as the input file.
    #[error("outfile {} must be different from input file", path.display())]
    OutfileIsInput { path: PathBuf },

    /// Render result exists and the caller asked not to overwrite it.
    #[error("output file exists: {}", path.display())]
    ResultExists { path: PathBuf },

    /// IO error while talking to the subprocess.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphvizError {
    /// Creates a new unknown value error.
    pub fn unknown_value(kind: ValueKind, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }

    /// Creates a new required argument error.
    pub fn required_argument(message: impl Into<String>) -> Self {
        Self::RequiredArgument {
            message: message.into(),
        }
    }

    /// Creates a new execution failed error.
    pub fn execution_failed(
        program: impl Into<PathBuf>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExecutionFailed {
            program: program.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Returns a stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            GraphvizError::UnknownValue { .. } => "GRAPHVIZ_001",
            GraphvizError::InvalidNeatoNoOp { .. } => "GRAPHVIZ_002",
            GraphvizError::RequiredArgument { .. } => "GRAPHVIZ_003",
            GraphvizError::ExecutableNotFound { .. } => "GRAPHVIZ_004",
            GraphvizError::LocateFailed { .. } => "GRAPHVIZ_005",
            GraphvizError::LaunchFailed { .. } => "GRAPHVIZ_006",
            GraphvizError::ExecutionFailed { .. } => "GRAPHVIZ_007",
            GraphvizError::Decoding { .. } => "GRAPHVIZ_008",
            GraphvizError::Encoding { .. } => "GRAPHVIZ_009",
            GraphvizError::UnknownEncoding { .. } => "GRAPHVIZ_010",
            GraphvizError::VersionParse { .. } => "GRAPHVIZ_011",
            GraphvizError::OutfileIsInput { .. } => "GRAPHVIZ_012",
            GraphvizError::ResultExists { .. } => "GRAPHVIZ_013",
            GraphvizError::Io(_) => "GRAPHVIZ_014",
        }
    }

    /// Returns the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            GraphvizError::UnknownValue { .. }
            | GraphvizError::InvalidNeatoNoOp { .. }
            | GraphvizError::RequiredArgument { .. }
            | GraphvizError::UnknownEncoding { .. }
            | GraphvizError::OutfileIsInput { .. } => "validation",
            GraphvizError::ExecutableNotFound { .. }
            | GraphvizError::LocateFailed { .. }
            | GraphvizError::LaunchFailed { .. } => "launch",
            GraphvizError::ExecutionFailed { .. } | GraphvizError::VersionParse { .. } => {
                "toolchain"
            }
            GraphvizError::Decoding { .. } | GraphvizError::Encoding { .. } => "encoding",
            GraphvizError::ResultExists { .. } | GraphvizError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphvizError::unknown_value(ValueKind::Engine, "spam");
        assert_eq!(err.to_string(), "unknown engine: \"spam\"");

        let err = GraphvizError::ExecutableNotFound {
            name: "dot".to_string(),
        };
        assert!(err.to_string().contains("\"dot\""));

        let err = GraphvizError::execution_failed("dot", 2, "syntax error in line 1");
        assert!(err.to_string().contains("status 2"));
        assert!(err.to_string().contains("syntax error in line 1"));
    }

    #[test]
    fn test_codes_and_categories() {
        let err = GraphvizError::required_argument("formatter given without renderer");
        assert_eq!(err.code(), "GRAPHVIZ_003");
        assert_eq!(err.category(), "validation");

        let err = GraphvizError::VersionParse {
            output: "garbage".to_string(),
        };
        assert_eq!(err.code(), "GRAPHVIZ_011");
        assert_eq!(err.category(), "toolchain");
    }
}
