//! dotpipe End-to-End Test Infrastructure
//!
//! This crate provides integration tests that launch real subprocesses:
//!
//! - Piping: bytes, text and line streams through `dot`
//! - Rendering: output file naming, working directory, overwrite guards
//! - Toolchain: lookup failures, exit codes, version probing, `unflatten`
//!
//! Most tests run against small shell scripts standing in for the Graphviz
//! executables (see [`fixtures::FakeToolchain`]), so they need a Unix shell
//! but not Graphviz itself.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all tests against the fake toolchain
//! cargo test -p dotpipe-tests
//!
//! # Also run tests against the installed Graphviz
//! cargo test -p dotpipe-tests -- --ignored
//! ```

#[cfg(unix)]
pub mod fixtures;

/// Returns true if a real `dot` executable is on PATH.
pub fn graphviz_available() -> bool {
    which::which(dotpipe_backend::DOT_BINARY).is_ok()
}
