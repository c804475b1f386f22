//! dotpipe CLI library.
//!
//! This crate provides the command implementations behind the `dotpipe`
//! binary: rendering files, piping graphs through `dot`, running `unflatten`
//! and inspecting the installed Graphviz toolchain.

pub mod commands;
pub mod logging;
