//! CLI command implementations

pub mod doctor;
pub mod pipe;
pub mod render;
pub mod unflatten;
pub mod version;

mod options;
mod stdio;

pub use options::{RenderFlags, ToolchainFlags};
