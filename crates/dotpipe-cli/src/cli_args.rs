//! CLI argument definitions for the dotpipe command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use dotpipe_backend::Encoding;
use std::path::PathBuf;

use dotpipe_cli::commands::{RenderFlags, ToolchainFlags};

/// dotpipe - Render graphs with the Graphviz toolchain
#[derive(Parser)]
#[command(name = "dotpipe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log debug output, including the exact toolchain invocations
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a graph file; dot writes the output file
    Render {
        /// Path to the graph source file
        file: PathBuf,

        /// Output file (default: <file>.<format>); without --format its
        /// suffix selects the format if it names one, otherwise pdf
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if the output file already exists
        #[arg(long)]
        no_clobber: bool,

        /// Allow the output file to replace the source file
        #[arg(long)]
        overwrite_input: bool,

        #[command(flatten)]
        render: RenderFlags,

        #[command(flatten)]
        toolchain: ToolchainFlags,
    },

    /// Pipe a graph through dot and write the rendered result
    Pipe {
        /// Path to the graph source (default: stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stream input and output line by line
        #[arg(long, conflicts_with = "encoding")]
        lines: bool,

        /// Treat input and output as text in this encoding (utf-8, ascii, latin-1)
        #[arg(long)]
        encoding: Option<Encoding>,

        #[command(flatten)]
        render: RenderFlags,

        #[command(flatten)]
        toolchain: ToolchainFlags,
    },

    /// Improve the aspect ratio of graphs with wide, shallow trees
    Unflatten {
        /// Path to the graph source (default: stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stagger the minimum length of leaf edges between 1 and N (-l)
        #[arg(short = 'l', long, value_name = "N")]
        stagger: Option<u32>,

        /// Fan out nodes with in-degree and out-degree 1 (-f, requires --stagger)
        #[arg(short, long)]
        fanout: bool,

        /// Form disconnected nodes into chains of up to N nodes (-c)
        #[arg(short, long, value_name = "N")]
        chain: Option<u32>,

        /// Text encoding of the graph source
        #[arg(long, default_value = "utf-8")]
        encoding: Encoding,

        #[command(flatten)]
        toolchain: ToolchainFlags,
    },

    /// Print the installed Graphviz version
    Version {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        toolchain: ToolchainFlags,
    },

    /// Check that the Graphviz toolchain is installed and usable
    Doctor {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        toolchain: ToolchainFlags,
    },
}
