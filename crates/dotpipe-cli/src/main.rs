//! dotpipe CLI - Command-line interface for the Graphviz toolchain
//!
//! This binary renders graph files, pipes graph sources through `dot` and
//! `unflatten`, and checks the installed toolchain.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use dotpipe_backend::UnflattenOptions;
use dotpipe_cli::commands::{self, pipe::PipeMode, render::RenderTarget};
use dotpipe_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = match &cli.command {
        Commands::Render { toolchain, .. }
        | Commands::Pipe { toolchain, .. }
        | Commands::Unflatten { toolchain, .. }
        | Commands::Version { toolchain, .. }
        | Commands::Doctor { toolchain, .. } => toolchain.quiet,
    };
    logging::init(logging::level_for(cli.verbose, quiet));

    let result = match cli.command {
        Commands::Render {
            file,
            output,
            no_clobber,
            overwrite_input,
            render,
            toolchain,
        } => commands::render::run(
            &file,
            RenderTarget {
                outfile: output.as_deref(),
                no_clobber,
                overwrite_input,
            },
            &render,
            &toolchain,
        ),
        Commands::Pipe {
            input,
            output,
            lines,
            encoding,
            render,
            toolchain,
        } => {
            let mode = match (lines, encoding) {
                (true, _) => PipeMode::Lines,
                (false, Some(encoding)) => PipeMode::Text(encoding),
                (false, None) => PipeMode::Bytes,
            };
            commands::pipe::run(
                input.as_deref(),
                output.as_deref(),
                mode,
                &render,
                &toolchain,
            )
        }
        Commands::Unflatten {
            input,
            output,
            stagger,
            fanout,
            chain,
            encoding,
            toolchain,
        } => commands::unflatten::run(
            input.as_deref(),
            output.as_deref(),
            UnflattenOptions {
                stagger,
                fanout,
                chain,
            },
            encoding,
            &toolchain,
        ),
        Commands::Version { json, toolchain } => commands::version::run(json, &toolchain),
        Commands::Doctor { json, toolchain } => commands::doctor::run(json, &toolchain),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "dotpipe", "render", "graph.gv", "-o", "out.svg", "-K", "neato", "-T", "svg",
            "--renderer", "cairo", "--no-clobber",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                file,
                output,
                no_clobber,
                overwrite_input,
                render,
                toolchain,
            } => {
                assert_eq!(file, PathBuf::from("graph.gv"));
                assert_eq!(output, Some(PathBuf::from("out.svg")));
                assert!(no_clobber);
                assert!(!overwrite_input);
                assert_eq!(render.engine.as_deref(), Some("neato"));
                assert_eq!(render.format.as_deref(), Some("svg"));
                assert_eq!(render.renderer.as_deref(), Some("cairo"));
                assert!(!toolchain.quiet);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_extra_args_with_hyphens() {
        let cli = Cli::try_parse_from([
            "dotpipe", "pipe", "--arg", "-Gdpi=300", "--arg", "-Nshape=box",
        ])
        .unwrap();
        match cli.command {
            Commands::Pipe { input, render, .. } => {
                assert_eq!(input, None);
                assert_eq!(render.extra_args, vec!["-Gdpi=300", "-Nshape=box"]);
            }
            _ => panic!("expected pipe command"),
        }
    }

    #[test]
    fn test_cli_parses_pipe_encoding() {
        let cli = Cli::try_parse_from(["dotpipe", "pipe", "--encoding", "latin-1"]).unwrap();
        match cli.command {
            Commands::Pipe { encoding, lines, .. } => {
                assert_eq!(encoding, Some(dotpipe_backend::Encoding::Latin1));
                assert!(!lines);
            }
            _ => panic!("expected pipe command"),
        }
    }

    #[test]
    fn test_cli_rejects_lines_with_encoding() {
        let result = Cli::try_parse_from(["dotpipe", "pipe", "--lines", "--encoding", "ascii"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_encoding() {
        let result = Cli::try_parse_from(["dotpipe", "unflatten", "--encoding", "ebcdic"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_unflatten() {
        let cli =
            Cli::try_parse_from(["dotpipe", "unflatten", "-l", "3", "-f", "-c", "4"]).unwrap();
        match cli.command {
            Commands::Unflatten {
                stagger,
                fanout,
                chain,
                encoding,
                ..
            } => {
                assert_eq!(stagger, Some(3));
                assert!(fanout);
                assert_eq!(chain, Some(4));
                assert_eq!(encoding, dotpipe_backend::Encoding::Utf8);
            }
            _ => panic!("expected unflatten command"),
        }
    }

    #[test]
    fn test_cli_parses_doctor_json_with_global_verbose() {
        let cli = Cli::try_parse_from(["dotpipe", "doctor", "--json", "--verbose"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Doctor { json, toolchain } => {
                assert!(json);
                assert!(!toolchain.quiet);
            }
            _ => panic!("expected doctor command"),
        }
    }

    #[test]
    fn test_cli_parses_version_quiet() {
        let cli = Cli::try_parse_from(["dotpipe", "version", "-q"]).unwrap();
        match cli.command {
            Commands::Version { json, toolchain } => {
                assert!(!json);
                assert!(toolchain.quiet);
            }
            _ => panic!("expected version command"),
        }
    }
}
