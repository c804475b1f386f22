//! End-to-end piping tests against a fake `dot`.
//!
//! The fake `dot` copies stdin to stdout, so outputs can be compared with the
//! inputs byte for byte.

#![cfg(unix)]

use pretty_assertions::assert_eq;

use dotpipe_backend::{Encoding, GraphvizError, PassthroughLocator, RenderOptions};
use dotpipe_tests::fixtures::{FakeToolchain, SIMPLE_GRAPH};

fn svg() -> RenderOptions {
    RenderOptions::new("dot", "svg")
}

// ============================================================================
// Byte and text pipes
// ============================================================================

#[test]
fn pipe_returns_stdout_bytes() {
    let fx = FakeToolchain::new();
    let out = fx.graphviz().pipe(&svg(), SIMPLE_GRAPH.as_bytes()).unwrap();
    assert_eq!(out, SIMPLE_GRAPH.as_bytes());
}

#[test]
fn pipe_handles_output_larger_than_pipe_buffers() {
    let fx = FakeToolchain::new();
    let data: Vec<u8> = (0..1_048_576u32).map(|i| b'a' + (i % 26) as u8).collect();
    let out = fx.graphviz().pipe(&svg(), &data).unwrap();
    assert_eq!(out.len(), data.len());
    assert!(out == data);
}

#[test]
fn pipe_string_round_trips_non_ascii_utf8() {
    let fx = FakeToolchain::new();
    let source = "graph { \"Grüße\" -- \"日本\" }";
    let out = fx
        .graphviz()
        .pipe_string(&svg(), source, Encoding::Utf8)
        .unwrap();
    assert_eq!(out, source);
}

#[test]
fn pipe_string_latin1_round_trips() {
    let fx = FakeToolchain::new();
    let source = "graph { \"café\" }";
    let out = fx
        .graphviz()
        .pipe_string(&svg(), source, Encoding::Latin1)
        .unwrap();
    assert_eq!(out, source);
}

#[test]
fn pipe_string_ascii_rejects_unencodable_input() {
    let fx = FakeToolchain::new();
    let err = fx
        .graphviz()
        .pipe_string(&svg(), "graph { é }", Encoding::Ascii)
        .unwrap_err();
    assert!(matches!(err, GraphvizError::Encoding { position: 8, .. }), "{err:?}");
}

#[test]
fn pipe_string_reports_undecodable_output() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.garbage_dot());

    let err = gv.pipe_string(&svg(), SIMPLE_GRAPH, Encoding::Utf8).unwrap_err();
    assert!(
        matches!(
            err,
            GraphvizError::Decoding {
                encoding: Encoding::Utf8,
                position: 3
            }
        ),
        "{err:?}"
    );

    // Latin-1 decodes every byte.
    let out = gv.pipe_string(&svg(), SIMPLE_GRAPH, Encoding::Latin1).unwrap();
    assert_eq!(out, "ok \u{ff}\u{fe}");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn nonzero_exit_carries_code_and_exact_stderr() {
    let fx = FakeToolchain::new();
    let message = "Error: <stdin>: syntax error in line 1 near 'spam'\n";
    let gv = fx.graphviz_with_dot(fx.failing_dot(3, message));

    let err = gv.pipe(&svg(), b"spam").unwrap_err();
    match err {
        GraphvizError::ExecutionFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, 3);
            assert_eq!(stderr, message);
        }
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }
}

#[test]
fn missing_executable_names_the_program() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.bin_dir.join("does-not-exist"));

    let err = gv.pipe(&svg(), SIMPLE_GRAPH.as_bytes()).unwrap_err();
    match &err {
        GraphvizError::ExecutableNotFound { name } => assert!(name.contains("does-not-exist")),
        other => panic!("expected ExecutableNotFound, got {other:?}"),
    }
    assert_eq!(err.code(), "GRAPHVIZ_004");
}

#[test]
fn non_executable_dot_is_a_launch_error() {
    let fx = FakeToolchain::new();
    let dot = fx.non_executable_dot();
    let gv = fx.graphviz_with_dot(&dot);

    let err = gv.pipe(&svg(), SIMPLE_GRAPH.as_bytes()).unwrap_err();
    match &err {
        GraphvizError::LaunchFailed { program, source } => {
            assert_eq!(program, &dot);
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected LaunchFailed, got {other:?}"),
    }
    assert_eq!(err.code(), "GRAPHVIZ_006");
}

#[test]
fn os_launch_refusal_is_distinct_from_missing_and_failed() {
    let fx = FakeToolchain::new();

    // Skip lookup so the OS itself refuses to start the file.
    let gv = fx
        .graphviz_with_dot(fx.non_executable_dot())
        .with_locator(PassthroughLocator);
    let err = gv.pipe(&svg(), SIMPLE_GRAPH.as_bytes()).unwrap_err();
    assert!(matches!(err, GraphvizError::LaunchFailed { .. }), "{err:?}");
    assert_eq!(err.category(), "launch");

    let missing = fx
        .graphviz_with_dot(fx.bin_dir.join("does-not-exist"))
        .with_locator(PassthroughLocator)
        .pipe(&svg(), SIMPLE_GRAPH.as_bytes())
        .unwrap_err();
    assert!(matches!(missing, GraphvizError::ExecutableNotFound { .. }), "{missing:?}");

    let failed = fx
        .graphviz_with_dot(fx.failing_dot(1, "bad"))
        .pipe(&svg(), SIMPLE_GRAPH.as_bytes())
        .unwrap_err();
    assert!(matches!(failed, GraphvizError::ExecutionFailed { .. }), "{failed:?}");
    assert_ne!(failed.code(), err.code());
    assert_ne!(missing.code(), err.code());
}

#[test]
fn invalid_options_fail_before_lookup() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.bin_dir.join("does-not-exist"));

    let err = gv
        .pipe(&RenderOptions::new("dot", "spam"), SIMPLE_GRAPH.as_bytes())
        .unwrap_err();
    assert!(matches!(err, GraphvizError::UnknownValue { .. }), "{err:?}");
}

#[test]
fn early_exit_with_unread_input_is_not_an_error() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.early_exit_dot());

    let mut data = b"first line\n".to_vec();
    data.extend(std::iter::repeat(b'x').take(1 << 20));
    let out = gv.pipe(&svg(), &data).unwrap();
    assert_eq!(out, b"first line\n");
}

// ============================================================================
// Line streaming
// ============================================================================

#[test]
fn pipe_lines_yields_one_output_line_per_input_line() {
    let fx = FakeToolchain::new();
    let input: Vec<Vec<u8>> = (0..500).map(|i| format!("  n{i};\n").into_bytes()).collect();

    let lines = fx.graphviz().pipe_lines(&svg(), input.clone()).unwrap();
    let output: Vec<Vec<u8>> = lines.map(Result::unwrap).collect();
    assert_eq!(output, input);
}

#[test]
fn pipe_lines_string_decodes_each_line() {
    let fx = FakeToolchain::new();
    let input = vec!["graph {\n", "  a -- b\n", "}\n"];

    let lines = fx
        .graphviz()
        .pipe_lines_string(&svg(), input.clone(), Encoding::Utf8)
        .unwrap();
    let output: Vec<String> = lines.map(Result::unwrap).collect();
    assert_eq!(output, input);
}

#[test]
fn pipe_lines_reports_failure_as_last_item() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.failing_dot(2, "boom"));

    let lines = gv
        .pipe_lines(&svg(), vec![b"graph {}\n".to_vec()])
        .unwrap();
    let items: Vec<_> = lines.collect();
    let last = items.last().expect("at least one item");
    match last {
        Err(GraphvizError::ExecutionFailed {
            exit_code, stderr, ..
        }) => {
            assert_eq!(*exit_code, 2);
            assert_eq!(stderr, "boom");
        }
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }
}

#[test]
fn pipe_lines_fallible_reports_read_error_after_output() {
    let fx = FakeToolchain::new();
    let input = vec![
        Ok(b"graph {\n".to_vec()),
        Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated source")),
        Ok(b"}\n".to_vec()),
    ];

    let items: Vec<_> = fx
        .graphviz()
        .pipe_lines_fallible(&svg(), input)
        .unwrap()
        .collect();
    assert_eq!(items.len(), 2, "{items:?}");
    assert_eq!(items[0].as_ref().unwrap(), b"graph {\n");
    match &items[1] {
        Err(GraphvizError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
        other => panic!("expected the read error, got {other:?}"),
    }
}

#[test]
fn dropping_pipe_lines_early_does_not_hang() {
    let fx = FakeToolchain::new();
    // Endless input: only the early drop can end the stream.
    let input = std::iter::repeat(b"  a -- b\n".to_vec());

    let mut lines = fx.graphviz().pipe_lines(&svg(), input).unwrap();
    let first = lines.next().unwrap().unwrap();
    assert_eq!(first, b"  a -- b\n");
    drop(lines);
}

#[test]
fn pipe_lines_missing_executable_fails_upfront() {
    let fx = FakeToolchain::new();
    let gv = fx.graphviz_with_dot(fx.bin_dir.join("does-not-exist"));

    let result = gv.pipe_lines(&svg(), vec![b"graph {}\n".to_vec()]);
    assert!(matches!(
        result,
        Err(GraphvizError::ExecutableNotFound { .. })
    ));
}
