//! End-to-end `unflatten` tests against a fake `unflatten`.

#![cfg(unix)]

use pretty_assertions::assert_eq;

use dotpipe_backend::{Encoding, GraphvizError, UnflattenOptions};
use dotpipe_tests::fixtures::{FakeToolchain, SIMPLE_GRAPH};

#[test]
fn unflatten_passes_options_and_source() {
    let fx = FakeToolchain::new();
    let options = UnflattenOptions::new().stagger(3).fanout(true).chain(4);

    let out = fx
        .graphviz()
        .unflatten(SIMPLE_GRAPH, &options, Encoding::Utf8)
        .unwrap();
    assert_eq!(out, format!("// unflatten -l 3 -f -c 4\n{SIMPLE_GRAPH}"));
}

#[test]
fn unflatten_without_options() {
    let fx = FakeToolchain::new();
    let out = fx
        .graphviz()
        .unflatten(SIMPLE_GRAPH, &UnflattenOptions::new(), Encoding::Utf8)
        .unwrap();
    assert_eq!(out, format!("// unflatten \n{SIMPLE_GRAPH}"));
}

#[test]
fn unflatten_fanout_requires_stagger() {
    let fx = FakeToolchain::new();
    let err = fx
        .graphviz()
        .unflatten(SIMPLE_GRAPH, &UnflattenOptions::new().fanout(true), Encoding::Utf8)
        .unwrap_err();
    assert!(matches!(err, GraphvizError::RequiredArgument { .. }), "{err:?}");
}
