//! Property-based validation tests for dotpipe using proptest.
//!
//! These tests verify that option validation, format tokens and version
//! parsing never panic and always return correct results for arbitrary inputs.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dotpipe-tests --test proptest_validation
//! ```

use proptest::prelude::*;

use dotpipe_backend::command::{auto_output_path, output_format_token};
use dotpipe_backend::version::parse_version;
use dotpipe_backend::{CapabilitySet, GraphvizError, ENGINES, FORMATS, FORMATTERS, RENDERERS};
use std::path::Path;

// ============================================================================
// 1. Capability Validation
// ============================================================================

fn token_of(set: CapabilitySet) -> impl Strategy<Value = &'static str> {
    prop::sample::select(set.iter().collect::<Vec<&'static str>>())
}

/// Randomizes the case of each character.
fn recase(token: &str, mask: &[bool]) -> String {
    token
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    /// Every registered engine validates regardless of case.
    #[test]
    fn engines_validate_case_insensitively(
        token in token_of(ENGINES),
        mask in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let value = recase(token, &mask);
        prop_assert_eq!(ENGINES.validate(&value).unwrap(), token);
    }

    /// Every registered format validates regardless of case.
    #[test]
    fn formats_validate_case_insensitively(
        token in token_of(FORMATS),
        mask in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let value = recase(token, &mask);
        prop_assert_eq!(FORMATS.validate(&value).unwrap(), token);
    }

    /// Uppercased input validates exactly when its lowercase form is registered.
    #[test]
    fn uppercase_validates_iff_lowercase_registered(s in "[a-zA-Z0-9_:-]{0,12}") {
        for set in [ENGINES, FORMATS, RENDERERS, FORMATTERS] {
            prop_assert_eq!(
                set.validate(&s.to_uppercase()).is_ok(),
                set.contains(&s.to_lowercase())
            );
        }
    }

    /// Arbitrary strings never panic, and accepted values are registered.
    #[test]
    fn validation_never_panics(s in "\\PC{0,20}") {
        for set in [ENGINES, FORMATS, RENDERERS, FORMATTERS] {
            match set.validate(&s) {
                Ok(token) => prop_assert!(set.contains(&token)),
                Err(GraphvizError::UnknownValue { kind, .. }) => prop_assert_eq!(kind, set.kind()),
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }
    }
}

// ============================================================================
// 2. Output Format Tokens and Auto Names
// ============================================================================

proptest! {
    /// The `-T` token splits back into format, renderer and formatter.
    #[test]
    fn format_token_splits_into_parts(
        format in token_of(FORMATS),
        renderer in token_of(RENDERERS),
        formatter in token_of(FORMATTERS)
    ) {
        let token = output_format_token(format, Some(renderer), Some(formatter));
        let parts: Vec<&str> = token.split(':').collect();
        prop_assert_eq!(parts, vec![format, renderer, formatter]);
    }

    /// Auto output names append the parts in reverse order.
    #[test]
    fn auto_output_path_appends_reversed_parts(
        stem in "[a-z]{1,10}",
        format in token_of(FORMATS),
        renderer in token_of(RENDERERS)
    ) {
        let input = Path::new("/tmp").join(format!("{stem}.gv"));
        let output = auto_output_path(&input, format, Some(renderer), None);
        prop_assert_eq!(
            output,
            Path::new("/tmp").join(format!("{stem}.gv.{renderer}.{format}"))
        );
    }
}

// ============================================================================
// 3. Version Parsing
// ============================================================================

proptest! {
    /// Versions with two to four components parse to those components.
    #[test]
    fn version_components_parse(parts in prop::collection::vec(0u32..1000, 2..=4)) {
        let dotted = parts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let output = format!("dot - graphviz version {dotted} (20240101.0000)\n");
        let version = parse_version(&output).unwrap();
        prop_assert_eq!(version.parts(), parts.as_slice());
    }

    /// Arbitrary text never panics the parser.
    #[test]
    fn version_parse_never_panics(s in "\\PC{0,80}") {
        let _ = parse_version(&s);
    }
}
