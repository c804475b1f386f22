//! Registries of engines, formats, renderers and formatters known to Graphviz.
//!
//! All tokens are stored lowercase. Lookups lowercase their input first, so
//! `"PNG"` and `"png"` both validate to `"png"`.

use std::fmt;

use crate::error::{GraphvizError, GraphvizResult};

/// Immutable set of lowercase tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    kind: ValueKind,
    tokens: &'static [&'static str],
}

impl CapabilitySet {
    /// The kind of value this set validates.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns true if `token` (already lowercase) is a member.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token)
    }

    /// Iterates over the members in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        self.tokens.iter().copied()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lowercases `value` and checks membership.
    ///
    /// Returns the normalized token, or [`GraphvizError::UnknownValue`] naming
    /// the offending value and this set's kind.
    pub fn validate(&self, value: &str) -> GraphvizResult<String> {
        let normalized = value.to_lowercase();
        if self.contains(&normalized) {
            Ok(normalized)
        } else {
            Err(GraphvizError::unknown_value(self.kind, normalized))
        }
    }
}

/// Category of a validated value, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Engine,
    Format,
    Renderer,
    Formatter,
}

impl ValueKind {
    /// Returns the string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Engine => "engine",
            ValueKind::Format => "format",
            ValueKind::Renderer => "renderer",
            ValueKind::Formatter => "formatter",
        }
    }

    /// Returns the registry for this kind.
    pub fn set(&self) -> CapabilitySet {
        match self {
            ValueKind::Engine => ENGINES,
            ValueKind::Format => FORMATS,
            ValueKind::Renderer => RENDERERS,
            ValueKind::Formatter => FORMATTERS,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout engines (`-K`).
pub const ENGINES: CapabilitySet = CapabilitySet {
    kind: ValueKind::Engine,
    tokens: &[
        "dot",
        "neato",
        "twopi",
        "circo",
        "fdp",
        "sfdp",
        "patchwork",
        "osage",
    ],
};

/// Output formats (`-T<format>`).
pub const FORMATS: CapabilitySet = CapabilitySet {
    kind: ValueKind::Format,
    tokens: &[
        "bmp",
        "canon",
        "dot",
        "gv",
        "xdot",
        "xdot1.2",
        "xdot1.4",
        "cgimage",
        "cmap",
        "eps",
        "exr",
        "fig",
        "gd",
        "gd2",
        "gif",
        "gtk",
        "ico",
        "imap",
        "cmapx",
        "imap_np",
        "cmapx_np",
        "ismap",
        "jp2",
        "jpg",
        "jpeg",
        "jpe",
        "json",
        "json0",
        "dot_json",
        "xdot_json",
        "pct",
        "pict",
        "pdf",
        "pic",
        "plain",
        "plain-ext",
        "png",
        "pov",
        "ps",
        "ps2",
        "psd",
        "sgi",
        "svg",
        "svgz",
        "tga",
        "tif",
        "tiff",
        "tk",
        "vml",
        "vmlz",
        "vrml",
        "wbmp",
        "webp",
        "xlib",
        "x11",
    ],
};

/// Renderer backends (`-T<format>:<renderer>`).
pub const RENDERERS: CapabilitySet = CapabilitySet {
    kind: ValueKind::Renderer,
    tokens: &[
        "cairo", "dot", "fig", "gd", "gdiplus", "map", "pic", "pov", "ps", "svg", "tk", "vml",
        "vrml", "xdot",
    ],
};

/// Formatter backends (`-T<format>:<renderer>:<formatter>`).
pub const FORMATTERS: CapabilitySet = CapabilitySet {
    kind: ValueKind::Formatter,
    tokens: &["cairo", "core", "gd", "gdiplus", "gdwbmp", "xlib"],
};

/// Validates a layout engine name.
pub fn validate_engine(engine: &str) -> GraphvizResult<String> {
    ENGINES.validate(engine)
}

/// Validates an output format name.
pub fn validate_format(format: &str) -> GraphvizResult<String> {
    FORMATS.validate(format)
}

/// Validates a renderer name.
pub fn validate_renderer(renderer: &str) -> GraphvizResult<String> {
    RENDERERS.validate(renderer)
}

/// Validates a formatter name.
pub fn validate_formatter(formatter: &str) -> GraphvizResult<String> {
    FORMATTERS.validate(formatter)
}
