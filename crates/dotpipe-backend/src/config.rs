//! Engine/format/renderer/formatter configuration held by a graph document.
//!
//! [`RenderConfig`] only stores the fields that were explicitly set. Unset
//! fields report the defaults ([`DEFAULT_ENGINE`], [`DEFAULT_FORMAT`], or no
//! renderer/formatter) and are left out of [`RenderConfig::settings`], so a
//! copy keeps the difference between "default" and "set to the default value".

use serde::{Deserialize, Serialize};

use crate::capabilities::{validate_engine, validate_format, validate_formatter, validate_renderer};
use crate::command::RenderOptions;
use crate::error::{GraphvizError, GraphvizResult};

/// Engine used when none was set.
pub const DEFAULT_ENGINE: &str = "dot";

/// Format used when none was set.
pub const DEFAULT_FORMAT: &str = "pdf";

/// Explicitly set configuration fields, usable as constructor arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

impl RenderSettings {
    /// Sets the engine.
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the renderer.
    pub fn renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Sets the formatter.
    pub fn formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }
}

/// Validated rendering configuration with copy support.
///
/// Not synchronized: share an unmutated instance for concurrent reads, or wrap
/// it in a lock for concurrent mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RenderSettings", into = "RenderSettings")]
pub struct RenderConfig {
    settings: RenderSettings,
}

impl RenderConfig {
    /// Creates a configuration with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from explicit settings, validating each one.
    pub fn with_settings(settings: RenderSettings) -> GraphvizResult<Self> {
        let mut config = Self::new();
        if let Some(engine) = settings.engine {
            config.set_engine(&engine)?;
        }
        if let Some(format) = settings.format {
            config.set_format(&format)?;
        }
        config.set_renderer(settings.renderer.as_deref())?;
        config.set_formatter(settings.formatter.as_deref())?;
        Ok(config)
    }

    /// The layout engine (`dot`, `neato`, ...).
    pub fn engine(&self) -> &str {
        self.settings.engine.as_deref().unwrap_or(DEFAULT_ENGINE)
    }

    /// Validates and stores the layout engine.
    pub fn set_engine(&mut self, engine: &str) -> GraphvizResult<()> {
        self.settings.engine = Some(validate_engine(engine)?);
        Ok(())
    }

    /// The output format (`pdf`, `png`, ...).
    pub fn format(&self) -> &str {
        self.settings.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    /// Validates and stores the output format.
    pub fn set_format(&mut self, format: &str) -> GraphvizResult<()> {
        self.settings.format = Some(validate_format(format)?);
        Ok(())
    }

    /// The output renderer (`cairo`, `gd`, ...), if set.
    pub fn renderer(&self) -> Option<&str> {
        self.settings.renderer.as_deref()
    }

    /// Validates and stores the renderer. `None` removes it.
    pub fn set_renderer(&mut self, renderer: Option<&str>) -> GraphvizResult<()> {
        self.settings.renderer = renderer.map(validate_renderer).transpose()?;
        Ok(())
    }

    /// The output formatter (`cairo`, `gd`, ...), if set.
    pub fn formatter(&self) -> Option<&str> {
        self.settings.formatter.as_deref()
    }

    /// Validates and stores the formatter. `None` removes it.
    pub fn set_formatter(&mut self, formatter: Option<&str>) -> GraphvizResult<()> {
        self.settings.formatter = formatter.map(validate_formatter).transpose()?;
        Ok(())
    }

    /// The explicitly set fields. Defaults are omitted.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Returns a new configuration built from this one's explicit fields.
    pub fn copy(&self) -> Self {
        Self {
            settings: self.settings.clone(),
        }
    }

    /// Resolves per-call overrides against the stored configuration.
    ///
    /// Absent overrides fall back to the stored value, so a single call can
    /// change the format without touching this configuration.
    pub fn effective_options(&self, overrides: &RenderOverrides) -> RenderOptions {
        let mut options = RenderOptions::new(
            self.engine(),
            overrides.format.as_deref().unwrap_or(self.format()),
        );
        options.renderer = overrides
            .renderer
            .clone()
            .or_else(|| self.settings.renderer.clone());
        options.formatter = overrides
            .formatter
            .clone()
            .or_else(|| self.settings.formatter.clone());
        options.neato_no_op = overrides.neato_no_op;
        options.y_invert = overrides.y_invert;
        options.extra_args = overrides.extra_args.clone();
        options
    }
}

impl TryFrom<RenderSettings> for RenderConfig {
    type Error = GraphvizError;

    fn try_from(settings: RenderSettings) -> Result<Self, Self::Error> {
        Self::with_settings(settings)
    }
}

impl From<RenderConfig> for RenderSettings {
    fn from(config: RenderConfig) -> Self {
        config.settings
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        config.effective_options(&RenderOverrides::default())
    }
}

/// Per-call overrides applied on top of a [`RenderConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOverrides {
    pub format: Option<String>,
    pub renderer: Option<String>,
    pub formatter: Option<String>,
    pub neato_no_op: Option<u8>,
    pub y_invert: bool,
    pub extra_args: Vec<String>,
}

impl RenderOverrides {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Overrides the renderer.
    pub fn renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Overrides the formatter.
    pub fn formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    /// Sets `neato -n` mode.
    pub fn neato_no_op(mut self, mode: u8) -> Self {
        self.neato_no_op = Some(mode);
        self
    }

    /// Inverts y coordinates in the output.
    pub fn y_invert(mut self, y_invert: bool) -> Self {
        self.y_invert = y_invert;
        self
    }

    /// Appends an extra command-line argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}
