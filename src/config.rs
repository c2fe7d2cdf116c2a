//! View configuration: canvas size, series label, and fixed bar styling.
//!
//! Set once when a view is constructed and never changed afterwards. With the
//! `config` feature a configuration can be loaded from YAML:
//!
//! ```yaml
//! width: 400
//! height: 300
//! label: Trials
//! style:
//!   fill: "rgba(151,187,205,0.5)"
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Container identifier views attach their canvas to by default.
pub const DEFAULT_CONTAINER_ID: &str = "elements";

/// CSS applied to every canvas a view creates.
pub const DEFAULT_CANVAS_STYLE: &str = "border:1px dotted";

/// Bar colors, in the CSS-like vocabulary charting engines use.
///
/// The highlight colors are for engines with pointer hover. The bundled
/// [`RasterEngine`](crate::engine::RasterEngine) and browser canvas engine
/// draw static frames and ignore them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct BarStyle {
    /// Bar interior.
    pub fill: Rgba,
    /// Bar outline.
    pub stroke: Rgba,
    /// Bar interior under the pointer (hover-capable engines only).
    pub highlight_fill: Rgba,
    /// Bar outline under the pointer (hover-capable engines only).
    pub highlight_stroke: Rgba,
    /// Outline width in pixels.
    pub stroke_width: f32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::rgba_f(151, 187, 205, 0.5),
            stroke: Rgba::rgba_f(151, 187, 205, 0.8),
            highlight_fill: Rgba::rgba_f(151, 187, 205, 0.75),
            highlight_stroke: Rgba::rgb(151, 187, 205),
            stroke_width: 1.0,
        }
    }
}

/// Engine options passed with every chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct ChartOptions {
    /// Start the value axis at zero instead of at the smallest count.
    pub scale_begins_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            scale_begins_at_zero: true,
        }
    }
}

/// Everything fixed about a view at construction time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ViewConfig {
    /// Canvas width in pixels.
    #[cfg_attr(feature = "config", serde(default = "default_width"))]
    pub width: u32,

    /// Canvas height in pixels.
    #[cfg_attr(feature = "config", serde(default = "default_height"))]
    pub height: u32,

    /// Display name of the series.
    #[cfg_attr(feature = "config", serde(default))]
    pub label: String,

    /// Identifier of the document container the canvas is appended to.
    #[cfg_attr(feature = "config", serde(default = "default_container_id"))]
    pub container_id: String,

    /// CSS applied to the canvas element.
    #[cfg_attr(feature = "config", serde(default = "default_canvas_style"))]
    pub canvas_style: String,

    /// Bar colors.
    #[cfg_attr(feature = "config", serde(default))]
    pub style: BarStyle,

    /// Engine options.
    #[cfg_attr(feature = "config", serde(default))]
    pub options: ChartOptions,
}

fn default_width() -> u32 {
    500
}
fn default_height() -> u32 {
    200
}
fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}
fn default_canvas_style() -> String {
    DEFAULT_CANVAS_STYLE.to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            label: String::new(),
            container_id: default_container_id(),
            canvas_style: default_canvas_style(),
            style: BarStyle::default(),
            options: ChartOptions::default(),
        }
    }
}

impl ViewConfig {
    /// Create a configuration with the given canvas size and series label.
    #[must_use]
    pub fn new(width: u32, height: u32, label: impl Into<String>) -> Self {
        Self {
            width,
            height,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the container identifier.
    #[must_use]
    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Set the canvas CSS.
    #[must_use]
    pub fn canvas_style(mut self, css: impl Into<String>) -> Self {
        self.canvas_style = css.into();
        self
    }

    /// Set the bar colors.
    #[must_use]
    pub fn style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the engine options.
    #[must_use]
    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the configuration can back a view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for zero dimensions, an empty container
    /// id, or a negative or non-finite stroke width.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidInput(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.container_id.is_empty() {
            return Err(Error::InvalidInput("container id must not be empty".to_string()));
        }
        if !self.style.stroke_width.is_finite() || self.style.stroke_width < 0.0 {
            return Err(Error::InvalidInput(format!(
                "stroke width {} must be finite and non-negative",
                self.style.stroke_width
            )));
        }
        Ok(())
    }
}

impl batuta_common::display::WithDimensions for ViewConfig {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(feature = "config")]
impl ViewConfig {
    /// Loads a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads a configuration, falling back to defaults when it is missing or malformed.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "using default view config");
            Self::default()
        })
    }
}
