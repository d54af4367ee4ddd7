//! Configuration types for Lineage chart rendering.
//!
//! This module provides configuration structures that control how family trees
//! are laid out and styled. All types implement [`serde::Deserialize`] so they
//! can be loaded from TOML files; every field is optional and falls back to the
//! defaults below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing, root anchor and recentering.
//! - [`StyleConfig`] - Node footprint, padding, fonts and colors.
//!
//! # Example
//!
//! ```
//! # use lineage::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().spacing().unwrap().x(), 180.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use lineage_core::{
    color::Color,
    geometry::{Insets, Point, Size},
};

use crate::layout::{LayoutError, Spacing};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing and anchoring of the tidy tree layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal slot reserved for every leaf.
    spacing_x: f32,

    /// Vertical distance between generations.
    spacing_y: f32,

    /// Anchor of the root node.
    root_x: f32,
    root_y: f32,

    /// Center the whole tree's bounding box on `root_x` after layout.
    recenter: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_x: 180.0,
            spacing_y: 160.0,
            root_x: 0.0,
            root_y: 80.0,
            recenter: false,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration with the given spacing and root anchor.
    pub fn new(spacing_x: f32, spacing_y: f32, root: Point) -> Self {
        Self {
            spacing_x,
            spacing_y,
            root_x: root.x(),
            root_y: root.y(),
            recenter: false,
        }
    }

    /// Enables or disables whole-tree recentering.
    pub fn with_recenter(mut self, recenter: bool) -> Self {
        self.recenter = recenter;
        self
    }

    /// Returns the validated [`Spacing`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpacing`] for non-positive spacing.
    pub fn spacing(&self) -> Result<Spacing, LayoutError> {
        Spacing::new(self.spacing_x, self.spacing_y)
    }

    /// Returns the anchor of the root node.
    pub fn anchor(&self) -> Point {
        Point::new(self.root_x, self.root_y)
    }

    pub fn recenter(&self) -> bool {
        self.recenter
    }
}

/// Visual styling configuration for rendered charts.
///
/// Colors are CSS color strings; unset colors fall back to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Width of a single node's box.
    node_width: f32,

    /// Height of a single node's box.
    node_height: f32,

    /// Corner radius of node boxes.
    corner_radius: f32,

    /// Space between the outermost nodes and the image border.
    padding: f32,

    font_family: String,
    font_size: f32,

    background_color: Option<String>,
    node_color: Option<String>,
    line_color: Option<String>,
    text_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_width: 100.0,
            node_height: 80.0,
            corner_radius: 8.0,
            padding: 35.0,
            font_family: "Arial".to_string(),
            font_size: 14.0,
            background_color: None,
            node_color: None,
            line_color: None,
            text_color: None,
        }
    }
}

impl StyleConfig {
    /// Returns the fixed size drawn for every node.
    pub fn footprint(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Returns the padding added around the chart's bounding box.
    pub fn padding(&self) -> Insets {
        Insets::uniform(self.padding)
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background", self.background_color.as_deref())
    }

    /// Returns the node fill color, white by default.
    pub fn node_color(&self) -> Result<Color, String> {
        parse_color("node", self.node_color.as_deref())
            .map(|color| color.unwrap_or_else(|| named("white")))
    }

    /// Returns the color of node borders and edges, dark gray by default.
    pub fn line_color(&self) -> Result<Color, String> {
        parse_color("line", self.line_color.as_deref())
            .map(|color| color.unwrap_or_else(|| named("dimgray")))
    }

    /// Returns the label color, black by default.
    pub fn text_color(&self) -> Result<Color, String> {
        parse_color("text", self.text_color.as_deref())
            .map(Option::unwrap_or_default)
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}

fn named(name: &str) -> Color {
    Color::new(name).unwrap_or_default()
}
