//! Lineage - tidy family-tree charts.
//!
//! Reading, layout and rendering of genealogical trees. A tree is described in
//! a small TOML document, laid out with a tidy top-down algorithm and exported
//! as SVG.

pub mod config;
pub mod export;
pub mod layout;
pub mod source;

mod error;

pub use lineage_core::{color, geometry, identifier, tree};

pub use error::LineageError;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::PositionedNode;
use tree::FamilyTree;

/// Builder for parsing, laying out and rendering family trees.
///
/// # Examples
///
/// ```rust
/// use lineage::{ChartBuilder, config::AppConfig};
///
/// let source = r#"
///     [root]
///     name = "Ada"
///
///     [[root.children]]
///     name = "Byron"
/// "#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
///
/// let tree = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&tree).expect("Failed to render");
/// assert!(svg.contains("Byron"));
///
/// // Or use the default config
/// let builder = ChartBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a tree document.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Parse`] carrying the source text for malformed
    /// documents, empty names or repeated ids.
    pub fn parse(&self, source: &str) -> Result<FamilyTree, LineageError> {
        info!("Parsing tree document");

        let tree =
            source::parse(source).map_err(|err| LineageError::new_parse_error(err, source))?;

        debug!(people = tree.len(); "Tree parsed successfully");
        trace!(tree:?; "Parsed tree");

        Ok(tree)
    }

    /// Lay out `tree` with the configured spacing and root anchor.
    ///
    /// Returns `None` for an empty tree. When recentering is enabled the
    /// result is shifted so that its bounding box is centered on the anchor.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Layout`] if the configured spacing is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lineage::ChartBuilder;
    ///
    /// let builder = ChartBuilder::default();
    /// let tree = builder
    ///     .parse("root = { name = \"Root\", children = [{ name = \"A\" }, { name = \"B\" }] }")
    ///     .unwrap();
    ///
    /// let root = builder.layout(&tree).unwrap().unwrap();
    /// assert_eq!(root.children()[0].x(), -135.0);
    /// assert_eq!(root.children()[1].x(), 135.0);
    /// assert_eq!(root.width(), 450.0);
    /// ```
    pub fn layout(&self, tree: &FamilyTree) -> Result<Option<PositionedNode>, LineageError> {
        let layout_config = self.config.layout();
        let spacing = layout_config.spacing()?;
        let anchor = layout_config.anchor();

        let Some(root) = tree.root() else {
            debug!("Tree is empty, nothing to lay out");
            return Ok(None);
        };

        let mut positioned = layout::layout(root, anchor, spacing);
        if layout_config.recenter() {
            positioned = layout::recenter(&positioned, self.config.style().footprint(), anchor.x());
        }

        info!(
            people = positioned.node_count(),
            width = positioned.width();
            "Layout calculated"
        );
        Ok(Some(positioned))
    }

    /// Render `tree` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `LineageError` for invalid spacing or unparsable style colors.
    pub fn render_svg(&self, tree: &FamilyTree) -> Result<String, LineageError> {
        let positioned = self.layout(tree)?;

        let exporter = SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export(positioned.as_ref())?;

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render `tree` and write the SVG document to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`render_svg`](Self::render_svg), plus [`LineageError::Export`]
    /// if the file cannot be written.
    pub fn export_svg(&self, tree: &FamilyTree, path: impl AsRef<Path>) -> Result<(), LineageError> {
        let positioned = self.layout(tree)?;

        SvgBuilder::new()
            .with_style(self.config.style())
            .build()?
            .write_to_file(positioned.as_ref(), path)?;

        Ok(())
    }
}
