//! SVG rendering of positioned family trees.

use std::{fs, path::Path};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Group, Path as SvgPath, Rectangle, Text},
};

use lineage_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{self, PositionedNode},
};

/// Builder for [`Svg`] that resolves style settings up front.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `style` instead of the default style.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            footprint: style.footprint(),
            padding: style.padding(),
            corner_radius: style.corner_radius(),
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
            background_color: style.background_color().map_err(Error::Render)?,
            node_color: style.node_color().map_err(Error::Render)?,
            line_color: style.line_color().map_err(Error::Render)?,
            text_color: style.text_color().map_err(Error::Render)?,
        })
    }
}

/// SVG exporter for positioned trees.
///
/// Each person is a rounded box of the footprint size with its top-left corner
/// at the node position and the name centered inside. Parents are joined to
/// their children by elbow lines from the bottom center of the parent box to
/// the top center of the child box.
#[derive(Debug, Clone)]
pub struct Svg {
    footprint: Size,
    padding: Insets,
    corner_radius: f32,
    font_family: String,
    font_size: f32,
    background_color: Option<Color>,
    node_color: Color,
    line_color: Color,
    text_color: Color,
}

impl Svg {
    /// Renders the chart as an SVG document.
    pub fn render(&self, tree: Option<&PositionedNode>) -> Document {
        let content_bounds = tree
            .map(|root| layout::bounds(root, self.footprint))
            .unwrap_or_default();
        let viewport = content_bounds.add_padding(self.padding);
        let svg_size = viewport.to_size();
        debug!(width = svg_size.width(), height = svg_size.height(); "SVG dimensions");

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let mut doc = self.add_background(doc, svg_size);

        let Some(root) = tree else {
            return doc;
        };

        let origin = viewport.min_point();
        let mut edge_paths = Vec::new();
        let mut people = Vec::new();
        root.walk(&mut |node| {
            edge_paths.extend(
                node.children()
                    .iter()
                    .map(|child| self.render_edge(node, child)),
            );
            people.push(self.render_node(node));
        });

        let edges = edge_paths
            .into_iter()
            .fold(Group::new().set("class", "edges"), Group::add);
        let nodes = people
            .into_iter()
            .fold(Group::new().set("class", "people"), Group::add);

        let main_group = Group::new()
            .set(
                "transform",
                format!("translate({}, {})", -origin.x(), -origin.y()),
            )
            .add(edges)
            .add(nodes);

        doc = doc.add(main_group);
        doc
    }

    /// Renders the chart and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write_to_file(
        &self,
        tree: Option<&PositionedNode>,
        path: impl AsRef<Path>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let doc = self.render(tree);
        info!(file_name = path.display().to_string(); "Creating SVG file");

        if let Err(err) = fs::write(path, doc.to_string()) {
            error!(file_name = path.display().to_string(), err:% = err; "Failed to write SVG file");
            return Err(Error::Io(err));
        }
        Ok(())
    }

    fn add_background(&self, doc: Document, size: Size) -> Document {
        match &self.background_color {
            Some(color) => doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", color),
            ),
            None => doc,
        }
    }

    fn render_node(&self, node: &PositionedNode) -> Group {
        let bounds = node.footprint_bounds(self.footprint);
        let center = bounds.center();

        let rect = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", self.corner_radius)
            .set("fill", &self.node_color)
            .set("stroke", &self.line_color)
            .set("stroke-width", 1.5);

        let label = Text::new(node.name())
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", &self.text_color);

        Group::new()
            .set("data-id", node.id().to_string())
            .add(rect)
            .add(label)
    }

    fn render_edge(&self, parent: &PositionedNode, child: &PositionedNode) -> SvgPath {
        let start = bottom_center(parent.footprint_bounds(self.footprint));
        let end = top_center(child.footprint_bounds(self.footprint));

        SvgPath::new()
            .set("d", elbow_path_data(start, end))
            .set("fill", "none")
            .set("stroke", &self.line_color)
            .set("stroke-width", 1.5)
    }
}

impl Exporter for Svg {
    fn export(&self, tree: Option<&PositionedNode>) -> Result<String, Error> {
        let doc = self.render(tree);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

fn bottom_center(bounds: Bounds) -> Point {
    Point::new(bounds.center().x(), bounds.max_y())
}

fn top_center(bounds: Bounds) -> Point {
    Point::new(bounds.center().x(), bounds.min_y())
}

/// Vertical, horizontal, vertical path meeting halfway between the two rows.
fn elbow_path_data(start: Point, end: Point) -> String {
    let mid_y = start.midpoint(end).y();
    format!(
        "M {} {} L {} {} L {} {} L {} {}",
        start.x(),
        start.y(),
        start.x(),
        mid_y,
        end.x(),
        mid_y,
        end.x(),
        end.y()
    )
}

#[cfg(test)]
mod tests {
    use lineage_core::{identifier::Id, tree::LogicalNode};
    use tempfile::tempdir;

    use super::*;
    use crate::layout::{Spacing, layout};

    fn two_children() -> PositionedNode {
        let root = LogicalNode::new(Id::new("svg-root"), "Root")
            .unwrap()
            .with_child(LogicalNode::new(Id::new("svg-a"), "Alice").unwrap())
            .with_child(LogicalNode::new(Id::new("svg-b"), "Bob & Co").unwrap());
        layout(&root, Point::new(0.0, 80.0), Spacing::new(180.0, 160.0).unwrap())
    }

    #[test]
    fn test_viewport_is_padded_bounds() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.render(Some(&two_children())).to_string();

        // Bounds 370 x 240 plus 35 on every side.
        assert!(doc.contains(r#"viewBox="0 0 440 310""#), "{doc}");
        assert!(doc.contains("translate(170, -45)"), "{doc}");
    }

    #[test]
    fn test_renders_every_person_and_edge() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.render(Some(&two_children())).to_string();

        assert_eq!(doc.matches("<rect").count(), 3);
        assert_eq!(doc.matches("<path").count(), 2);
        assert!(doc.contains("Alice"));
        assert!(doc.contains(r#"data-id="svg-b""#));
    }

    #[test]
    fn test_empty_tree_renders_padding_only() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.export(None).unwrap();

        assert!(doc.contains(r#"viewBox="0 0 70 70""#), "{doc}");
        assert!(!doc.contains("<rect"));
    }

    #[test]
    fn test_background_color() {
        let style: StyleConfig = toml::from_str("background_color = \"ivory\"").unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let doc = svg.export(None).unwrap();

        assert_eq!(doc.matches("<rect").count(), 1);
    }

    #[test]
    fn test_invalid_color_fails_build() {
        let style: StyleConfig = toml::from_str("node_color = \"not-a-color\"").unwrap();
        let result = SvgBuilder::new().with_style(&style).build();

        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_elbow_path_data() {
        let data = elbow_path_data(Point::new(50.0, 160.0), Point::new(-85.0, 240.0));
        assert_eq!(data, "M 50 160 L 50 200 L -85 200 L -85 240");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let svg = SvgBuilder::new().build().unwrap();
        svg.write_to_file(Some(&two_children()), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("chart.svg");

        let svg = SvgBuilder::new().build().unwrap();
        let result = svg.write_to_file(None, &path);

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_groups_keep_walk_order() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.render(Some(&two_children())).to_string();

        let edges = doc.find(r#"class="edges""#).unwrap();
        let people = doc.find(r#"class="people""#).unwrap();
        assert!(edges < people);

        let root = doc.find(r#"data-id="svg-root""#).unwrap();
        let a = doc.find(r#"data-id="svg-a""#).unwrap();
        let b = doc.find(r#"data-id="svg-b""#).unwrap();
        assert!(people < root && root < a && a < b);
    }
}
