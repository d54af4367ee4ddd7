//! Bounding box of a positioned tree and optional whole-tree recentering.

use log::debug;

use lineage_core::geometry::{Bounds, Size};

use super::PositionedNode;

/// Computes the box covering every node footprint in the tree.
///
/// Each node contributes `[x, x + footprint.width] × [y, y + footprint.height]`;
/// the subtree `width` plays no part. The result does not depend on traversal
/// order.
///
/// # Examples
///
/// ```
/// use lineage::layout::{Spacing, bounds, layout};
/// use lineage_core::{
///     geometry::{Point, Size},
///     identifier::Id,
///     tree::LogicalNode,
/// };
///
/// let root = LogicalNode::new(Id::new("bounds-doc"), "Root")
///     .unwrap()
///     .with_child(LogicalNode::new(Id::new("bounds-doc-a"), "A").unwrap())
///     .with_child(LogicalNode::new(Id::new("bounds-doc-b"), "B").unwrap());
/// let positioned = layout(&root, Point::new(0.0, 80.0), Spacing::new(180.0, 160.0).unwrap());
///
/// let chart = bounds(&positioned, Size::new(100.0, 80.0));
/// assert_eq!(chart.min_x(), -135.0);
/// assert_eq!(chart.max_x(), 235.0);
/// assert_eq!(chart.min_y(), 80.0);
/// assert_eq!(chart.max_y(), 320.0);
/// ```
pub fn bounds(positioned: &PositionedNode, footprint: Size) -> Bounds {
    positioned
        .children()
        .iter()
        .map(|child| bounds(child, footprint))
        .fold(positioned.footprint_bounds(footprint), |acc, child| {
            acc.merge(&child)
        })
}

/// Returns a copy of the tree moved horizontally so that its bounding box is
/// centered on `center_x`.
///
/// This is a cosmetic pass on top of [`layout`](super::layout): parents stay
/// centered over their children, but the root of an asymmetric tree will no
/// longer sit at `center_x`.
pub fn recenter(positioned: &PositionedNode, footprint: Size, center_x: f32) -> PositionedNode {
    let dx = center_x - bounds(positioned, footprint).center().x();
    debug!(dx; "Recentering tree");

    let mut recentered = positioned.clone();
    recentered.shift_x(dx);
    recentered
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use lineage_core::{geometry::Point, identifier::Id, tree::LogicalNode};

    use super::*;
    use crate::layout::{Spacing, layout};

    fn person(id: &str) -> LogicalNode {
        LogicalNode::new(Id::new(id), id).unwrap()
    }

    fn footprint() -> Size {
        Size::new(100.0, 80.0)
    }

    fn lay_out(root: &LogicalNode) -> PositionedNode {
        layout(root, Point::new(0.0, 80.0), Spacing::new(180.0, 160.0).unwrap())
    }

    #[test]
    fn test_bounds_single_node() {
        let positioned = lay_out(&person("bounds-solo"));
        let chart = bounds(&positioned, footprint());

        assert_eq!(chart.min_x(), 0.0);
        assert_eq!(chart.max_x(), 100.0);
        assert_eq!(chart.min_y(), 80.0);
        assert_eq!(chart.max_y(), 160.0);
    }

    #[test]
    fn test_bounds_two_children() {
        let root = person("bounds-two")
            .with_child(person("bounds-two-a"))
            .with_child(person("bounds-two-b"));
        let chart = bounds(&lay_out(&root), footprint());

        assert_eq!(chart.min_x(), -135.0);
        assert_eq!(chart.max_x(), 235.0);
        assert_eq!(chart.min_y(), 80.0);
        assert_eq!(chart.max_y(), 320.0);
    }

    #[test]
    fn test_bounds_is_repeatable() {
        let root = person("bounds-rep")
            .with_child(person("bounds-rep-a").with_child(person("bounds-rep-a1")))
            .with_child(person("bounds-rep-b"));

        assert_eq!(
            bounds(&lay_out(&root), footprint()),
            bounds(&lay_out(&root), footprint())
        );
    }

    #[test]
    fn test_recenter_centers_bounding_box() {
        let root = person("recenter")
            .with_child(
                person("recenter-a")
                    .with_child(person("recenter-a1"))
                    .with_child(person("recenter-a2")),
            )
            .with_child(person("recenter-b"));
        let positioned = lay_out(&root);

        let recentered = recenter(&positioned, footprint(), 0.0);
        let before = bounds(&positioned, footprint());
        let after = bounds(&recentered, footprint());

        assert_approx_eq!(f32, after.center().x(), 0.0);
        assert_approx_eq!(f32, after.width(), before.width());
        assert_eq!(after.min_y(), before.min_y());
        assert_approx_eq!(
            f32,
            recentered.x() - positioned.x(),
            after.min_x() - before.min_x()
        );
    }
}
