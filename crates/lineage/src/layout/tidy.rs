//! Post-order tidy tree packing.

use log::{debug, trace};

use lineage_core::{geometry::Point, tree::LogicalNode};

use super::{PositionedNode, Spacing};

/// Lays out `node` and its descendants with the root anchored at `anchor`.
///
/// A leaf root keeps `anchor.x()`; a root with children is moved to the
/// midpoint of its first and last child, which is packed around `anchor.x()`.
/// Generation `d` is placed at `anchor.y() + d * spacing.y()`.
///
/// Each child subtree moves rigidly with its child, and a subtree's `width`
/// only accounts for its direct children. A parent that sits off-center over
/// a lopsided set of children therefore lets descendants extend past its own
/// slot, where they may land on a cousin. No contour separation is done.
///
/// # Examples
///
/// ```
/// use lineage::layout::{Spacing, layout};
/// use lineage_core::{geometry::Point, identifier::Id, tree::LogicalNode};
///
/// let root = LogicalNode::new(Id::new("doc-root"), "Root")
///     .unwrap()
///     .with_child(LogicalNode::new(Id::new("doc-left"), "Left").unwrap())
///     .with_child(LogicalNode::new(Id::new("doc-right"), "Right").unwrap());
///
/// let spacing = Spacing::new(180.0, 160.0).unwrap();
/// let positioned = layout(&root, Point::new(0.0, 80.0), spacing);
///
/// assert_eq!(positioned.width(), 450.0);
/// assert_eq!(positioned.children()[0].x(), -135.0);
/// assert_eq!(positioned.children()[1].x(), 135.0);
/// assert_eq!(positioned.children()[1].y(), 240.0);
/// ```
pub fn layout(node: &LogicalNode, anchor: Point, spacing: Spacing) -> PositionedNode {
    let positioned = layout_subtree(node, anchor, spacing);
    debug!(
        root:% = positioned.id,
        nodes = positioned.node_count(),
        width = positioned.width;
        "Tree laid out"
    );
    positioned
}

fn layout_subtree(node: &LogicalNode, anchor: Point, spacing: Spacing) -> PositionedNode {
    if node.is_leaf() {
        return PositionedNode {
            id: node.id(),
            name: node.name().to_string(),
            position: anchor,
            width: spacing.x(),
            children: Vec::new(),
        };
    }

    let child_anchor = Point::new(0.0, anchor.y() + spacing.y());
    let mut children: Vec<PositionedNode> = node
        .children()
        .map(|child| layout_subtree(child, child_anchor, spacing))
        .collect();

    let gap = spacing.sibling_gap();
    let gaps = children.len().saturating_sub(1);
    let packed: f32 = children.iter().map(|child| child.width).sum::<f32>() + gap * gaps as f32;
    let width = packed.max(spacing.x());

    let mut cursor = anchor.x() - width / 2.0;
    for child in &mut children {
        let slot_center = cursor + child.width / 2.0;
        child.shift_x(slot_center - child.x());
        cursor += child.width + gap;
    }

    let x = match (children.first(), children.last()) {
        (Some(first), Some(last)) => first.position.midpoint(last.position).x(),
        _ => anchor.x(),
    };
    trace!(node:% = node.id(), x, width; "Subtree packed");

    PositionedNode {
        id: node.id(),
        name: node.name().to_string(),
        position: anchor.with_x(x),
        width,
        children,
    }
}
