//! Tidy tree layout for family charts.
//!
//! [`layout`] maps a [`LogicalNode`](lineage_core::tree::LogicalNode) tree to a
//! [`PositionedNode`] tree: siblings are packed left to right, every parent
//! sits over the midpoint of its first and last child, and each generation is
//! one `spacing.y()` below the previous one. [`bounds`] derives the chart's
//! bounding box from the positioned tree and a node [footprint](Size).
//!
//! Both functions are pure. The input tree is never modified and the returned
//! tree is rebuilt from scratch on every call.

mod bounds;
mod tidy;

pub use bounds::{bounds, recenter};
pub use tidy::layout;

use thiserror::Error;

use lineage_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// Violated layout preconditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("spacing along {axis} must be positive and finite, got {value}")]
    InvalidSpacing { axis: &'static str, value: f32 },
}

/// Horizontal slot width and vertical generation height.
///
/// `x` is the width reserved for a leaf; half of it separates neighbouring
/// sibling subtrees. `y` is the distance between consecutive generations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    x: f32,
    y: f32,
}

impl Spacing {
    /// Creates a validated spacing.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpacing`] when either value is zero,
    /// negative or not finite.
    pub fn new(x: f32, y: f32) -> Result<Self, LayoutError> {
        for (axis, value) in [("x", x), ("y", y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidSpacing { axis, value });
            }
        }
        Ok(Self { x, y })
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Gap left between two neighbouring sibling subtrees.
    pub fn sibling_gap(self) -> f32 {
        self.x / 2.0
    }
}

/// A person annotated with the geometry computed by [`layout`].
///
/// `position` is the top-left anchor of the node's footprint. `width` is the
/// horizontal span reserved for the whole subtree, centered on `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: Id,
    name: String,
    position: Point,
    width: f32,
    children: Vec<PositionedNode>,
}

impl PositionedNode {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    /// Horizontal span of the subtree rooted here.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn children(&self) -> &[PositionedNode] {
        &self.children
    }

    /// Number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PositionedNode::node_count)
            .sum::<usize>()
    }

    /// Visits every node of the subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a PositionedNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Footprint-sized box of this node alone.
    pub fn footprint_bounds(&self, footprint: Size) -> Bounds {
        Bounds::new_from_top_left(self.position, footprint)
    }

    /// Moves the whole subtree horizontally by `dx`.
    fn shift_x(&mut self, dx: f32) {
        self.position = self.position.with_x(self.position.x() + dx);
        for child in &mut self.children {
            child.shift_x(dx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_accepts_positive_values() {
        let spacing = Spacing::new(180.0, 160.0).unwrap();
        assert_eq!(spacing.x(), 180.0);
        assert_eq!(spacing.y(), 160.0);
        assert_eq!(spacing.sibling_gap(), 90.0);
    }

    #[test]
    fn test_spacing_rejects_non_positive_values() {
        assert_eq!(
            Spacing::new(0.0, 160.0),
            Err(LayoutError::InvalidSpacing {
                axis: "x",
                value: 0.0
            })
        );
        assert_eq!(
            Spacing::new(180.0, -1.0),
            Err(LayoutError::InvalidSpacing {
                axis: "y",
                value: -1.0
            })
        );
        assert!(Spacing::new(f32::INFINITY, 160.0).is_err());
        assert!(Spacing::new(180.0, f32::NAN).is_err());
    }
}
