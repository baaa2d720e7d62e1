use crate::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-left corner of a node in absolute diagram coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this position by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    /// Get the right edge of the rectangle
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge of the rectangle
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Reference lines on the horizontal axis: top, center, bottom
    fn horizontal_lines(&self) -> [f64; 3] {
        [self.y, self.center_y(), self.bottom()]
    }

    /// Reference lines on the vertical axis: left, center, right
    fn vertical_lines(&self) -> [f64; 3] {
        [self.x, self.center_x(), self.right()]
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Helper lines shown while dragging. `horizontal` is a y coordinate,
/// `vertical` an x coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentGuides {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

impl AlignmentGuides {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Axis used by the multi-select alignment commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignAxis {
    /// Line nodes up on a shared horizontal line (equal vertical centers)
    Horizontal,
    /// Line nodes up on a shared vertical line (equal horizontal centers)
    Vertical,
}

// ========== Drag-time guides ==========

/// Find the closest shared line per axis between the dragged node and every other node.
///
/// Each axis compares top/center/bottom (or left/center/right) of the dragged
/// box against the same line of each other box. A candidate must be strictly
/// closer than `threshold`; on equal distance the first one found wins.
pub fn compute_alignment_guides(dragged: &Node, nodes: &[Node], threshold: f64) -> AlignmentGuides {
    let others = nodes
        .iter()
        .filter(|other| other.id != dragged.id)
        .map(Node::bounds);

    guides_for_bounds(&dragged.bounds(), others, threshold)
}

/// Rectangle-level form of [`compute_alignment_guides`]
pub fn guides_for_bounds(
    dragged: &Rectangle,
    others: impl IntoIterator<Item = Rectangle>,
    threshold: f64,
) -> AlignmentGuides {
    let mut guides = AlignmentGuides::default();
    let mut best_horizontal = threshold;
    let mut best_vertical = threshold;

    let dragged_h = dragged.horizontal_lines();
    let dragged_v = dragged.vertical_lines();

    for other in others {
        for (mine, theirs) in dragged_h.iter().zip(other.horizontal_lines()) {
            let distance = (mine - theirs).abs();
            if distance < best_horizontal {
                best_horizontal = distance;
                guides.horizontal = Some(theirs);
            }
        }

        for (mine, theirs) in dragged_v.iter().zip(other.vertical_lines()) {
            let distance = (mine - theirs).abs();
            if distance < best_vertical {
                best_vertical = distance;
                guides.vertical = Some(theirs);
            }
        }
    }

    guides
}

/// Snap a dropped position onto the active guides.
///
/// Per axis the anchors are tried in order near edge, center, far edge; the
/// first anchor within `threshold` of the guide wins. An axis with a guide but
/// no anchor in range keeps its coordinate.
pub fn snap_to_guides(
    position: Position,
    guides: &AlignmentGuides,
    size: Size,
    threshold: f64,
) -> Position {
    let mut snapped = position;

    if let Some(line) = guides.horizontal {
        if let Some(y) = snap_axis(position.y, size.height, line, threshold) {
            snapped.y = y;
        }
    }

    if let Some(line) = guides.vertical {
        if let Some(x) = snap_axis(position.x, size.width, line, threshold) {
            snapped.x = x;
        }
    }

    snapped
}

fn snap_axis(start: f64, extent: f64, line: f64, threshold: f64) -> Option<f64> {
    let anchors = [0.0, extent / 2.0, extent];
    anchors
        .iter()
        .find(|anchor| (start + **anchor - line).abs() < threshold)
        .map(|anchor| line - anchor)
}

// ========== Multi-select alignment ==========

/// Compute new y coordinates that put every node's vertical center on the mean center.
///
/// Fewer than two nodes yields an empty map.
pub fn align_selection_horizontally(selected: &[&Node]) -> BTreeMap<String, f64> {
    align_centers(selected, AlignAxis::Horizontal)
}

/// Compute new x coordinates that put every node's horizontal center on the mean center.
pub fn align_selection_vertically(selected: &[&Node]) -> BTreeMap<String, f64> {
    align_centers(selected, AlignAxis::Vertical)
}

pub(crate) fn align_centers(selected: &[&Node], axis: AlignAxis) -> BTreeMap<String, f64> {
    if selected.len() < 2 {
        return BTreeMap::new();
    }

    let center = |node: &Node| {
        let bounds = node.bounds();
        match axis {
            AlignAxis::Horizontal => bounds.center_y(),
            AlignAxis::Vertical => bounds.center_x(),
        }
    };

    let mean = selected.iter().map(|&node| center(node)).sum::<f64>() / selected.len() as f64;

    selected
        .iter()
        .map(|node| {
            let size = node.effective_size();
            let coordinate = match axis {
                AlignAxis::Horizontal => mean - size.height / 2.0,
                AlignAxis::Vertical => mean - size.width / 2.0,
            };
            (node.id.clone(), coordinate)
        })
        .collect()
}
