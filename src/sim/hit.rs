//! Click-to-shape hit testing
//!
//! Every test is axis-aligned and centered on the shape position. The triangle
//! test is a bounding-box approximation, not an exact triangle test; game feel
//! is tuned around it, so keep it that way unless product asks otherwise.

use glam::Vec2;

use super::state::{Playfield, Shape, ShapeKind};
use crate::consts::RECTANGLE_ASPECT;

/// Check whether a point lies inside a shape
pub fn point_in_shape(point: Vec2, shape: &Shape) -> bool {
    let d = point - shape.pos;
    let half = shape.size / 2.0;

    match shape.kind {
        ShapeKind::Circle => d.length() <= half,
        ShapeKind::Triangle => d.x.abs() < half && d.y > -half && d.y < half,
        ShapeKind::Square => d.x.abs() < half && d.y.abs() < half,
        ShapeKind::Rectangle => {
            let half_width = shape.size * RECTANGLE_ASPECT / 2.0;
            d.x.abs() < half_width && d.y.abs() < half
        }
    }
}

/// Find the shape a click lands on
///
/// Scans newest to oldest so the most recently spawned shape wins where
/// shapes overlap. Returns its index in `shapes`. Points outside the
/// playfield never hit, even where an off-screen shape covers them.
pub fn resolve_click(point: Vec2, shapes: &[Shape], playfield: &Playfield) -> Option<usize> {
    if !playfield.contains(point) {
        return None;
    }
    shapes.iter().rposition(|shape| point_in_shape(point, shape))
}
