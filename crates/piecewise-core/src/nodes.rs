//! Data-space opacity nodes consumed by the volume renderer.
//!
//! The editor models a plain piecewise-linear opacity function, so every node
//! carries the same neutral shaping parameters: a centered midpoint and zero
//! sharpness.

use serde::{Deserialize, Serialize};

use crate::points::ControlPoint;
use crate::range::DataRange;

/// Midpoint written into every node.
pub const NODE_MIDPOINT: f64 = 0.5;
/// Sharpness written into every node.
pub const NODE_SHARPNESS: f64 = 0.0;

/// A denormalized opacity node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Intensity in data units.
    pub x: f64,
    /// Opacity, `[0, 1]`.
    pub y: f64,
    pub midpoint: f64,
    pub sharpness: f64,
}

impl Node {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            midpoint: NODE_MIDPOINT,
            sharpness: NODE_SHARPNESS,
        }
    }
}

/// Map normalized control points into `range`.
///
/// `points` should already be windowed (see [`crate::points::window_points`]);
/// this function maps them one-to-one and never reorders, drops, or clamps.
///
/// ```text
/// node.x = range.min + (range.max − range.min) × point.x
/// node.y = point.y
/// ```
pub fn normalize(range: DataRange, points: &[ControlPoint]) -> Vec<Node> {
    points
        .iter()
        .map(|p| Node::new(range.lerp(p.x), p.y))
        .collect()
}
