//! Normalized editor control points and the windowing step applied before
//! they are mapped into data space.
//!
//! The editor widget stores points in unit space: `x` is the position along
//! the intensity axis and `y` the opacity, both in `[0, 1]`. Widgets may hand
//! back points out of order, slightly outside the unit square while a drag is
//! in flight, or stacked on the same `x`. [`window_points`] turns such a list
//! into the canonical form the rest of the pipeline expects.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single control point in normalized editor space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Position along the intensity axis, `[0, 1]`.
    pub x: f64,
    /// Opacity, `[0, 1]`.
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

impl From<[f64; 2]> for ControlPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<ControlPoint> for [f64; 2] {
    fn from(point: ControlPoint) -> Self {
        [point.x, point.y]
    }
}

/// Bring a raw point list into canonical order.
///
/// 1. Points with a non-finite coordinate are dropped.
/// 2. `x` and `y` are clamped into `[0, 1]`.
/// 3. Points are stably sorted ascending by `x`.
/// 4. Runs of equal `x` collapse to the first point of the run.
///
/// The result has strictly increasing `x` and windowing it again is a no-op.
pub fn window_points(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let mut windowed: Vec<ControlPoint> = points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| p.clamped())
        .collect();

    let dropped = points.len() - windowed.len();
    if dropped > 0 {
        tracing::debug!("dropped {dropped} non-finite control point(s)");
    }

    // Stable, so the first of several equal-x points survives the dedup below.
    windowed.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    windowed.dedup_by(|later, earlier| later.x == earlier.x);
    windowed
}
