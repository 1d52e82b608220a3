//! Scalar intensity ranges and resolution of the sub-range spanned by nodes.

use serde::{Deserialize, Serialize};

use crate::nodes::Node;

/// Range substituted when no bound is recorded for the selected component.
pub const FALLBACK_DATA_RANGE: DataRange = DataRange {
    min: 0.0,
    max: 255.0,
};

/// Errors constructing a [`DataRange`] from untrusted bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("range bounds must be finite, got [{min}, {max}]")]
    NonFinite { min: f64, max: f64 },
}

/// `[min, max]` intensity bounds of an image component.
///
/// Serialized as a two-element array. Always ordered: the bounds are only
/// reachable through constructors, and constructing from an inverted pair
/// swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct DataRange {
    min: f64,
    max: f64,
}

impl DataRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Like [`DataRange::new`], rejecting NaN and infinite bounds.
    pub fn try_new(a: f64, b: f64) -> Result<Self, RangeError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(RangeError::NonFinite { min: a, max: b });
        }
        Ok(Self::new(a, b))
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a unit-interval position into this range.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + self.span() * t
    }
}

impl From<[f64; 2]> for DataRange {
    fn from([a, b]: [f64; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<DataRange> for [f64; 2] {
    fn from(range: DataRange) -> Self {
        [range.min, range.max]
    }
}

/// Sub-range actually covered by user-placed nodes.
///
/// With two or more nodes this is `[first.x, last.x]`. With zero or one node
/// there is no meaningful span and `data_range` is returned unchanged. Nodes
/// are expected in ascending `x`; an inverted head/tail also falls back to
/// `data_range`.
pub fn resolve(data_range: DataRange, nodes: &[Node]) -> DataRange {
    match nodes {
        [first, .., last] if first.x <= last.x => DataRange {
            min: first.x,
            max: last.x,
        },
        _ => data_range,
    }
}
