//! State-change messages sent from the editor to the application's state
//! service.
//!
//! Follows the `#[serde(tag = "type", content = "data")]` pattern so each
//! event serializes as `{"type": "...", "data": {...}}`, with the type names
//! the state container's reducers match on.

use serde::{Deserialize, Serialize};

use crate::nodes::Node;
use crate::points::ControlPoint;
use crate::range::DataRange;

/// Outbound messages, emitted in pairs: points first, then nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StateEvent {
    /// The raw editor points for an image component changed.
    #[serde(rename = "IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED")]
    PointsChanged(PointsChanged),

    /// The data-space opacity function for an image component changed.
    #[serde(rename = "IMAGE_PIECEWISE_FUNCTION_CHANGED")]
    PiecewiseFunctionChanged(PiecewiseFunctionChanged),
}

impl StateEvent {
    /// Wire name of the event type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::PointsChanged(_) => "IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED",
            Self::PiecewiseFunctionChanged(_) => "IMAGE_PIECEWISE_FUNCTION_CHANGED",
        }
    }

    /// Image the event targets.
    pub fn image_name(&self) -> &str {
        match self {
            Self::PointsChanged(data) => &data.name,
            Self::PiecewiseFunctionChanged(data) => &data.name,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of `IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsChanged {
    /// Selected image name.
    pub name: String,
    /// Selected component index.
    pub component: usize,
    /// Points exactly as the widget reported them.
    pub points: Vec<ControlPoint>,
}

/// Payload of `IMAGE_PIECEWISE_FUNCTION_CHANGED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseFunctionChanged {
    /// Selected image name.
    pub name: String,
    /// Selected component index.
    pub component: usize,
    /// Intensity range spanned by `nodes`, or the full data range.
    pub range: DataRange,
    /// Opacity nodes in data units.
    pub nodes: Vec<Node>,
}
