//! Piecewise Core — domain layer for piecewise opacity editing.
//!
//! This crate contains the control-point math (windowing, normalization,
//! range resolution), the outbound state-change messages, and the selection
//! context the editor reads from. No async runtime or widget dependencies.

pub mod legacy;
pub mod messages;
pub mod nodes;
pub mod points;
pub mod range;
pub mod selection;

// Re-exports for convenience.
pub use legacy::{Capability, PiecewiseGaussian, UnsupportedCapability};
pub use messages::{PiecewiseFunctionChanged, PointsChanged, StateEvent};
pub use nodes::{Node, normalize};
pub use points::{ControlPoint, window_points};
pub use range::{DataRange, FALLBACK_DATA_RANGE, RangeError, resolve};
pub use selection::{ActorContext, ContextSnapshot, ImagesContext, Selection, SelectionContext};
