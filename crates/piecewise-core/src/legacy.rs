//! Compatibility types for the Gaussian-shaped opacity API.
//!
//! Older callers drive opacity through a list of Gaussians. The point-based
//! editor cannot represent them, so those operations answer with
//! [`Capability::Unsupported`] instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One Gaussian bump of a piecewise-Gaussian opacity function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiecewiseGaussian {
    pub position: f64,
    pub height: f64,
    pub width: f64,
    pub x_bias: f64,
    pub y_bias: f64,
}

/// Describes an operation the editor does not support and what to call
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedCapability {
    pub operation: &'static str,
    pub use_instead: &'static str,
}

impl fmt::Display for UnsupportedCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not supported, use {}",
            self.operation, self.use_instead
        )
    }
}

/// Outcome of an operation that may not be available on this editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability<T> {
    Supported(T),
    Unsupported(UnsupportedCapability),
}

impl<T> Capability<T> {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }

    pub fn supported(self) -> Option<T> {
        match self {
            Self::Supported(value) => Some(value),
            Self::Unsupported(_) => None,
        }
    }
}

impl<T: Default> Capability<T> {
    /// The value, or `T::default()` when unsupported.
    pub fn unwrap_or_default(self) -> T {
        self.supported().unwrap_or_default()
    }
}
