//! A widget with no rendering, for tests and headless tools.

use piecewise_core::ControlPoint;
use serde::{Deserialize, Serialize};

use crate::widget::{TransferFunctionWidget, UpdateListener};

/// One color stop of a color transfer function, `x` in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub x: f64,
    pub rgb: [f32; 3],
}

/// In-memory [`TransferFunctionWidget`].
///
/// Records everything forwarded to it. The `drag_*`/`add_point` methods
/// simulate user edits and fire the "updated" listeners the way an
/// interactive editor would.
#[derive(Default)]
pub struct HeadlessWidget {
    points: Vec<ControlPoint>,
    view_box: Option<(f64, f64)>,
    color_transfer_function: Vec<ColorStop>,
    histogram: Vec<u32>,
    listeners: Vec<UpdateListener>,
}

impl HeadlessWidget {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn view_box(&self) -> Option<(f64, f64)> {
        self.view_box
    }

    pub fn color_transfer_function(&self) -> &[ColorStop] {
        &self.color_transfer_function
    }

    pub fn histogram(&self) -> &[u32] {
        &self.histogram
    }

    /// Move the point at `index` and notify listeners.
    ///
    /// Returns `false` without notifying if there is no such point.
    pub fn drag_point(&mut self, index: usize, to: ControlPoint) -> bool {
        let Some(point) = self.points.get_mut(index) else {
            return false;
        };
        *point = to;
        self.fire_updated();
        true
    }

    /// Append a point and notify listeners.
    pub fn add_point(&mut self, point: ControlPoint) {
        self.points.push(point);
        self.fire_updated();
    }

    /// Notify all "updated" listeners.
    pub fn fire_updated(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}

impl TransferFunctionWidget for HeadlessWidget {
    type ColorTransferFunction = Vec<ColorStop>;
    type Histogram = Vec<u32>;

    fn points(&self) -> Vec<ControlPoint> {
        self.points.clone()
    }

    fn set_points(&mut self, points: Vec<ControlPoint>) {
        self.points = points;
    }

    fn set_view_box(&mut self, min: f64, max: f64) {
        self.view_box = Some((min, max));
    }

    fn set_color_transfer_function(&mut self, tf: Vec<ColorStop>) {
        self.color_transfer_function = tf;
    }

    fn set_histogram(&mut self, histogram: Vec<u32>) {
        self.histogram = histogram;
    }

    fn add_update_listener(&mut self, listener: UpdateListener) {
        self.listeners.push(listener);
    }
}
