//! The editor widget capability set the bridge drives.

use piecewise_core::ControlPoint;

/// Callback invoked whenever the widget's points change through user input.
pub type UpdateListener = Box<dyn Fn() + Send + Sync>;

/// Trait for interactive transfer-function editors.
///
/// The widget owns its points, rendering and input handling. Color transfer
/// functions and histograms are forwarded untouched, so their shapes are left
/// to the implementation.
pub trait TransferFunctionWidget: Send + 'static {
    /// Color map drawn behind the opacity curve.
    type ColorTransferFunction;
    /// Intensity histogram drawn behind the opacity curve.
    type Histogram;

    /// Current points in normalized editor space.
    fn points(&self) -> Vec<ControlPoint>;

    /// Replace all points. Programmatic; need not notify listeners.
    fn set_points(&mut self, points: Vec<ControlPoint>);

    /// Zoom the visible intensity window to `[min, max]`.
    fn set_view_box(&mut self, min: f64, max: f64);

    fn set_color_transfer_function(&mut self, tf: Self::ColorTransferFunction);

    fn set_histogram(&mut self, histogram: Self::Histogram);

    /// Subscribe to "updated" notifications.
    ///
    /// Listeners may be called while the widget is borrowed mutably and must
    /// not call back into the widget.
    fn add_update_listener(&mut self, listener: UpdateListener);
}
