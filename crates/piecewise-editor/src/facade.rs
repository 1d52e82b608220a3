//! The editor's public operation set.

use std::sync::Arc;

use parking_lot::Mutex;
use piecewise_core::{
    Capability, ControlPoint, DataRange, Node, PiecewiseGaussian, SelectionContext,
    UnsupportedCapability,
};
use tokio::runtime::Handle;

use crate::config::EditorConfig;
use crate::dispatcher::{ChangeDispatcher, FlushOutcome, opacity_function};
use crate::error::{DispatchError, EditorError};
use crate::service::StateService;
use crate::widget::TransferFunctionWidget;

const GET_GAUSSIANS: UnsupportedCapability = UnsupportedCapability {
    operation: "gaussians",
    use_instead: "points",
};
const SET_GAUSSIANS: UnsupportedCapability = UnsupportedCapability {
    operation: "set_gaussians",
    use_instead: "set_points",
};

/// Piecewise opacity editor bound to an application's state service.
///
/// Wraps a [`TransferFunctionWidget`]. User edits reported by the widget are
/// debounced and dispatched as state-change events; the methods here give
/// direct, non-debounced access to the same data.
///
/// Dropping the editor cancels any pending debounced dispatch.
pub struct PiecewiseEditor<W: TransferFunctionWidget> {
    widget: Arc<Mutex<W>>,
    dispatcher: Arc<ChangeDispatcher<W>>,
}

impl<W: TransferFunctionWidget> PiecewiseEditor<W> {
    /// Create an editor scheduling updates on the current tokio runtime.
    pub fn new(
        widget: W,
        context: Arc<dyn SelectionContext>,
        service: Arc<dyn StateService>,
        config: &EditorConfig,
    ) -> Result<Self, EditorError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(widget, context, service, config, runtime))
    }

    /// Create an editor scheduling updates on `runtime`.
    pub fn with_runtime(
        widget: W,
        context: Arc<dyn SelectionContext>,
        service: Arc<dyn StateService>,
        config: &EditorConfig,
        runtime: Handle,
    ) -> Self {
        let widget = Arc::new(Mutex::new(widget));
        let dispatcher = ChangeDispatcher::new(widget.clone(), context, service, config, runtime);
        dispatcher.attach();
        Self { widget, dispatcher }
    }

    /// Replace the widget's points and dispatch immediately.
    pub fn set_points(&self, points: Vec<ControlPoint>) -> Result<FlushOutcome, DispatchError> {
        self.dispatcher.replace_points(points)
    }

    /// Current widget points.
    pub fn points(&self) -> Vec<ControlPoint> {
        self.widget.lock().points()
    }

    pub fn set_color_transfer_function(&self, tf: W::ColorTransferFunction) {
        self.widget.lock().set_color_transfer_function(tf);
    }

    pub fn set_histogram(&self, histogram: W::Histogram) {
        self.widget.lock().set_histogram(histogram);
    }

    /// Zoom the widget's view to `range`. Does not touch the data.
    pub fn set_range_zoom(&self, range: DataRange) {
        self.widget.lock().set_view_box(range.min(), range.max());
    }

    /// Current points as data-space nodes over `range`, or over the selected
    /// component's range when `None`.
    pub fn opacity_nodes(&self, range: Option<DataRange>) -> Vec<Node> {
        self.opacity_function(range).0
    }

    /// Intensity range spanned by the current points.
    pub fn opacity_range(&self, range: Option<DataRange>) -> DataRange {
        self.opacity_function(range).1
    }

    fn opacity_function(&self, range: Option<DataRange>) -> (Vec<Node>, DataRange) {
        let range = range.unwrap_or_else(|| self.dispatcher.data_range());
        opacity_function(range, &self.points())
    }

    /// Not supported: the editor is point based.
    pub fn gaussians(&self) -> Capability<Vec<PiecewiseGaussian>> {
        tracing::warn!("{GET_GAUSSIANS}");
        Capability::Unsupported(GET_GAUSSIANS)
    }

    /// Not supported: the editor is point based. `gaussians` are ignored.
    pub fn set_gaussians(&self, gaussians: &[PiecewiseGaussian]) -> Capability<()> {
        tracing::warn!(ignored = gaussians.len(), "{SET_GAUSSIANS}");
        Capability::Unsupported(SET_GAUSSIANS)
    }

    /// Run `f` with exclusive access to the widget.
    ///
    /// Listeners fired from inside `f` only schedule a dispatch; it runs
    /// after `f` returns and the delay elapses.
    pub fn with_widget<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.widget.lock())
    }

    /// Whether a debounced dispatch is scheduled but has not run.
    pub fn is_update_pending(&self) -> bool {
        self.dispatcher.is_pending()
    }

    /// Drop the pending debounced dispatch. Returns whether one was pending.
    pub fn cancel_pending_update(&self) -> bool {
        self.dispatcher.cancel_pending()
    }
}
