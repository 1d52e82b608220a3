//! Turns widget edits into ordered state-change events.
//!
//! Every flush reads a fresh selection snapshot and the widget's points, then
//! emits two events in order:
//!
//! ```text
//!   points ──→ IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED {name, component, points}
//!     │
//!     └─→ window ──→ normalize ──→ resolve ──→ IMAGE_PIECEWISE_FUNCTION_CHANGED
//!                                               {name, component, range, nodes}
//! ```
//!
//! Widget notifications go through a [`Debouncer`], so a drag gesture that
//! fires dozens of updates produces a single flush once the pointer rests.
//! Flushes are serialized: a debounced flush on a runtime worker and an
//! immediate one on the caller's thread never interleave their events.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use piecewise_core::{
    ControlPoint, DataRange, Node, PiecewiseFunctionChanged, PointsChanged, SelectionContext,
    StateEvent, normalize, resolve, window_points,
};
use tokio::runtime::Handle;

use crate::config::EditorConfig;
use crate::debounce::Debouncer;
use crate::error::DispatchError;
use crate::service::StateService;
use crate::widget::TransferFunctionWidget;

/// What a flush did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Both events were sent.
    Dispatched,
    /// The piecewise-function state is not initialized yet; nothing sent.
    NotReady,
    /// No image is selected; nothing sent.
    NoSelection,
}

/// Debounced dispatcher for one editor instance.
pub struct ChangeDispatcher<W> {
    widget: Arc<Mutex<W>>,
    context: Arc<dyn SelectionContext>,
    service: Arc<dyn StateService>,
    fallback_range: DataRange,
    debouncer: Debouncer,
    /// Held for a whole flush so event pairs never interleave.
    flush_lock: Mutex<()>,
}

impl<W: TransferFunctionWidget> ChangeDispatcher<W> {
    pub fn new(
        widget: Arc<Mutex<W>>,
        context: Arc<dyn SelectionContext>,
        service: Arc<dyn StateService>,
        config: &EditorConfig,
        runtime: Handle,
    ) -> Arc<Self> {
        Arc::new(Self {
            widget,
            context,
            service,
            fallback_range: config.fallback_range,
            debouncer: Debouncer::new(config.update_delay, runtime),
            flush_lock: Mutex::new(()),
        })
    }

    /// Subscribe to the widget's "updated" notifications.
    ///
    /// The listener holds a weak reference, so the widget does not keep the
    /// dispatcher alive.
    pub fn attach(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.widget
            .lock()
            .add_update_listener(Box::new(move || {
                if let Some(dispatcher) = weak.upgrade() {
                    dispatcher.notify_updated();
                }
            }));
    }

    /// (Re)schedule a flush after the configured delay.
    pub fn notify_updated(self: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.debouncer.schedule(move || {
            let Some(dispatcher) = weak.upgrade() else {
                return;
            };
            if let Err(e) = dispatcher.flush() {
                tracing::warn!("debounced piecewise update dropped: {e}");
            }
        });
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn cancel_pending(&self) -> bool {
        self.debouncer.cancel()
    }

    /// Data range of the current selection, or the fallback range.
    pub fn data_range(&self) -> DataRange {
        self.context
            .selection()
            .map_or(self.fallback_range, |s| s.data_range_or(self.fallback_range))
    }

    /// Flush immediately using the widget's current points.
    pub fn flush(&self) -> Result<FlushOutcome, DispatchError> {
        let _flushing = self.flush_lock.lock();
        let points = self.widget.lock().points();
        self.emit(points)
    }

    /// Flush immediately with `points`.
    pub fn flush_points(&self, points: Vec<ControlPoint>) -> Result<FlushOutcome, DispatchError> {
        let _flushing = self.flush_lock.lock();
        self.emit(points)
    }

    /// Store `points` in the widget and flush them as one step.
    ///
    /// No other flush can read the widget between the write and the
    /// dispatch.
    pub fn replace_points(
        &self,
        points: Vec<ControlPoint>,
    ) -> Result<FlushOutcome, DispatchError> {
        let _flushing = self.flush_lock.lock();
        self.widget.lock().set_points(points.clone());
        self.emit(points)
    }

    /// Emit both events. Callers hold `flush_lock`.
    fn emit(&self, points: Vec<ControlPoint>) -> Result<FlushOutcome, DispatchError> {
        let snapshot = self.context.snapshot();
        if !snapshot.ready {
            tracing::debug!("piecewise functions not ready, skipping flush");
            return Ok(FlushOutcome::NotReady);
        }
        let Some(selection) = snapshot.selection else {
            tracing::debug!("no image selected, skipping flush");
            return Ok(FlushOutcome::NoSelection);
        };
        let data_range = selection.data_range_or(self.fallback_range);
        let (nodes, range) = opacity_function(data_range, &points);

        tracing::debug!(
            image = %selection.name,
            component = selection.component,
            points = points.len(),
            "dispatching piecewise function [{}, {}]",
            range.min(),
            range.max()
        );

        self.service.send(StateEvent::PointsChanged(PointsChanged {
            name: selection.name.clone(),
            component: selection.component,
            points,
        }))?;
        self.service
            .send(StateEvent::PiecewiseFunctionChanged(PiecewiseFunctionChanged {
                name: selection.name,
                component: selection.component,
                range,
                nodes,
            }))?;
        Ok(FlushOutcome::Dispatched)
    }
}

/// Window `points`, map them into `data_range`, and resolve the range they
/// span.
pub(crate) fn opacity_function(
    data_range: DataRange,
    points: &[ControlPoint],
) -> (Vec<Node>, DataRange) {
    let nodes = normalize(data_range, &window_points(points));
    let range = resolve(data_range, &nodes);
    (nodes, range)
}
