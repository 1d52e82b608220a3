//! Simulated pointer input.

use std::time::Duration;

use piecewise_core::ControlPoint;
use piecewise_editor::{HeadlessWidget, PiecewiseEditor};

/// Drag point `index` from its current position to `to` in `steps` moves,
/// pausing `interval` between moves like a pointer would.
pub async fn drag_point(
    editor: &PiecewiseEditor<HeadlessWidget>,
    index: usize,
    to: ControlPoint,
    steps: usize,
    interval: Duration,
) {
    let Some(from) = editor.points().get(index).copied() else {
        tracing::warn!("no point {index} to drag");
        return;
    };
    let steps = steps.max(1);
    for step in 1..=steps {
        let t = step as f64 / steps as f64;
        let at = ControlPoint::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        editor.with_widget(|widget| widget.drag_point(index, at));
        tracing::trace!("drag {step}/{steps}: ({:.3}, {:.3})", at.x, at.y);
        tokio::time::sleep(interval).await;
    }
}
