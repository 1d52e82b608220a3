//! Outbound side: where state-change events go.

use parking_lot::Mutex;
use piecewise_core::StateEvent;
use tokio::sync::mpsc;

use crate::error::DispatchError;

/// The application's central state service.
pub trait StateService: Send + Sync {
    fn send(&self, event: StateEvent) -> Result<(), DispatchError>;
}

impl StateService for mpsc::UnboundedSender<StateEvent> {
    fn send(&self, event: StateEvent) -> Result<(), DispatchError> {
        let name = event.type_name();
        mpsc::UnboundedSender::send(self, event)
            .map_err(|_| DispatchError::ServiceClosed { event: name })
    }
}

/// In-process queue of outbound events.
///
/// The dispatcher queues events via `send()`, and the owner drains them when
/// convenient (e.g. once per frame).
#[derive(Debug, Default)]
pub struct OutboundStateEvents {
    events: Mutex<Vec<StateEvent>>,
}

impl OutboundStateEvents {
    /// Drain all queued events, returning them in send order.
    pub fn drain(&self) -> Vec<StateEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl StateService for OutboundStateEvents {
    fn send(&self, event: StateEvent) -> Result<(), DispatchError> {
        self.events.lock().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use piecewise_core::PointsChanged;

    use super::*;

    fn points_changed() -> StateEvent {
        StateEvent::PointsChanged(PointsChanged {
            name: "ct".into(),
            component: 0,
            points: Vec::new(),
        })
    }

    #[test]
    fn test_outbound_queue_drains_in_order() {
        let outbound = OutboundStateEvents::default();
        outbound.send(points_changed()).unwrap();
        outbound.send(points_changed()).unwrap();
        assert_eq!(outbound.len(), 2);
        assert_eq!(outbound.drain().len(), 2);
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_closed_channel_reports_event_type() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let err = StateService::send(&tx, points_changed()).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ServiceClosed {
                event: "IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED"
            }
        ));
    }
}
