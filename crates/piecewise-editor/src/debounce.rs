//! Trailing-edge debouncing on a tokio runtime.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Runs only the most recently scheduled task, once `delay` has passed
/// without a newer schedule.
///
/// Holds at most one pending task. Scheduling aborts the previous task if it
/// has not fired yet. Dropping the debouncer aborts the pending task.
pub struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `task`, due after the delay.
    ///
    /// Safe to call from any thread, inside or outside the runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take()
            && !previous.is_finished()
        {
            previous.abort();
            tracing::trace!("debounce: superseded pending task");
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        }));
    }

    /// Whether a scheduled task has yet to run.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort the pending task, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
