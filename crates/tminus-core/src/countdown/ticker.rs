//! Recurring refresh tick for live countdown views.
//!
//! A view acquires a [`TickHandle`] when it starts displaying a countdown and
//! the tick stops when the handle is cancelled or dropped, so replacing or
//! closing a view can never leave a timer running behind it.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default refresh period.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl Ticker {
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `on_tick` now and then once per period until it returns
    /// `ControlFlow::Break` or the handle goes away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, mut on_tick: F) -> TickHandle
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A stalled display should catch up to "now", not replay old ticks.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });
        TickHandle { task: Some(task) }
    }
}

/// Ownership of a running tick. Dropping it cancels the tick.
#[derive(Debug)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Stop ticking.
    pub fn cancel(mut self) {
        self.abort();
    }

    /// Wait until the tick loop ends on its own. Dropping the returned
    /// future cancels the tick like dropping the handle.
    pub async fn join(mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!("tick task ended abnormally: {e}");
                }
            }
        }
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
