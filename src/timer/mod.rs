//! Timer scheduling abstraction.
//!
//! The clock and the resize debouncer only ever need "run this every N" and
//! "run this once after N", each cancellable by handle. On WASM these map to
//! `window.setInterval` / `window.setTimeout`; tests drive a manual scheduler
//! with a virtual clock instead.
//!
//! Note: callbacks are not `Send` since WASM is single-threaded and the
//! callbacks capture DOM handles.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(test)]
pub mod manual;
pub mod registry;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserScheduler;

use std::time::Duration;

/// Which kind of task a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Interval,
    Timeout,
}

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub id: i32,
    pub kind: TimerKind,
}

/// Error returned when the host refuses to schedule a task.
#[derive(Debug, Clone)]
pub struct ScheduleError(pub String);

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to schedule timer: {}", self.0)
    }
}

impl std::error::Error for ScheduleError {}

/// Schedules repeating and one-shot callbacks.
pub trait Scheduler {
    /// Runs `callback` every `period` until cancelled.
    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<TimerHandle, ScheduleError>;

    /// Runs `callback` once after `delay` unless cancelled first.
    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<TimerHandle, ScheduleError>;

    /// Cancels a task. Cancelling an already finished task is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// Cancels whatever occupies `slot`, leaving it empty.
///
/// Every single-slot timer in the app goes through this before scheduling a
/// replacement, so at most one task per slot is ever alive.
pub fn cancel_slot<S: Scheduler + ?Sized>(scheduler: &S, slot: &mut Option<TimerHandle>) {
    if let Some(handle) = slot.take() {
        scheduler.cancel(handle);
    }
}

/// Converts a duration to the millisecond argument the browser timers take.
pub fn duration_to_millis(duration: Duration) -> i32 {
    duration.as_millis().min(i32::MAX as u128) as i32
}
