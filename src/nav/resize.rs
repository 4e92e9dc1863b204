//! Debounced indicator settling on viewport resize.

use super::indicator::{IndicatorMode, IndicatorPositioner};
use super::NavView;
use crate::timer::{cancel_slot, Scheduler, TimerHandle};
use std::time::Duration;

/// Keeps the indicator glued to the active control while the window resizes.
///
/// Each resize event moves the indicator immediately and replaces the
/// pending settle task; the animated settle runs once the events stop for
/// the quiet period.
pub struct ResizeDebouncer {
    quiet_period: Duration,
    pending: Option<TimerHandle>,
}

impl ResizeDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn on_resize<V, S>(&mut self, scheduler: &S, positioner: &IndicatorPositioner<V>)
    where
        V: NavView + 'static,
        S: Scheduler,
    {
        positioner.move_to_active(IndicatorMode::Immediate);

        cancel_slot(scheduler, &mut self.pending);
        let settle = positioner.clone();
        match scheduler.set_timeout(
            self.quiet_period,
            Box::new(move || {
                settle.move_to_active(IndicatorMode::Animated);
            }),
        ) {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => log::warn!("Resize settle not scheduled: {}", e),
        }
    }
}
