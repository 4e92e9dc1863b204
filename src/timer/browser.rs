//! `window.setInterval` / `window.setTimeout` backed scheduler.

use super::registry::ClosureRegistry;
use super::{duration_to_millis, ScheduleError, Scheduler, TimerHandle, TimerKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type Callbacks = Rc<RefCell<ClosureRegistry<Closure<dyn FnMut()>>>>;

/// Scheduler using the browser's timer functions.
///
/// Every closure handed to the browser is owned here, since dropping a
/// `Closure` invalidates the JS function the browser still holds. Closures
/// are released when their timer is cancelled or, for timeouts, after they
/// have run.
#[derive(Clone)]
pub struct BrowserScheduler {
    window: web_sys::Window,
    intervals: Callbacks,
    timeouts: Callbacks,
}

impl BrowserScheduler {
    pub fn new() -> Result<Self, ScheduleError> {
        let window =
            web_sys::window().ok_or_else(|| ScheduleError("window not available".to_string()))?;
        Ok(Self {
            window,
            intervals: Rc::new(RefCell::new(ClosureRegistry::new())),
            timeouts: Rc::new(RefCell::new(ClosureRegistry::new())),
        })
    }
}

impl Scheduler for BrowserScheduler {
    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<TimerHandle, ScheduleError> {
        let closure = Closure::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                duration_to_millis(period),
            )
            .map_err(|e| ScheduleError(format!("{:?}", e)))?;

        self.intervals.borrow_mut().insert(id, closure);
        Ok(TimerHandle {
            id,
            kind: TimerKind::Interval,
        })
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<TimerHandle, ScheduleError> {
        self.timeouts.borrow_mut().purge_spent();

        // Weak, so the registry and its closures don't keep each other alive
        let registry = Rc::downgrade(&self.timeouts);
        let own_id = Rc::new(Cell::new(None::<i32>));
        let assigned_id = own_id.clone();
        let mut callback = Some(callback);

        let closure = Closure::<dyn FnMut()>::new(move || {
            if let (Some(registry), Some(id)) = (registry.upgrade(), own_id.get()) {
                registry.borrow_mut().retire(id);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
        });

        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                duration_to_millis(delay),
            )
            .map_err(|e| ScheduleError(format!("{:?}", e)))?;

        assigned_id.set(Some(id));
        self.timeouts.borrow_mut().insert(id, closure);
        Ok(TimerHandle {
            id,
            kind: TimerKind::Timeout,
        })
    }

    fn cancel(&self, handle: TimerHandle) {
        match handle.kind {
            TimerKind::Interval => {
                self.window.clear_interval_with_handle(handle.id);
                self.intervals.borrow_mut().remove(handle.id);
            }
            TimerKind::Timeout => {
                self.window.clear_timeout_with_handle(handle.id);
                self.timeouts.borrow_mut().remove(handle.id);
            }
        }
    }
}
