//! Deterministic scheduler for tests.
//!
//! Time only moves when `advance` is called. Tasks fire in due order; tasks
//! due at the same instant fire in scheduling order.

use super::{ScheduleError, Scheduler, TimerHandle, TimerKind};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

enum Task {
    Repeating(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    due: Duration,
    period: Option<Duration>,
    task: Task,
}

/// Operations recorded by the scheduler, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Set(TimerHandle),
    Cancel(TimerHandle),
}

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: i32,
    tasks: BTreeMap<i32, Entry>,
    cancelled: HashSet<i32>,
    ops: Vec<Op>,
}

#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<Inner>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn ops(&self) -> Vec<Op> {
        self.inner.borrow().ops.clone()
    }

    pub fn live_intervals(&self) -> usize {
        self.count_live(TimerKind::Interval)
    }

    pub fn live_timeouts(&self) -> usize {
        self.count_live(TimerKind::Timeout)
    }

    fn count_live(&self, kind: TimerKind) -> usize {
        self.inner
            .borrow()
            .tasks
            .values()
            .filter(|entry| {
                let entry_kind = if entry.period.is_some() {
                    TimerKind::Interval
                } else {
                    TimerKind::Timeout
                };
                entry_kind == kind
            })
            .count()
    }

    /// Moves virtual time forward, firing every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;

        loop {
            let next = {
                let inner = self.inner.borrow();
                inner
                    .tasks
                    .iter()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(id, entry)| (entry.due, **id))
                    .map(|(id, _)| *id)
            };
            let Some(id) = next else { break };

            // Take the task out so the callback can freely call back into us
            let entry = {
                let mut inner = self.inner.borrow_mut();
                let Some(entry) = inner.tasks.remove(&id) else {
                    break;
                };
                inner.now = entry.due;
                entry
            };

            match entry.task {
                Task::Once(callback) => callback(),
                Task::Repeating(mut callback) => {
                    callback();
                    let mut inner = self.inner.borrow_mut();
                    if !inner.cancelled.contains(&id) {
                        let period = entry.period.unwrap_or_default();
                        inner.tasks.insert(
                            id,
                            Entry {
                                due: entry.due + period,
                                period: entry.period,
                                task: Task::Repeating(callback),
                            },
                        );
                    }
                }
            }
        }

        self.inner.borrow_mut().now = target;
    }

    fn schedule(&self, due_in: Duration, period: Option<Duration>, task: Task) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let kind = if period.is_some() {
            TimerKind::Interval
        } else {
            TimerKind::Timeout
        };
        let due = inner.now + due_in;
        inner.tasks.insert(id, Entry { due, period, task });
        let handle = TimerHandle { id, kind };
        inner.ops.push(Op::Set(handle));
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<TimerHandle, ScheduleError> {
        if period.is_zero() {
            return Err(ScheduleError("zero-length interval".to_string()));
        }
        Ok(self.schedule(period, Some(period), Task::Repeating(callback)))
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<TimerHandle, ScheduleError> {
        Ok(self.schedule(delay, None, Task::Once(callback)))
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.tasks.remove(&handle.id);
        inner.cancelled.insert(handle.id);
        inner.ops.push(Op::Cancel(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_interval_fires_each_period() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        scheduler
            .set_interval(Duration::from_secs(1), Box::new(move || c.set(c.get() + 1)))
            .unwrap();

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(count.get(), 0);

        scheduler.advance(Duration::from_millis(2001));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_cancelled_timeout_never_fires() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let handle = scheduler
            .set_timeout(Duration::from_millis(100), Box::new(move || f.set(true)))
            .unwrap();

        scheduler.cancel(handle);
        scheduler.advance(Duration::from_secs(1));

        assert!(!fired.get());
        assert_eq!(scheduler.live_timeouts(), 0);
    }
}
