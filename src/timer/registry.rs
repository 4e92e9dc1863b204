//! Ownership of the callbacks handed to the host's timer functions.

use std::collections::HashMap;

/// Holds timer callbacks until they can no longer run.
///
/// A callback is dropped when its timer is cancelled. A one-shot callback
/// that has fired cannot be dropped from inside its own invocation, so it
/// is parked as spent and released on the next `purge_spent`.
pub struct ClosureRegistry<T> {
    live: HashMap<i32, T>,
    spent: Vec<T>,
}

impl<T> Default for ClosureRegistry<T> {
    fn default() -> Self {
        Self {
            live: HashMap::new(),
            spent: Vec::new(),
        }
    }
}

impl<T> ClosureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: i32, callback: T) {
        self.live.insert(id, callback);
    }

    /// Takes the callback of a cancelled timer.
    pub fn remove(&mut self, id: i32) -> Option<T> {
        self.live.remove(&id)
    }

    /// Marks the callback of a timer that is running for the last time.
    pub fn retire(&mut self, id: i32) {
        if let Some(callback) = self.live.remove(&id) {
            self.spent.push(callback);
        }
    }

    /// Drops every retired callback.
    pub fn purge_spent(&mut self) {
        self.spent.clear();
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spent_count(&self) -> usize {
        self.spent.len()
    }
}
