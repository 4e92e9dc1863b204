//! Live clock for the active city's timezone.
//!
//! The clock validates a timezone once, renders the time immediately, then
//! re-renders on a repeating timer. Only one refresh timer exists at a time:
//! the caller owns the timer slot and [`ClockUpdater::restart`] always
//! empties it before scheduling a replacement.
//!
//! Formatting goes through [`ZoneFormatter`]. The browser build asks the
//! platform's `Intl.DateTimeFormat`; native builds use the tz database
//! bundled by `chrono-tz`.

#[cfg(target_arch = "wasm32")]
mod intl;
#[cfg(not(target_arch = "wasm32"))]
mod tz;

#[cfg(target_arch = "wasm32")]
pub use intl::IntlFormatter;
#[cfg(not(target_arch = "wasm32"))]
pub use tz::TzFormatter;

use crate::timer::{cancel_slot, Scheduler, TimerHandle};
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Errors raised by the clock. None of them are fatal to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockError {
    /// The platform rejected the timezone identifier.
    InvalidTimeZone(String),
    /// Formatting failed for a timezone that validated earlier.
    Format { timezone: String, reason: String },
    /// The refresh timer could not be started.
    Schedule(String),
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::InvalidTimeZone(tz) => write!(f, "Invalid timezone specified: {}", tz),
            ClockError::Format { timezone, reason } => {
                write!(f, "Error formatting time for timezone {}: {}", timezone, reason)
            }
            ClockError::Schedule(msg) => write!(f, "Clock timer failed: {}", msg),
        }
    }
}

impl std::error::Error for ClockError {}

/// Formats wall-clock time in a named timezone as `h:mm:ss AM`.
pub trait ZoneFormatter {
    /// Succeeds if a formatter can be built for `timezone`.
    fn validate(&self, timezone: &str) -> Result<(), ClockError>;

    /// Formats `now` in `timezone` using a 12-hour clock.
    fn format(&self, timezone: &str, now: DateTime<Utc>) -> Result<String, ClockError>;
}

/// Source of the current instant.
pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The element the time is written into.
pub trait ClockDisplay {
    /// Shows a formatted time in the normal color.
    fn show_time(&self, text: &str);

    /// Shows an error message in the alert color.
    fn show_alert(&self, text: &str);
}

/// One refresh of the display. Cloned into the interval callback.
#[derive(Clone)]
struct RefreshTick {
    timezone: String,
    formatter: Rc<dyn ZoneFormatter>,
    time_source: Rc<dyn TimeSource>,
    display: Rc<dyn ClockDisplay>,
    error_message: Rc<str>,
    failure_streak: Rc<Cell<u32>>,
}

impl RefreshTick {
    fn run(&self) {
        match self.formatter.format(&self.timezone, self.time_source.now()) {
            Ok(text) => {
                if self.failure_streak.replace(0) > 0 {
                    log::info!("Clock for {} recovered", self.timezone);
                }
                self.display.show_time(&text);
            }
            Err(e) => {
                let streak = self.failure_streak.get() + 1;
                self.failure_streak.set(streak);
                if streak == 1 {
                    log::warn!("{}", e);
                } else {
                    log::debug!("{} (failure {} in a row)", e, streak);
                }
                self.display.show_alert(&self.error_message);
            }
        }
    }
}

/// Starts and restarts the periodic clock refresh.
pub struct ClockUpdater<S: Scheduler> {
    scheduler: Rc<S>,
    formatter: Rc<dyn ZoneFormatter>,
    time_source: Rc<dyn TimeSource>,
    display: Rc<dyn ClockDisplay>,
    refresh_interval: Duration,
    invalid_message: String,
    format_error_message: Rc<str>,
}

impl<S: Scheduler + 'static> ClockUpdater<S> {
    pub fn new(
        scheduler: Rc<S>,
        formatter: Rc<dyn ZoneFormatter>,
        time_source: Rc<dyn TimeSource>,
        display: Rc<dyn ClockDisplay>,
    ) -> Self {
        let defaults = crate::config::NavConfig::default();
        Self {
            scheduler,
            formatter,
            time_source,
            display,
            refresh_interval: defaults.refresh_interval,
            invalid_message: defaults.invalid_timezone_message,
            format_error_message: defaults.format_error_message.into(),
        }
    }

    /// Applies interval and messages from the configuration.
    pub fn with_config(mut self, config: &crate::config::NavConfig) -> Self {
        self.refresh_interval = config.refresh_interval;
        self.invalid_message = config.invalid_timezone_message.clone();
        self.format_error_message = config.format_error_message.as_str().into();
        self
    }

    /// Stops the timer in `slot` and starts a clock for `timezone`.
    ///
    /// On an invalid timezone the display shows the error message and the
    /// slot stays empty. Otherwise the time is rendered immediately and the
    /// new timer is stored in the slot.
    pub fn restart(
        &self,
        slot: &mut Option<TimerHandle>,
        timezone: &str,
    ) -> Result<(), ClockError> {
        cancel_slot(self.scheduler.as_ref(), slot);

        if let Err(e) = self.formatter.validate(timezone) {
            self.display.show_alert(&self.invalid_message);
            log::error!("{}", e);
            return Err(e);
        }

        let tick = RefreshTick {
            timezone: timezone.to_string(),
            formatter: self.formatter.clone(),
            time_source: self.time_source.clone(),
            display: self.display.clone(),
            error_message: self.format_error_message.clone(),
            failure_streak: Rc::new(Cell::new(0)),
        };
        tick.run();

        let handle = self
            .scheduler
            .set_interval(self.refresh_interval, Box::new(move || tick.run()))
            .map_err(|e| {
                log::error!("{}", e);
                ClockError::Schedule(e.to_string())
            })?;

        log::debug!("Clock started for {}", timezone);
        *slot = Some(handle);
        Ok(())
    }
}
