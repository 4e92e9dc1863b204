//! Test doubles shared by the unit tests.

use crate::clock::{ClockDisplay, ClockError, TimeSource, TzFormatter, ZoneFormatter};
use crate::data::CityRecord;
use crate::nav::{ActivateHandler, IndicatorMode, IndicatorPosition, NavView, Rect};
use chrono::{DateTime, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::time::Duration;

pub fn city_list() -> Vec<CityRecord> {
    vec![
        CityRecord::new("London", "london", "Europe/London"),
        CityRecord::new("Tokyo", "tokyo", "Asia/Tokyo"),
        CityRecord::new("New York", "new-york", "America/New_York"),
    ]
}

/// True for `h:mm:ss AM` / `h:mm:ss PM` with an unpadded 1-12 hour.
pub fn is_twelve_hour_time(text: &str) -> bool {
    let Some((time, period)) = text.split_once(' ') else {
        return false;
    };
    if period != "AM" && period != "PM" {
        return false;
    }

    let parts: Vec<&str> = time.split(':').collect();
    let [hour, minute, second] = parts.as_slice() else {
        return false;
    };
    let two_digits_below_60 = |s: &str| {
        s.len() == 2 && s.chars().all(|c| c.is_ascii_digit()) && s.parse::<u32>().unwrap() < 60
    };

    !hour.starts_with('0')
        && matches!(hour.parse::<u32>(), Ok(1..=12))
        && two_digits_below_60(*minute)
        && two_digits_below_60(*second)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    Time(String),
    Alert(String),
}

#[derive(Default)]
pub struct RecordingDisplay {
    entries: RefCell<Vec<DisplayEntry>>,
}

impl RecordingDisplay {
    pub fn entries(&self) -> Vec<DisplayEntry> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<DisplayEntry> {
        self.entries.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ClockDisplay for RecordingDisplay {
    fn show_time(&self, text: &str) {
        self.entries
            .borrow_mut()
            .push(DisplayEntry::Time(text.to_string()));
    }

    fn show_alert(&self, text: &str) {
        self.entries
            .borrow_mut()
            .push(DisplayEntry::Alert(text.to_string()));
    }
}

pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            now: Cell::new(
                Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
                    .unwrap(),
            ),
        }
    }

    pub fn step(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap();
        self.now.set(self.now.get() + delta);
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Real formatter that can be told to fail the next few `format` calls.
#[derive(Default)]
pub struct FlakyFormatter {
    inner: TzFormatter,
    failures_left: Cell<u32>,
}

impl FlakyFormatter {
    pub fn fail_next(&self, count: u32) {
        self.failures_left.set(count);
    }
}

impl ZoneFormatter for FlakyFormatter {
    fn validate(&self, timezone: &str) -> Result<(), ClockError> {
        self.inner.validate(timezone)
    }

    fn format(&self, timezone: &str, now: DateTime<Utc>) -> Result<String, ClockError> {
        let left = self.failures_left.get();
        if left > 0 {
            self.failures_left.set(left - 1);
            return Err(ClockError::Format {
                timezone: timezone.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.format(timezone, now)
    }
}

/// Navigation view with fixed geometry that records what it is told.
pub struct FakeNavView {
    control_count: usize,
    sections: RefCell<Vec<String>>,
    handler: RefCell<Option<ActivateHandler>>,
    active: RefCell<Vec<bool>>,
    placements: RefCell<Vec<(IndicatorPosition, IndicatorMode)>>,
}

const WRAPPER_LEFT: f64 = 10.0;

impl FakeNavView {
    pub fn with_controls(control_count: usize) -> Self {
        Self {
            control_count,
            sections: RefCell::new(Vec::new()),
            handler: RefCell::new(None),
            active: RefCell::new(vec![false; control_count]),
            placements: RefCell::new(Vec::new()),
        }
    }

    fn geometry(index: usize) -> Rect {
        Rect::new(
            WRAPPER_LEFT + 20.0 + 100.0 * index as f64,
            8.0,
            60.0 + 10.0 * index as f64,
            24.0,
        )
    }

    pub fn expected_position(&self, index: usize) -> IndicatorPosition {
        let rect = Self::geometry(index);
        IndicatorPosition {
            offset: rect.left - WRAPPER_LEFT,
            width: rect.width,
        }
    }

    pub fn rendered_sections(&self) -> Vec<String> {
        self.sections.borrow().clone()
    }

    pub fn active_controls(&self) -> Vec<usize> {
        self.active
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn placements(&self) -> Vec<(IndicatorPosition, IndicatorMode)> {
        self.placements.borrow().clone()
    }

    pub fn placement_modes(&self) -> Vec<IndicatorMode> {
        self.placements.borrow().iter().map(|(_, m)| *m).collect()
    }

    /// Simulates the user clicking control `index`.
    pub fn click(&self, index: usize) {
        let handler = self.handler.borrow().clone().expect("controls not rendered");
        handler(index);
    }
}

impl NavView for FakeNavView {
    fn render_controls(&self, cities: &[CityRecord], on_activate: ActivateHandler) {
        *self.sections.borrow_mut() = cities.iter().map(|c| c.section.clone()).collect();
        *self.handler.borrow_mut() = Some(on_activate);
    }

    fn set_active(&self, index: usize) {
        let mut active = self.active.borrow_mut();
        for (i, flag) in active.iter_mut().enumerate() {
            *flag = i == index;
        }
    }

    fn control_rect(&self, index: usize) -> Option<Rect> {
        (index < self.control_count).then(|| Self::geometry(index))
    }

    fn wrapper_rect(&self) -> Option<Rect> {
        Some(Rect::new(WRAPPER_LEFT, 0.0, 800.0, 48.0))
    }

    fn place_indicator(&self, position: IndicatorPosition, mode: IndicatorMode) {
        self.placements.borrow_mut().push((position, mode));
    }
}

#[test]
fn test_twelve_hour_pattern() {
    assert!(is_twelve_hour_time("9:05:03 PM"));
    assert!(is_twelve_hour_time("12:00:00 AM"));
    assert!(!is_twelve_hour_time("09:05:03 PM"));
    assert!(!is_twelve_hour_time("13:00:00 PM"));
    assert!(!is_twelve_hour_time("9:5:03 PM"));
    assert!(!is_twelve_hour_time("9:05:03"));
    assert!(!is_twelve_hour_time(""));
}
