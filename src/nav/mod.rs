//! Navigation bar state machine.
//!
//! The bar is a single-selection radio group: one control per city, exactly
//! one active after initialization. Selection only changes through
//! [`NavigationController::activate`], which also moves the indicator and
//! restarts the clock for the selected city.

pub mod indicator;
mod resize;

pub use indicator::{IndicatorMode, IndicatorPosition, IndicatorPositioner, Rect};
pub use resize::ResizeDebouncer;

use crate::clock::ClockUpdater;
use crate::config::NavConfig;
use crate::data::CityRecord;
use crate::timer::{Scheduler, TimerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Callback invoked with a control's position when the user activates it.
pub type ActivateHandler = Rc<dyn Fn(usize)>;

/// The navigation bar as the controller sees it.
///
/// The browser implementation owns the DOM; tests use a recording fake.
pub trait NavView {
    /// Creates one activatable control per city, in order. `on_activate` is
    /// registered on every control.
    fn render_controls(&self, cities: &[CityRecord], on_activate: ActivateHandler);

    /// Marks control `index` active and every other control inactive.
    fn set_active(&self, index: usize);

    /// Geometry of control `index`, if it exists.
    fn control_rect(&self, index: usize) -> Option<Rect>;

    /// Geometry of the box indicator offsets are measured against.
    fn wrapper_rect(&self) -> Option<Rect>;

    fn place_indicator(&self, position: IndicatorPosition, mode: IndicatorMode);
}

/// Selection and timer slot of the navigation bar.
#[derive(Debug, Default)]
pub struct NavigationState {
    /// Section of the active city
    pub active_section: Option<String>,
    /// Refresh timer of the running clock
    pub timer: Option<TimerHandle>,
}

/// Owns the navigation state and drives the view, indicator and clock.
pub struct NavigationController<V: NavView, S: Scheduler> {
    cities: Vec<CityRecord>,
    view: Rc<V>,
    scheduler: Rc<S>,
    clock: ClockUpdater<S>,
    positioner: IndicatorPositioner<V>,
    resize: ResizeDebouncer,
    state: NavigationState,
    fallback_timezone: String,
}

impl<V, S> NavigationController<V, S>
where
    V: NavView + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        cities: Vec<CityRecord>,
        view: Rc<V>,
        scheduler: Rc<S>,
        clock: ClockUpdater<S>,
        config: &NavConfig,
    ) -> Self {
        Self {
            cities,
            positioner: IndicatorPositioner::new(view.clone()),
            view,
            scheduler,
            clock,
            resize: ResizeDebouncer::new(config.resize_quiet_period),
            state: NavigationState::default(),
            fallback_timezone: config.fallback_timezone.clone(),
        }
    }

    /// Builds a handler that forwards activations to a shared controller.
    ///
    /// Holds only a weak reference, so it never keeps the controller alive.
    pub fn activation_handler(controller: &Rc<RefCell<Self>>) -> ActivateHandler {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(controller);
        Rc::new(move |index: usize| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => {
                    controller.activate_at(index);
                }
                Err(_) => log::warn!("Ignoring activation of control {} during an update", index),
            };
        })
    }

    /// Renders the controls and activates the first city.
    ///
    /// Returns false for an empty city list, in which case nothing is active
    /// and no clock runs.
    pub fn initialize(&mut self, on_activate: ActivateHandler) -> bool {
        self.view.render_controls(&self.cities, on_activate);

        let Some(first) = self.cities.first().cloned() else {
            log::warn!("Navigation data contains no cities");
            return false;
        };

        self.select(0, &first);

        // Let the first layout pass finish before measuring
        let positioner = self.positioner.clone();
        if let Err(e) = self.scheduler.set_timeout(
            Duration::ZERO,
            Box::new(move || {
                positioner.move_to_active(IndicatorMode::Animated);
            }),
        ) {
            log::warn!("Initial indicator placement not scheduled: {}", e);
        }

        self.restart_clock(&first);
        log::info!(
            "Navigation ready with {} cities, active: {}",
            self.cities.len(),
            first.section
        );
        true
    }

    /// Makes the first city with `section` the active one.
    ///
    /// Unknown sections are ignored and return false.
    pub fn activate(&mut self, section: &str) -> bool {
        let Some(index) = self.cities.iter().position(|c| c.section == section) else {
            log::warn!("No city with section '{}'", section);
            return false;
        };
        self.activate_at(index)
    }

    /// Makes the city at `index` the active one.
    ///
    /// Deactivates every other control, moves the indicator and restarts the
    /// clock. Out of range indices are ignored and return false.
    pub fn activate_at(&mut self, index: usize) -> bool {
        let Some(city) = self.cities.get(index).cloned() else {
            log::warn!("No city at position {}", index);
            return false;
        };

        self.select(index, &city);
        self.positioner.move_to_active(IndicatorMode::Animated);
        self.restart_clock(&city);

        log::debug!("Activated {} ({})", city.label, city.section);
        true
    }

    /// Handles a viewport resize event.
    pub fn handle_resize(&mut self) {
        self.resize.on_resize(self.scheduler.as_ref(), &self.positioner);
    }

    pub fn active_section(&self) -> Option<&str> {
        self.state.active_section.as_deref()
    }

    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.state.timer
    }

    fn select(&mut self, index: usize, city: &CityRecord) {
        self.view.set_active(index);
        self.positioner.set_target(Some(index));
        self.state.active_section = Some(city.section.clone());
    }

    fn restart_clock(&mut self, city: &CityRecord) {
        let timezone = city.timezone_or(&self.fallback_timezone);
        // Failures are logged and shown by the clock; the bar keeps working
        let _ = self.clock.restart(&mut self.state.timer, timezone);
    }
}
