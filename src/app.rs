//! Startup sequence: load, render, activate the first city, start its clock.
//!
//! The sequence runs to completion before any user activation can happen,
//! since control handlers only fire from the event loop.

use crate::clock::{ClockDisplay, ClockUpdater, SystemClock, ZoneFormatter};
use crate::config::NavConfig;
use crate::data::{CityRecord, LoadError};
use crate::nav::{NavView, NavigationController};
use crate::timer::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the running controller.
pub type SharedController<V, S> = Rc<RefCell<NavigationController<V, S>>>;

/// Everything the controller needs from its host.
pub struct Host<V, S> {
    pub view: Rc<V>,
    pub display: Rc<dyn ClockDisplay>,
    pub scheduler: Rc<S>,
    pub formatter: Rc<dyn ZoneFormatter>,
}

/// Builds and initializes the controller from a load result.
///
/// A failed load is logged and nothing is rendered.
pub fn mount<V, S>(
    loaded: Result<Vec<CityRecord>, LoadError>,
    host: Host<V, S>,
    config: &NavConfig,
) -> Option<SharedController<V, S>>
where
    V: NavView + 'static,
    S: Scheduler + 'static,
{
    let cities = match loaded {
        Ok(cities) => cities,
        Err(e) => {
            log::error!("Error loading navigation data: {}", e);
            return None;
        }
    };

    let clock = ClockUpdater::new(
        host.scheduler.clone(),
        host.formatter,
        Rc::new(SystemClock),
        host.display,
    )
    .with_config(config);

    let controller = Rc::new(RefCell::new(NavigationController::new(
        cities,
        host.view,
        host.scheduler,
        clock,
        config,
    )));

    let on_activate = NavigationController::activation_handler(&controller);
    controller.borrow_mut().initialize(on_activate);

    Some(controller)
}

/// Browser entry: fetch the document, bind to the page and run.
#[cfg(target_arch = "wasm32")]
pub async fn run(config: NavConfig) {
    use crate::clock::IntlFormatter;
    use crate::timer::BrowserScheduler;
    use crate::ui::{listen_for_resize, DomView};

    let loaded = crate::data::load_navigation(&config.data_url).await;

    let view = match DomView::from_document(&config) {
        Ok(view) => Rc::new(view),
        Err(e) => {
            log::error!("Cannot bind to page: {}", e);
            return;
        }
    };
    let scheduler = match BrowserScheduler::new() {
        Ok(scheduler) => Rc::new(scheduler),
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    let host = Host {
        view: view.clone(),
        display: view.clone(),
        scheduler,
        formatter: Rc::new(IntlFormatter),
    };

    if let Some(controller) = mount(loaded, host, &config) {
        if let Err(e) = listen_for_resize(controller) {
            log::warn!("Resize handling unavailable: {}", e);
        }
    }
}
