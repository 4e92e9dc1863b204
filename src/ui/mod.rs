//! Browser DOM binding.
//!
//! The page provides the navigation container, the indicator and the time
//! display; this module creates the city controls inside it and implements
//! the view traits the controller talks to.

mod dom;

pub use dom::DomView;

use crate::app::SharedController;
use crate::timer::BrowserScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Forwards window resize events to the controller for the page lifetime.
pub fn listen_for_resize(
    controller: SharedController<DomView, BrowserScheduler>,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;

    let on_resize = Closure::<dyn FnMut()>::new(move || {
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.handle_resize();
        }
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    Ok(())
}
