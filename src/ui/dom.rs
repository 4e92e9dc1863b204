//! DOM implementation of the navigation view and clock display.

use crate::clock::ClockDisplay;
use crate::config::NavConfig;
use crate::data::{CityRecord, LoadError};
use crate::nav::{ActivateHandler, IndicatorMode, IndicatorPosition, NavView, Rect};
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

const LINK_CLASS: &str = "nav-link";
const ACTIVE_CLASS: &str = "active";

/// Handles to the page elements the controller drives.
pub struct DomView {
    document: Document,
    nav: Element,
    wrapper: Element,
    indicator: HtmlElement,
    time: HtmlElement,
    panel: Option<Element>,
    alert_color: String,
    controls: RefCell<Vec<HtmlElement>>,
}

impl DomView {
    /// Looks up the pre-existing page elements.
    pub fn from_document(config: &NavConfig) -> Result<Self, LoadError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| LoadError::Dom("document".to_string()))?;

        let nav = by_id(&document, &config.nav_container_id)?;
        let wrapper = by_selector(&document, &config.wrapper_selector)?;
        let indicator = html(by_selector(&document, &config.indicator_selector)?)?;
        let time = html(by_id(&document, &config.time_display_id)?)?;
        let panel = config
            .panel_id
            .as_deref()
            .and_then(|id| document.get_element_by_id(id));

        Ok(Self {
            document,
            nav,
            wrapper,
            indicator,
            time,
            panel,
            alert_color: config.alert_color.clone(),
            controls: RefCell::new(Vec::new()),
        })
    }

    fn create_control(
        &self,
        index: usize,
        city: &CityRecord,
        on_activate: &ActivateHandler,
    ) -> Result<HtmlElement, JsValue> {
        let link = html_js(self.document.create_element("a")?)?;
        link.set_class_name(LINK_CLASS);
        link.set_attribute("href", &format!("#{}", city.section))?;
        link.set_attribute("data-section", &city.section)?;
        link.set_attribute("data-timezone", city.timezone.as_deref().unwrap_or_default())?;
        link.set_id(&tab_id(&city.section));
        link.set_attribute("role", "tab")?;
        link.set_attribute("aria-selected", "false")?;
        link.set_attribute("tabindex", "-1")?;
        if let Some(panel) = &self.panel {
            link.set_attribute("aria-controls", &panel.id())?;
        }
        link.set_text_content(Some(&city.label));

        let handler = on_activate.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            handler(index);
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Controls live as long as the page
        on_click.forget();

        Ok(link)
    }
}

impl NavView for DomView {
    fn render_controls(&self, cities: &[CityRecord], on_activate: ActivateHandler) {
        if let Err(e) = self.nav.set_attribute("role", "tablist") {
            log::warn!("Failed to set tablist role: {:?}", e);
        }
        if let Some(panel) = &self.panel {
            if let Err(e) = panel.set_attribute("role", "tabpanel") {
                log::warn!("Failed to set tabpanel role: {:?}", e);
            }
        }

        let mut controls = self.controls.borrow_mut();
        for (index, city) in cities.iter().enumerate() {
            let appended = self
                .create_control(index, city, &on_activate)
                .and_then(|link| self.nav.append_child(&link).map(|_| link));
            match appended {
                Ok(link) => controls.push(link),
                Err(e) => log::error!("Failed to render control for {}: {:?}", city.section, e),
            }
        }
    }

    fn set_active(&self, index: usize) {
        let controls = self.controls.borrow();
        for (i, link) in controls.iter().enumerate() {
            let active = i == index;
            let class_list = link.class_list();
            let result = if active {
                class_list.add_1(ACTIVE_CLASS)
            } else {
                class_list.remove_1(ACTIVE_CLASS)
            }
            .and_then(|_| link.set_attribute("aria-selected", if active { "true" } else { "false" }))
            .and_then(|_| link.set_attribute("tabindex", if active { "0" } else { "-1" }));

            if let Err(e) = result {
                log::warn!("Failed to update control state: {:?}", e);
            }
        }

        if let (Some(panel), Some(link)) = (&self.panel, controls.get(index)) {
            if let Err(e) = panel.set_attribute("aria-labelledby", &link.id()) {
                log::warn!("Failed to label time panel: {:?}", e);
            }
        }
    }

    fn control_rect(&self, index: usize) -> Option<Rect> {
        self.controls.borrow().get(index).map(|link| rect_of(link))
    }

    fn wrapper_rect(&self) -> Option<Rect> {
        Some(rect_of(&self.wrapper))
    }

    fn place_indicator(&self, position: IndicatorPosition, mode: IndicatorMode) {
        let style = self.indicator.style();
        let result = match mode {
            IndicatorMode::Immediate => style.set_property("transition", "none"),
            IndicatorMode::Animated => style.remove_property("transition").map(|_| ()),
        }
        .and_then(|_| style.set_property("left", &format!("{}px", position.offset)))
        .and_then(|_| style.set_property("width", &format!("{}px", position.width)));

        if let Err(e) = result {
            log::warn!("Failed to move indicator: {:?}", e);
        }
    }
}

impl ClockDisplay for DomView {
    fn show_time(&self, text: &str) {
        self.time.set_text_content(Some(text));
        if let Err(e) = self.time.style().remove_property("color") {
            log::warn!("Failed to clear time color: {:?}", e);
        }
    }

    fn show_alert(&self, text: &str) {
        self.time.set_text_content(Some(text));
        if let Err(e) = self.time.style().set_property("color", &self.alert_color) {
            log::warn!("Failed to set alert color: {:?}", e);
        }
    }
}

fn tab_id(section: &str) -> String {
    format!("tab-{}", section)
}

fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn by_id(document: &Document, id: &str) -> Result<Element, LoadError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| LoadError::Dom(format!("#{}", id)))
}

fn by_selector(document: &Document, selector: &str) -> Result<Element, LoadError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| LoadError::Dom(selector.to_string()))
}

fn html(element: Element) -> Result<HtmlElement, LoadError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|e| LoadError::Dom(format!("{:?} is not an HTML element", e)))
}

fn html_js(element: Element) -> Result<HtmlElement, JsValue> {
    element.dyn_into::<HtmlElement>().map_err(JsValue::from)
}
