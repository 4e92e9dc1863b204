//! Timezone formatting through the browser's `Intl.DateTimeFormat`.
//!
//! `js_sys::Intl::DateTimeFormat::new` does not surface the `RangeError`
//! thrown for an unknown `timeZone`, so the constructor is bound here with
//! `catch`.

use super::{ClockError, ZoneFormatter};
use chrono::{DateTime, Utc};
use js_sys::{Array, Date, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Intl, js_name = DateTimeFormat)]
    fn date_time_format(locales: &JsValue, options: &JsValue) -> Result<Object, JsValue>;
}

const LOCALE: &str = "en-US";

/// Formatter for the browser build.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntlFormatter;

impl IntlFormatter {
    fn build(timezone: &str, with_fields: bool) -> Result<Object, JsValue> {
        let options = Object::new();
        Reflect::set(&options, &"timeZone".into(), &timezone.into())?;
        if with_fields {
            Reflect::set(&options, &"hour".into(), &"numeric".into())?;
            Reflect::set(&options, &"minute".into(), &"numeric".into())?;
            Reflect::set(&options, &"second".into(), &"numeric".into())?;
            Reflect::set(&options, &"hour12".into(), &JsValue::TRUE)?;
        }

        let locales = Array::of1(&LOCALE.into());
        date_time_format(&locales, &options)
    }
}

impl ZoneFormatter for IntlFormatter {
    fn validate(&self, timezone: &str) -> Result<(), ClockError> {
        if timezone.is_empty() {
            return Err(ClockError::InvalidTimeZone(timezone.to_string()));
        }
        Self::build(timezone, false)
            .map(|_| ())
            .map_err(|_| ClockError::InvalidTimeZone(timezone.to_string()))
    }

    fn format(&self, timezone: &str, now: DateTime<Utc>) -> Result<String, ClockError> {
        let format_error = |e: JsValue| ClockError::Format {
            timezone: timezone.to_string(),
            reason: format!("{:?}", e),
        };

        let formatter = Self::build(timezone, true).map_err(format_error)?;
        let format_fn: Function = Reflect::get(&formatter, &"format".into())
            .map_err(format_error)?
            .dyn_into()
            .map_err(format_error)?;

        let date = Date::new(&JsValue::from_f64(now.timestamp_millis() as f64));
        let text = format_fn
            .call1(&formatter, &date)
            .map_err(format_error)?
            .as_string()
            .ok_or_else(|| ClockError::Format {
                timezone: timezone.to_string(),
                reason: "format() did not return a string".to_string(),
            })?;

        // Newer ICU data puts U+202F before the day period
        Ok(text.replace('\u{202F}', " "))
    }
}
