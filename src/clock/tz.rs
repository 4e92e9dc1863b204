//! Timezone formatting backed by the `chrono-tz` database.

use super::{ClockError, ZoneFormatter};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 12-hour clock with unpadded hour, e.g. `9:05:03 PM`.
const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Formatter for native builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzFormatter;

impl TzFormatter {
    fn zone(timezone: &str) -> Result<Tz, ClockError> {
        timezone
            .parse::<Tz>()
            .map_err(|_| ClockError::InvalidTimeZone(timezone.to_string()))
    }
}

impl ZoneFormatter for TzFormatter {
    fn validate(&self, timezone: &str) -> Result<(), ClockError> {
        Self::zone(timezone).map(|_| ())
    }

    fn format(&self, timezone: &str, now: DateTime<Utc>) -> Result<String, ClockError> {
        let tz = Self::zone(timezone).map_err(|_| ClockError::Format {
            timezone: timezone.to_string(),
            reason: "unknown timezone".to_string(),
        })?;
        Ok(now.with_timezone(&tz).format(TIME_FORMAT).to_string())
    }
}
