//! Runtime configuration for the navigation bar and clock.
//!
//! Everything the controller needs to find in the host document, plus the
//! timing constants, lives here so the browser bootstrap and the tests can
//! share one definition.

use std::time::Duration;

/// Configuration for the navigation and clock controller.
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Relative URL of the navigation document.
    pub data_url: String,
    /// Id of the element the city controls are appended to.
    pub nav_container_id: String,
    /// Selector of the box the indicator offset is measured against.
    pub wrapper_selector: String,
    /// Selector of the active indicator element.
    pub indicator_selector: String,
    /// Id of the element showing the time.
    pub time_display_id: String,
    /// Id of the companion tab panel, if the page has one.
    pub panel_id: Option<String>,
    /// How often the clock is re-rendered.
    pub refresh_interval: Duration,
    /// Quiet period after the last resize before the animated settle.
    pub resize_quiet_period: Duration,
    /// Timezone used when a city record has none.
    pub fallback_timezone: String,
    /// Shown when a city's timezone is rejected.
    pub invalid_timezone_message: String,
    /// Shown when a refresh tick fails to format the time.
    pub format_error_message: String,
    /// CSS color for error text in the clock area.
    pub alert_color: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            data_url: "../assets/data/navigation.json".to_string(),
            nav_container_id: "header-nav".to_string(),
            wrapper_selector: ".header__wrapper".to_string(),
            indicator_selector: ".indicator".to_string(),
            time_display_id: "time-value".to_string(),
            panel_id: Some("time-panel".to_string()),
            refresh_interval: Duration::from_secs(1),
            resize_quiet_period: Duration::from_millis(100),
            fallback_timezone: "UTC".to_string(),
            invalid_timezone_message: "Invalid timezone!".to_string(),
            format_error_message: "Time format error!".to_string(),
            alert_color: "red".to_string(),
        }
    }
}

impl NavConfig {
    /// Sets the URL the navigation document is fetched from.
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }
}
