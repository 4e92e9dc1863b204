//! Navigation data: the city records shown in the header bar.
//!
//! The document is a single JSON object with a `cities` array. It is loaded
//! once at startup and never mutated afterwards.
//!
//! ```text
//! { "cities": [ { "label": "Tokyo", "section": "tokyo", "timezone": "Asia/Tokyo" } ] }
//! ```

mod loader;

pub use loader::load_navigation;

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// One selectable city in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityRecord {
    /// Display text of the control
    pub label: String,
    /// Unique identifier, used for anchors and element ids
    pub section: String,
    /// IANA timezone identifier (e.g., "Europe/London")
    #[serde(default, deserialize_with = "lenient_timezone")]
    pub timezone: Option<String>,
}

/// Accepts any JSON value as a timezone. Non-strings keep their JSON text
/// so the clock rejects them for that city alone.
fn lenient_timezone<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(tz)) => Some(tz),
        Some(other) => Some(other.to_string()),
    })
}

impl CityRecord {
    pub fn new(
        label: impl Into<String>,
        section: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            section: section.into(),
            timezone: Some(timezone.into()),
        }
    }

    /// The timezone to run the clock in, falling back when the record has
    /// none or an empty one.
    pub fn timezone_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.timezone.as_deref() {
            Some(tz) if !tz.is_empty() => tz,
            _ => fallback,
        }
    }
}

/// Top-level shape of the navigation document.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationDocument {
    pub cities: Vec<CityRecord>,
}

/// Errors that can occur while loading the navigation document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status { status: u16, url: String },
    /// The body was not a valid navigation document.
    Parse(String),
    /// A required element was missing from the host document.
    Dom(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Network(msg) => write!(f, "Network error: {}", msg),
            LoadError::Status { status, url } => {
                write!(f, "HTTP error! status: {} ({})", status, url)
            }
            LoadError::Parse(msg) => write!(f, "Invalid navigation data: {}", msg),
            LoadError::Dom(msg) => write!(f, "Missing page element: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Maps a response status to an error unless it is in the 2xx range.
pub fn check_status(status: u16, url: &str) -> Result<(), LoadError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(LoadError::Status {
            status,
            url: url.to_string(),
        })
    }
}

/// Parses the navigation document body into its city list.
pub fn parse_navigation(text: &str) -> Result<Vec<CityRecord>, LoadError> {
    let document: NavigationDocument =
        serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;

    let mut seen = HashSet::new();
    for city in &document.cities {
        if !seen.insert(city.section.as_str()) {
            log::warn!(
                "Duplicate section '{}' in navigation data; anchors and ids will collide",
                city.section
            );
        }
    }

    Ok(document.cities)
}
