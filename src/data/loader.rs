//! Fetches the navigation document.
//!
//! On WASM this is a single `fetch` of the configured URL. Native builds read
//! the same document from disk so the data can be previewed without a browser.

use super::{parse_navigation, CityRecord, LoadError};

/// Loads and parses the navigation document. No retry.
#[cfg(target_arch = "wasm32")]
pub async fn load_navigation(url: &str) -> Result<Vec<CityRecord>, LoadError> {
    let text = fetch_text(url).await?;
    parse_navigation(&text)
}

/// Reads the navigation document from a local path.
#[cfg(not(target_arch = "wasm32"))]
pub async fn load_navigation(path: &str) -> Result<Vec<CityRecord>, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Network(format!("{}: {}", path, e)))?;
    parse_navigation(&text)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, LoadError> {
    use super::check_status;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window =
        web_sys::window().ok_or_else(|| LoadError::Network("window not available".to_string()))?;

    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| LoadError::Network(format!("fetch failed: {:?}", e)))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| LoadError::Network("failed to cast fetch response".to_string()))?;

    check_status(response.status(), url)?;

    let text_promise = response
        .text()
        .map_err(|e| LoadError::Network(format!("response.text() failed: {:?}", e)))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| LoadError::Network(format!("reading response body failed: {:?}", e)))?;

    text_value
        .as_string()
        .ok_or_else(|| LoadError::Parse("response body was not a string".to_string()))
}
