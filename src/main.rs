#![warn(clippy::all)]

use world_clock_nav::config::NavConfig;

// Native entry point: print every city's current time once
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use world_clock_nav::clock::{SystemClock, TimeSource, TzFormatter, ZoneFormatter};
    use world_clock_nav::data;

    env_logger::init();

    let config = NavConfig::default().with_data_url(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "assets/data/navigation.json".to_string()),
    );

    let cities = match pollster::block_on(data::load_navigation(&config.data_url)) {
        Ok(cities) => cities,
        Err(e) => {
            log::error!("Error loading navigation data: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let now = SystemClock.now();
    for city in &cities {
        let timezone = city.timezone_or(&config.fallback_timezone);
        let time = match TzFormatter.validate(timezone) {
            Ok(()) => TzFormatter
                .format(timezone, now)
                .unwrap_or_else(|_| config.format_error_message.clone()),
            Err(e) => {
                log::error!("{}", e);
                config.invalid_timezone_message.clone()
            }
        };
        println!("{:<20} {:<28} {}", city.label, timezone, time);
    }

    std::process::ExitCode::SUCCESS
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }

    wasm_bindgen_futures::spawn_local(world_clock_nav::app::run(NavConfig::default()));
}
