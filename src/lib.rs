#![warn(clippy::all)]

//! World Clock Navigation - a city navigation bar with a live local clock.
//!
//! The header bar is built from a JSON list of cities. Selecting a city moves
//! the active indicator under it and shows the current time in that city's
//! timezone, refreshed every second.

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod nav;
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub mod ui;

#[cfg(test)]
mod testing;
