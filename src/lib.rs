//! Weather widget TUI
//!
//! Look up current conditions for a city on OpenWeatherMap and show them in
//! a themed card. The library exposes the modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod error;
pub mod format;
pub mod reducer;
pub mod state;
pub mod theme;
