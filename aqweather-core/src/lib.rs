//! Core library for the `aqweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (current weather and air pollution)
//! - The search controller and the display values derived from it
//!
//! It is used by `aqweather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use controller::{ControllerSnapshot, WeatherQueryController};
pub use display::{Region, Theme, View};
pub use error::SearchError;
pub use model::{AirQuality, Coordinates, OperationState, SearchOutcome, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
