//! Core library for the `weather` city lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather/geocoding provider, with an OpenWeather implementation
//! - Display models and the condition-code icon map
//! - The view state and the controller that drives it
//!
//! It has no rendering surface of its own; `weather-cli` draws the state.

pub mod config;
pub mod controller;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use controller::Controller;
pub use error::WeatherError;
pub use icon::Icon;
pub use model::{CityMatch, WeatherView};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use state::{RenderBranch, StalePolicy, ViewState};
