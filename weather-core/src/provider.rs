use crate::{
    Config, WeatherError,
    model::{CityMatch, WeatherView},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current weather and city search results.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for `city`, already mapped for display.
    async fn current_weather(&self, city: &str) -> Result<WeatherView, WeatherError>;

    /// Up to `limit` cities matching the free-text `query`.
    async fn search_cities(&self, query: &str, limit: usize)
    -> Result<Vec<CityMatch>, WeatherError>;
}

/// Construct the provider described by `config`.
///
/// A missing API key is not an error here; the provider rejects the request
/// and its message is shown to the user.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if config.api_key().is_none() {
        tracing::warn!(
            "No OpenWeather API key configured; set {} or run `weather configure`",
            crate::config::API_KEY_ENV
        );
    }

    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Box::new(provider))
}
