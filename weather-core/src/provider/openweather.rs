use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    Config, WeatherError,
    config::{DEFAULT_GEOCODING_URL, DEFAULT_WEATHER_URL},
    icon::Icon,
    model::{CityMatch, WeatherView},
};

use super::WeatherProvider;

/// Readings are always requested in metric units; the view model is Celsius.
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    weather_url: String,
    geocoding_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key().unwrap_or_default().to_string(),
            weather_url: config.weather_url.clone(),
            geocoding_url: config.geocoding_url.clone(),
            http,
        })
    }

    pub fn with_weather_url(mut self, url: impl Into<String>) -> Self {
        self.weather_url = url.into();
        self
    }

    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    #[serde(default)]
    country: String,
}

impl From<OwGeoEntry> for CityMatch {
    fn from(entry: OwGeoEntry) -> Self {
        CityMatch { name: entry.name, country: entry.country }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherView, WeatherError> {
        debug!(city, url = %self.weather_url, "requesting current weather");

        let res = self
            .http
            .get(&self.weather_url)
            .query(&[
                ("q", city),
                ("units", UNITS),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        parse_current(status, &body)
    }

    async fn search_cities(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CityMatch>, WeatherError> {
        debug!(query, limit, "requesting city suggestions");

        let limit = limit.to_string();
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Transport(format!(
                "OpenWeather geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        parse_geocoding(&body)
    }
}

/// Map a current-weather body to a [`WeatherView`].
///
/// The provider signals failure through the `cod` field of the body, which
/// is a number on success and often a string on error, so the body is
/// inspected whatever the HTTP status was.
pub fn parse_current(status: StatusCode, body: &str) -> Result<WeatherView, WeatherError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if status.is_success() => return Err(err.into()),
        Err(_) => {
            return Err(WeatherError::Transport(format!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(body),
            )));
        }
    };

    let cod = value.get("cod").and_then(status_code);
    if cod != Some(200) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| match cod {
                Some(code) => format!("Weather provider returned status {code}"),
                None => "Unexpected response from weather provider".to_string(),
            });
        return Err(WeatherError::Provider(message));
    }

    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    Ok(map_current(parsed))
}

/// Map a geocoding body to city matches, in provider order.
pub fn parse_geocoding(body: &str) -> Result<Vec<CityMatch>, WeatherError> {
    let entries: Vec<OwGeoEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(CityMatch::from).collect())
}

fn map_current(parsed: OwCurrentResponse) -> WeatherView {
    let code = parsed.weather.first().and_then(|w| w.icon.as_deref());

    WeatherView {
        temperature_c: parsed.main.temp.floor() as i64,
        humidity_pct: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        location_name: parsed.name,
        icon: Icon::from_code_or_default(code),
    }
}

/// `cod` arrives as `200` or `"404"` depending on the endpoint.
fn status_code(cod: &Value) -> Option<u64> {
    match cod {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
