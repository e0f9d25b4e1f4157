use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    Config,
    error::SearchError,
    model::{AirQuality, Coordinates, WeatherResult},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::new(config.api_key_or_empty().to_string(), config.base_url.as_str(), http))
    }

    async fn get_body(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, SearchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(endpoint, %status, "OpenWeather responded");

        if !status.is_success() {
            debug!(endpoint, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(SearchError::from_status(status));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwAqiMain {
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    pm2_5: f64,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    main: OwAqiMain,
    components: OwComponents,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Vec<OwPollutionEntry>,
}

impl From<OwCurrentResponse> for WeatherResult {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherResult {
            place_name: parsed.name,
            country_code: parsed.sys.country,
            coordinates: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, query: &str) -> Result<WeatherResult, SearchError> {
        let body = self.get_body("weather", &[("q", query), ("units", "metric")]).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn air_quality(&self, coordinates: Coordinates) -> Result<AirQuality, SearchError> {
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();
        let body = self.get_body("air_pollution", &[("lat", &lat), ("lon", &lon)]).await?;

        let parsed: OwPollutionResponse = serde_json::from_str(&body)?;
        let first = parsed.list.into_iter().next().ok_or_else(|| {
            SearchError::Transport("Air pollution response contained no data".to_string())
        })?;

        Ok(AirQuality { index: first.main.aqi, pm2_5: first.components.pm2_5 })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
