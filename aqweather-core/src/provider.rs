use crate::{
    Config,
    error::SearchError,
    model::{AirQuality, Coordinates, WeatherResult},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two lookups a search is made of.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text place name, metric units.
    async fn current_weather(&self, query: &str) -> Result<WeatherResult, SearchError>;

    /// Air pollution reading at the given coordinates.
    async fn air_quality(&self, coordinates: Coordinates) -> Result<AirQuality, SearchError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn current_weather(&self, query: &str) -> Result<WeatherResult, SearchError> {
        (**self).current_weather(query).await
    }

    async fn air_quality(&self, coordinates: Coordinates) -> Result<AirQuality, SearchError> {
        (**self).air_quality(coordinates).await
    }
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not rejected here; the API answers 401 and the
/// search reports the generic failure message.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Box::new(provider))
}
