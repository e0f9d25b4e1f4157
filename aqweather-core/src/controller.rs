//! Search orchestration and the state a front end renders from.
//!
//! A search is two dependent lookups: current weather by place name, then air
//! quality at the coordinates the first lookup returned. Only the first one can
//! fail a search; the second is best effort.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::{
    model::{AirQuality, OperationState, SearchOutcome, WeatherResult},
    provider::WeatherProvider,
};

/// Everything a renderer needs, copied out of the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerSnapshot {
    pub query: String,
    pub weather: Option<WeatherResult>,
    pub air_quality: Option<AirQuality>,
    pub operation: OperationState,
}

fn lock(state: &Mutex<ControllerSnapshot>) -> MutexGuard<'_, ControllerSnapshot> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the controller to `Idle` when a search future is dropped before it
/// finishes, so a cancelled search does not block later ones.
struct InFlight<'a> {
    state: &'a Mutex<ControllerSnapshot>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a Mutex<ControllerSnapshot>) -> Self {
        Self { state, armed: true }
    }

    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(self.state);
        if state.operation.is_loading() {
            debug!("search dropped before completion, back to idle");
            state.operation = OperationState::Idle;
        }
    }
}

#[derive(Debug)]
pub struct WeatherQueryController<P> {
    provider: P,
    state: Mutex<ControllerSnapshot>,
}

impl<P: WeatherProvider> WeatherQueryController<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, state: Mutex::new(ControllerSnapshot::default()) }
    }

    // The guard is never held across an await point.
    fn state(&self) -> MutexGuard<'_, ControllerSnapshot> {
        lock(&self.state)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.state().clone()
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    /// Replace the pending query text. Never starts a search.
    pub fn set_query(&self, query: impl Into<String>) {
        self.state().query = query.into();
    }

    pub fn weather(&self) -> Option<WeatherResult> {
        self.state().weather.clone()
    }

    pub fn air_quality(&self) -> Option<AirQuality> {
        self.state().air_quality
    }

    pub fn operation(&self) -> OperationState {
        self.state().operation.clone()
    }

    /// Search for the pending query text.
    pub async fn submit(&self) -> SearchOutcome {
        let query = self.query();
        self.execute_search(&query).await
    }

    /// Run one search cycle for `query`.
    ///
    /// Blank queries are skipped without a request, and a trigger that arrives
    /// while another search is loading is ignored.
    pub async fn execute_search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("blank query, nothing to search");
            return SearchOutcome::Skipped;
        }

        {
            let mut state = self.state();
            if state.operation.is_loading() {
                debug!(query, "search already in flight, ignoring trigger");
                return SearchOutcome::Ignored;
            }
            state.operation = OperationState::Loading;
        }
        let in_flight = InFlight::start(&self.state);

        let weather = match self.provider.current_weather(query).await {
            Ok(weather) => weather,
            Err(err) => {
                let message = err.to_string();
                info!(query, error = ?err, "weather lookup failed");

                {
                    let mut state = self.state();
                    state.weather = None;
                    state.air_quality = None;
                    state.operation = OperationState::Failed(message.clone());
                }
                in_flight.finish();
                return SearchOutcome::Failed(message);
            }
        };

        {
            let mut state = self.state();
            state.weather = Some(weather.clone());
            state.air_quality = None;
        }

        let air_quality = match self.provider.air_quality(weather.coordinates).await {
            Ok(reading) => Some(reading),
            Err(err) => {
                debug!(query, error = ?err, "air quality lookup failed, showing weather only");
                None
            }
        };

        {
            let mut state = self.state();
            state.air_quality = air_quality;
            state.query.clear();
            state.operation = OperationState::Success;
        }
        in_flight.finish();

        info!(
            place = %weather.place_name,
            temperature_c = weather.temperature_c,
            aqi = air_quality.map(|a| a.index),
            "search completed"
        );

        SearchOutcome::Completed { weather, air_quality }
    }
}
