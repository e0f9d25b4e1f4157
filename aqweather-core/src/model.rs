use serde::{Deserialize, Serialize};

/// Geographic position returned by the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub place_name: String,
    pub country_code: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: String,
}

/// First entry of the air pollution series for a coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// 1 (good) ..= 5 (very poor) on the provider's scale.
    pub index: i64,
    pub pm2_5: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, OperationState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OperationState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// What a single search trigger ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was requested.
    Skipped,
    /// Another search was still in flight.
    Ignored,
    /// Weather was stored. Air quality is `None` when the follow-up fetch failed.
    Completed {
        weather: WeatherResult,
        air_quality: Option<AirQuality>,
    },
    /// The weather fetch failed with the given user-facing message.
    Failed(String),
}
