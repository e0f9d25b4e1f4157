//! Presentation values derived from controller state.
//!
//! Everything here is a pure function of its arguments so front ends can
//! render without reaching back into the controller.

use chrono::Datelike;

use crate::{
    controller::ControllerSnapshot,
    model::{AirQuality, OperationState, WeatherResult},
};

const WEEKDAYS: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Named colors used by themes and air quality labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Blue,
    Orange,
    Red,
    Cyan,
    Green,
    Teal,
    Emerald,
    Lime,
    Sky,
    Pink,
    Rose,
    Gray,
}

/// Background mood picked from the current temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// No result to show.
    Neutral,
    Warm,
    Cold,
    Temperate,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Neutral => "neutral",
            Theme::Warm => "warm",
            Theme::Cold => "cold",
            Theme::Temperate => "temperate",
        }
    }

    /// Start and end color of the background gradient.
    pub fn gradient(&self) -> (ColorTag, ColorTag) {
        match self {
            Theme::Neutral => (ColorTag::Blue, ColorTag::Blue),
            Theme::Warm => (ColorTag::Orange, ColorTag::Red),
            Theme::Cold => (ColorTag::Cyan, ColorTag::Blue),
            Theme::Temperate => (ColorTag::Green, ColorTag::Teal),
        }
    }
}

/// Above 25 °C is warm, below 15 °C is cold, both bounds themselves are temperate.
pub fn background_theme(temperature_c: Option<f64>) -> Theme {
    match temperature_c {
        None => Theme::Neutral,
        Some(t) if t > 25.0 => Theme::Warm,
        Some(t) if t < 15.0 => Theme::Cold,
        Some(_) => Theme::Temperate,
    }
}

/// "Saturday 17 October 2026"
pub fn format_date<D: Datelike>(date: &D) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {} {}", weekday, date.day(), month, date.year())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityLabel {
    pub text: &'static str,
    pub description: &'static str,
    pub color: ColorTag,
}

pub fn classify_air_quality(index: i64) -> AirQualityLabel {
    let (text, description, color) = match index {
        1 => ("Good", "Air quality is satisfactory", ColorTag::Emerald),
        2 => ("Fair", "Acceptable air quality", ColorTag::Lime),
        3 => ("Moderate", "Sensitive groups may feel effects", ColorTag::Sky),
        4 => ("Poor", "Health effects possible", ColorTag::Pink),
        5 => ("Very Poor", "Serious health effects", ColorTag::Rose),
        _ => ("Unknown", "", ColorTag::Gray),
    };
    AirQualityLabel { text, description, color }
}

/// Halves round toward positive infinity, so -2.5 becomes -2.
pub fn round_temperature(temperature_c: f64) -> i64 {
    // `as` saturates; -0.0 becomes 0.
    (temperature_c + 0.5).floor() as i64
}

pub fn format_temperature(temperature_c: f64) -> String {
    format!("{}°", round_temperature(temperature_c))
}

pub fn format_humidity(humidity_pct: u8) -> String {
    format!("{humidity_pct}%")
}

pub fn format_wind(speed_mps: f64) -> String {
    format!("{speed_mps} m/s")
}

pub fn format_pm25(pm2_5: f64) -> String {
    format!("PM2.5: {pm2_5:.1} µg/m³")
}

pub fn format_location(weather: &WeatherResult) -> String {
    if weather.country_code.is_empty() {
        weather.place_name.clone()
    } else {
        format!("{}, {}", weather.place_name, weather.country_code)
    }
}

/// Upper-cases the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityPanel {
    pub label: AirQualityLabel,
    pub pm2_5: String,
}

impl From<AirQuality> for AirQualityPanel {
    fn from(reading: AirQuality) -> Self {
        Self { label: classify_air_quality(reading.index), pm2_5: format_pm25(reading.pm2_5) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub air_quality: Option<AirQualityPanel>,
}

/// The single region a front end should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Loading,
    Error(String),
    Result(Box<ResultPanel>),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub theme: Theme,
    pub region: Region,
}

pub const LOADING_TEXT: &str = "Fetching weather...";
pub const EMPTY_TEXT: &str = "Enter a location to see the magic.";

impl View {
    pub fn build<D: Datelike>(snapshot: &ControllerSnapshot, today: &D) -> Self {
        let theme = background_theme(snapshot.weather.as_ref().map(|w| w.temperature_c));

        let region = match (&snapshot.operation, &snapshot.weather) {
            (OperationState::Loading, _) => Region::Loading,
            (OperationState::Failed(message), _) => Region::Error(message.clone()),
            (_, Some(weather)) => Region::Result(Box::new(ResultPanel {
                location: format_location(weather),
                date: format_date(today),
                temperature: format_temperature(weather.temperature_c),
                condition: capitalize_words(&weather.condition),
                humidity: format_humidity(weather.humidity_pct),
                wind: format_wind(weather.wind_speed_mps),
                air_quality: snapshot.air_quality.map(AirQualityPanel::from),
            })),
            (_, None) => Region::Empty,
        };

        Self { theme, region }
    }
}
