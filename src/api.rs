//! OpenWeatherMap current-weather client

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::FetchError;
use crate::state::WeatherReport;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: Main,
    weather: Vec<Condition>,
    wind: Wind,
    sys: Sys,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Sys {
    sunrise: i64,
    sunset: i64,
}

fn report_from_response(data: CurrentResponse) -> Option<WeatherReport> {
    let condition = data.weather.into_iter().next()?;
    Some(WeatherReport {
        name: data.name,
        temperature: data.main.temp,
        description: condition.description,
        humidity: data.main.humidity,
        wind_speed: data.wind.speed,
        sunrise: data.sys.sunrise,
        sunset: data.sys.sunset,
        icon: condition.icon,
    })
}

/// Turn an upstream reply into a report or one of the user-facing errors.
pub fn classify_response(status: StatusCode, body: &str) -> Result<WeatherReport, FetchError> {
    if !status.is_success() {
        return Err(FetchError::from_status(status));
    }

    let data: CurrentResponse = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "malformed weather payload");
        FetchError::Unknown
    })?;

    report_from_response(data).ok_or_else(|| {
        tracing::warn!("weather payload has no conditions");
        FetchError::Unknown
    })
}

// ============================================================================
// Client
// ============================================================================

/// Issues one GET per lookup; credentials and endpoint are fixed at startup
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// The current-weather request for `city`, metric units.
    pub fn request(&self, city: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        self.http.get(url).query(&[
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ])
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        tracing::info!(city, "fetching current weather");

        let response = self.request(city).send().await.map_err(|e| {
            tracing::warn!(error = %e, "weather request failed");
            FetchError::Unknown
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, %status, "failed to read weather response");
            FetchError::Unknown
        })?;

        let result = classify_response(status, &body);
        match &result {
            Ok(report) => tracing::info!(%status, name = %report.name, "weather loaded"),
            Err(error) => tracing::warn!(%status, ?error, "weather lookup failed"),
        }
        result
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Provider image for an icon id, e.g. "01d" → ".../01d@2x.png"
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Terminal stand-in for the provider image, keyed on the icon family
pub fn condition_glyph(icon: &str) -> &'static str {
    let night = icon.ends_with('n');
    match icon.get(..2).unwrap_or_default() {
        "01" if night => "\u{1f319}",
        "01" => "\u{2600}\u{fe0f}",
        "02" => "\u{26c5}",
        "03" | "04" => "\u{2601}\u{fe0f}",
        "09" => "\u{1f327}\u{fe0f}",
        "10" => "\u{1f326}\u{fe0f}",
        "11" => "\u{26c8}\u{fe0f}",
        "13" => "\u{2744}\u{fe0f}",
        "50" => "\u{1f32b}\u{fe0f}",
        _ => "\u{1f321}\u{fe0f}",
    }
}
