//! Display strings for the weather card

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::state::{ClockZone, WeatherReport};

pub fn temperature(report: &WeatherReport) -> String {
    format!("Temperature: {}°C", report.temperature)
}

pub fn description(report: &WeatherReport) -> String {
    format!("Weather: {}", report.description)
}

pub fn humidity(report: &WeatherReport) -> String {
    format!("Humidity: {}%", report.humidity)
}

pub fn wind_speed(report: &WeatherReport) -> String {
    format!("Wind Speed: {} m/s", report.wind_speed)
}

pub fn sunrise(report: &WeatherReport, zone: ClockZone) -> String {
    format!("Sunrise: {}", clock_time(report.sunrise, zone))
}

pub fn sunset(report: &WeatherReport, zone: ClockZone) -> String {
    format!("Sunset: {}", clock_time(report.sunset, zone))
}

/// Hour and minute of a Unix timestamp, "HH:MM".
pub fn clock_time(epoch_secs: i64, zone: ClockZone) -> String {
    match zone {
        ClockZone::Utc => clock_time_in(epoch_secs, &Utc),
        ClockZone::Local => clock_time_in(epoch_secs, &Local),
    }
}

/// "HH:MM" of a Unix timestamp in `tz`, or "--:--" when out of range.
pub fn clock_time_in<Tz>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
