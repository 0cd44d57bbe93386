//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::theme::Theme;

/// Current conditions for one city, as reported by OpenWeatherMap
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub name: String,
    /// Degrees Celsius (metric units)
    pub temperature: f64,
    pub description: String,
    /// Relative humidity, percent
    pub humidity: u8,
    /// Meters per second
    pub wind_speed: f64,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
    /// Provider icon id, e.g. "01d"
    pub icon: String,
}

/// Which part of the widget receives keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum FocusRegion {
    #[default]
    Input,
    Button,
    Result,
}

/// Time zone used for sunrise/sunset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum ClockZone {
    #[default]
    Local,
    Utc,
}

/// Spinner timing for the loading indicator.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text in the city input
    #[debug(section = "Query", label = "City")]
    pub query: String,

    /// Lookup lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherReport>,

    /// Generation of the latest submission; older completions are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_id: u64,

    #[debug(section = "UI", label = "Theme", debug_fmt)]
    pub theme: Theme,

    #[debug(section = "UI", label = "Focus", debug_fmt)]
    pub focus: FocusRegion,

    #[debug(section = "UI", label = "Clock", debug_fmt)]
    pub clock: ClockZone,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(query: impl Into<String>, theme: Theme, clock: ClockZone) -> Self {
        Self {
            query: query.into(),
            weather: DataResource::Empty,
            request_id: 0,
            theme,
            focus: FocusRegion::default(),
            clock,
            tick_count: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    /// Last successful report, if it is the one on screen
    pub fn result(&self) -> Option<&WeatherReport> {
        self.weather.data()
    }

    /// Message currently shown in place of a card
    pub fn error(&self) -> Option<&str> {
        self.weather.error()
    }

    /// Regions Tab can reach right now
    pub fn focus_order(&self) -> &'static [FocusRegion] {
        static FORM: [FocusRegion; 2] = [FocusRegion::Input, FocusRegion::Button];
        static WITH_RESULT: [FocusRegion; 3] =
            [FocusRegion::Input, FocusRegion::Button, FocusRegion::Result];
        if self.weather.is_loaded() {
            &WITH_RESULT
        } else {
            &FORM
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new(), Theme::default(), ClockZone::default())
    }
}
