//! Actions: user intents and async completions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// City input text changed
    QueryChange(String),

    /// Enter in the input or the "Get Weather" button (triggers async task)
    QuerySubmit,

    // ===== Weather category =====
    /// Result: lookup `request` succeeded
    WeatherDidLoad { request: u64, report: WeatherReport },

    /// Result: lookup `request` failed
    WeatherDidError { request: u64, error: FetchError },

    // ===== UI category =====
    /// Flip light/dark
    UiToggleTheme,

    /// Move focus forward (Tab)
    UiFocusNext,

    /// Move focus backward (BackTab)
    UiFocusPrev,

    /// Force a re-render (cursor movement)
    Render,

    // ===== Uncategorized (global) =====
    /// Spinner tick
    Tick,

    /// Exit the application
    Quit,
}
