//! Light/dark presentation
//!
//! The theme lives in `AppState` and components receive its `Palette` as a
//! prop. Nothing renders from a global.

use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors a component needs to draw itself in the active theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
}

const LIGHT: Palette = Palette {
    bg: Color::Rgb(244, 244, 240),
    panel: Color::Rgb(226, 230, 236),
    fg: Color::Rgb(30, 30, 36),
    muted: Color::Rgb(110, 110, 120),
    accent: Color::Rgb(30, 110, 200),
    error: Color::Rgb(190, 40, 40),
};

const DARK: Palette = Palette {
    bg: Color::Rgb(22, 24, 28),
    panel: Color::Rgb(40, 42, 52),
    fg: Color::Rgb(232, 232, 232),
    muted: Color::Rgb(150, 150, 160),
    accent: Color::Rgb(255, 200, 90),
    error: Color::Rgb(230, 110, 110),
};

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Presentation class; the two are mutually exclusive.
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    /// Toggle affordance: a sun while dark, a moon while light.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Light => "\u{263e}",
            Theme::Dark => "\u{2600}",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}
