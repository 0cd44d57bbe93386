//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::FetchError;
use crate::state::{AppState, FocusRegion};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    let was_loaded = state.weather.is_loaded();
    let result = reduce(state, action);
    if result.changed {
        settle_focus(state, was_loaded);
    }
    result
}

fn reduce(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query actions =====
        Action::QueryChange(query) => {
            if query == state.query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::QuerySubmit => {
            let city = state.query.trim();
            if city.is_empty() {
                // Abandon any lookup still in flight
                state.request_id = state.request_id.wrapping_add(1);
                state.weather = DataResource::Failed(FetchError::EmptyInput.to_string());
                return DispatchResult::changed();
            }
            let city = city.to_string();
            state.request_id = state.request_id.wrapping_add(1);
            state.weather = DataResource::Loading;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather {
                request: state.request_id,
                city,
            })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad { request, report } => {
            if request != state.request_id {
                tracing::debug!(request, current = state.request_id, "dropping stale weather result");
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(report);
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, error } => {
            if request != state.request_id {
                tracing::debug!(request, current = state.request_id, "dropping stale weather error");
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(error.to_string());
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiToggleTheme => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        Action::UiFocusNext => step_focus(state, 1),

        Action::UiFocusPrev => {
            let len = state.focus_order().len();
            step_focus(state, len.saturating_sub(1))
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn step_focus(state: &mut AppState, offset: usize) -> DispatchResult<Effect> {
    let order = state.focus_order();
    let current = order.iter().position(|f| *f == state.focus).unwrap_or(0);
    let next = order[(current + offset) % order.len()];
    if next == state.focus {
        return DispatchResult::unchanged();
    }
    state.focus = next;
    DispatchResult::changed()
}

/// Focus follows the weather transition: a fresh card takes focus (and is
/// revealed by the view), and a vanished card hands focus back to the input.
fn settle_focus(state: &mut AppState, was_loaded: bool) {
    let is_loaded = state.weather.is_loaded();
    if is_loaded && !was_loaded {
        state.focus = FocusRegion::Result;
    } else if !is_loaded && state.focus == FocusRegion::Result {
        state.focus = FocusRegion::Input;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherReport;
    use crate::theme::Theme;

    fn london() -> WeatherReport {
        WeatherReport {
            name: "London".into(),
            temperature: 15.2,
            description: "clear sky".into(),
            humidity: 70,
            wind_speed: 3.1,
            sunrise: 1_700_000_000,
            sunset: 1_700_040_000,
            icon: "01d".into(),
        }
    }

    fn submitted(city: &str) -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::QueryChange(city.into()));
        reducer(&mut state, Action::QuerySubmit);
        state
    }

    #[test]
    fn test_blank_submit_has_no_effect() {
        for query in ["", "   ", "\t\n"] {
            let mut state = AppState {
                query: query.into(),
                ..Default::default()
            };

            let result = reducer(&mut state, Action::QuerySubmit);

            assert!(result.changed);
            assert!(result.effects.is_empty());
            assert_eq!(state.error(), Some("Please enter a city name."));
            assert_eq!(state.request_id, 1);
        }
    }

    #[test]
    fn test_submit_sets_loading_with_trimmed_city() {
        let mut state = AppState {
            query: "  London ".into(),
            tick_count: 4,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::QuerySubmit);

        assert!(state.is_loading());
        assert_eq!(state.tick_count, 0);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: 1,
                city: "London".into()
            }]
        );
    }

    #[test]
    fn test_submit_clears_prior_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuerySubmit);
        assert!(state.error().is_some());

        reducer(&mut state, Action::QueryChange("Paris".into()));
        reducer(&mut state, Action::QuerySubmit);

        assert!(state.error().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_load_moves_focus_to_result() {
        let mut state = submitted("London");
        assert_eq!(state.focus, FocusRegion::Input);

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                report: london(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.result(), Some(&london()));
        assert_eq!(state.focus, FocusRegion::Result);
    }

    #[test]
    fn test_error_clears_result_and_focus() {
        let mut state = submitted("London");
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                report: london(),
            },
        );

        reducer(&mut state, Action::QueryChange("Atlantis".into()));
        reducer(&mut state, Action::QuerySubmit);
        reducer(
            &mut state,
            Action::WeatherDidError {
                request: 2,
                error: FetchError::NotFound,
            },
        );

        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("City not found. Please try again."));
        assert_eq!(state.focus, FocusRegion::Input);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = submitted("London");
        reducer(&mut state, Action::QueryChange("Paris".into()));
        reducer(&mut state, Action::QuerySubmit);
        assert_eq!(state.request_id, 2);

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                report: london(),
            },
        );

        assert!(!result.changed);
        assert!(state.is_loading());
    }

    #[test]
    fn test_blank_submit_abandons_lookup_in_flight() {
        let mut state = submitted("London");
        reducer(&mut state, Action::QueryChange(String::new()));
        let result = reducer(&mut state, Action::QuerySubmit);
        assert!(result.effects.is_empty());
        assert_eq!(state.request_id, 2);

        let late = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                report: london(),
            },
        );

        assert!(!late.changed);
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some("Please enter a city name."));
    }

    #[test]
    fn test_toggle_theme() {
        let mut state = AppState::default();
        assert_eq!(state.theme, Theme::Light);

        reducer(&mut state, Action::UiToggleTheme);
        assert_eq!(state.theme, Theme::Dark);

        reducer(&mut state, Action::UiToggleTheme);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_focus_cycle_skips_missing_result() {
        let mut state = AppState::default();

        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, FocusRegion::Button);
        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, FocusRegion::Input);
        reducer(&mut state, Action::UiFocusPrev);
        assert_eq!(state.focus, FocusRegion::Button);
    }

    #[test]
    fn test_focus_cycle_includes_result_when_loaded() {
        let mut state = submitted("London");
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                report: london(),
            },
        );
        assert_eq!(state.focus, FocusRegion::Result);

        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, FocusRegion::Input);
        reducer(&mut state, Action::UiFocusPrev);
        assert_eq!(state.focus, FocusRegion::Result);
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
