use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::search_bar::SEARCH_BAR_HEIGHT;
use super::weather_card::CARD_WIDTH;
use super::{CARD_HEIGHT, Component, SearchBar, SearchBarProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::{AppState, FocusRegion, WeatherReport};
use crate::theme::Palette;

const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
pub const TITLE: &str = "Weather App";

/// Title, spacer, search bar, spacer, card, status bar.
const FULL_HEIGHT: u16 = 1 + 1 + SEARCH_BAR_HEIGHT + 1 + CARD_HEIGHT + 1;

/// Props for WeatherWidget - read-only view of state
pub struct WeatherWidgetProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole widget: search form, status region and result card
#[derive(Default)]
pub struct WeatherWidget {
    search: SearchBar,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        // Keys that mean the same thing wherever focus is
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab => return vec![Action::UiFocusNext],
            KeyCode::BackTab => return vec![Action::UiFocusPrev],
            KeyCode::F(2) => return vec![Action::UiToggleTheme],
            _ => {}
        }

        let state = props.state;
        match state.focus {
            FocusRegion::Input => self
                .search
                .handle_event(
                    event,
                    SearchBarProps {
                        query: &state.query,
                        focus: state.focus,
                        palette: state.theme.palette(),
                    },
                )
                .into_iter()
                .collect(),
            FocusRegion::Button => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => vec![Action::QuerySubmit],
                KeyCode::Char('t') => vec![Action::UiToggleTheme],
                KeyCode::Char('q') => vec![Action::Quit],
                _ => Vec::new(),
            },
            FocusRegion::Result => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => vec![Action::QuerySubmit],
                KeyCode::Char('t') => vec![Action::UiToggleTheme],
                KeyCode::Char('q') => vec![Action::Quit],
                _ => Vec::new(),
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherWidgetProps<'_>) {
        let state = props.state;
        let palette = state.theme.palette();

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        // A card that just took focus must be fully visible; on short
        // terminals the form rows give way to it.
        let reveal_card = state.focus == FocusRegion::Result
            && state.weather.is_loaded()
            && area.height < FULL_HEIGHT;

        let form_height = if reveal_card { 0 } else { SEARCH_BAR_HEIGHT };
        let chunks = Layout::vertical([
            Constraint::Length(1),           // Title + theme toggle
            Constraint::Length(1),           // Spacer
            Constraint::Length(form_height), // Search bar
            Constraint::Length(1),           // Spacer
            Constraint::Min(1),              // Status region
            Constraint::Length(1),           // Help bar
        ])
        .split(area);

        render_title(frame, chunks[0], state, palette);

        if !reveal_card {
            self.search.render(
                frame,
                chunks[2],
                SearchBarProps {
                    query: &state.query,
                    focus: state.focus,
                    palette,
                },
            );
        }

        match WeatherView::from_state(state) {
            WeatherView::Loading => render_loading(frame, chunks[4], state, palette),
            WeatherView::Error(message) => render_error(frame, chunks[4], message, palette),
            WeatherView::Ready(report) => render_card(frame, chunks[4], state, report, palette),
            WeatherView::Empty => {}
        }

        render_help(frame, chunks[5], state.focus);
    }
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).split(area);

    let title = Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let toggle = Line::from(vec![
        Span::styled(state.theme.toggle_icon(), Style::default().fg(palette.accent)),
        Span::styled(" F2", Style::default().fg(palette.muted)),
    ])
    .right_aligned();
    frame.render_widget(Paragraph::new(toggle), chunks[1]);
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let line = Line::from(vec![
        Span::styled(state.spinner_frame(), Style::default().fg(palette.accent)),
        Span::styled(" Loading...", Style::default().fg(palette.muted)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, palette: Palette) {
    let line = Line::from(vec![
        Span::raw(ERROR_ICON),
        Span::raw(" "),
        Span::styled(
            message.to_string(),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    report: &WeatherReport,
    palette: Palette,
) {
    let width = area.width.min(CARD_WIDTH);
    let card_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height.min(CARD_HEIGHT),
    };
    let mut card = WeatherCard;
    card.render(
        frame,
        card_area,
        WeatherCardProps {
            report,
            clock: state.clock,
            palette,
            is_focused: state.focus == FocusRegion::Result,
        },
    );
}

fn render_help(frame: &mut Frame, area: Rect, focus: FocusRegion) {
    let hints = match focus {
        FocusRegion::Input => vec![
            StatusBarHint::new("enter", "get weather"),
            StatusBarHint::new("tab", "focus"),
            StatusBarHint::new("F2", "theme"),
            StatusBarHint::new("esc", "quit"),
        ],
        FocusRegion::Button => vec![
            StatusBarHint::new("enter", "get weather"),
            StatusBarHint::new("tab", "focus"),
            StatusBarHint::new("t", "theme"),
            StatusBarHint::new("q", "quit"),
        ],
        FocusRegion::Result => vec![
            StatusBarHint::new("r", "refresh"),
            StatusBarHint::new("tab", "focus"),
            StatusBarHint::new("t", "theme"),
            StatusBarHint::new("q", "quit"),
        ],
    };

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&hints),
            right: StatusBarSection::empty(),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

// ============================================================================
// Helpers
// ============================================================================

/// What the status region shows; exactly one at a time.
enum WeatherView<'a> {
    Loading,
    Error(&'a str),
    Ready(&'a WeatherReport),
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Loading => WeatherView::Loading,
            DataResource::Failed(error) => WeatherView::Error(error),
            DataResource::Loaded(report) => WeatherView::Ready(report),
            DataResource::Empty => WeatherView::Empty,
        }
    }
}
