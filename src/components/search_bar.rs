use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::FocusRegion;
use crate::theme::Palette;

pub const BUTTON_LABEL: &str = "Get Weather";
pub const PLACEHOLDER: &str = "Enter city";

/// Rows the bar occupies (bordered input and button)
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// City input plus the "Get Weather" button
pub struct SearchBar {
    input: TextInput,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub focus: FocusRegion,
    pub palette: Palette,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
        }
    }

    fn frame_block(focused: bool, palette: Palette) -> Block<'static> {
        let border = if focused { palette.accent } else { palette.muted };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(palette.panel).fg(palette.fg))
    }
}

fn input_style(palette: Palette) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(palette.panel),
            fg: Some(palette.fg),
        },
        placeholder_style: Some(Style::default().fg(palette.muted)),
        cursor_style: Some(Style::default().bg(palette.accent).fg(palette.bg)),
    }
}

/// Enter in the input submits whatever is in state, same as the button.
fn submit_query(_: String) -> Action {
    Action::QuerySubmit
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if props.focus != FocusRegion::Input {
            return Vec::new();
        }
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(props.palette),
            on_change: Action::QueryChange,
            on_submit: submit_query,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Fill(1),                               // Input
            Constraint::Length(BUTTON_LABEL.len() as u16 + 4), // Button
        ])
        .spacing(1)
        .split(area);

        let input_block = Self::frame_block(props.focus == FocusRegion::Input, props.palette);
        let input_area = input_block.inner(chunks[0]);
        frame.render_widget(input_block, chunks[0]);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.focus == FocusRegion::Input,
            style: input_style(props.palette),
            on_change: Action::QueryChange,
            on_submit: submit_query,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, input_area, input_props);

        let button_focused = props.focus == FocusRegion::Button;
        let label_style = if button_focused {
            Style::default()
                .bg(props.palette.accent)
                .fg(props.palette.bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(props.palette.fg)
        };
        let button = Paragraph::new(BUTTON_LABEL)
            .alignment(Alignment::Center)
            .style(label_style)
            .block(Self::frame_block(button_focused, props.palette));
        frame.render_widget(button, chunks[1]);
    }
}
