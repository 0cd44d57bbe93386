use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::api;
use crate::format;
use crate::state::{ClockZone, WeatherReport};
use crate::theme::Palette;

/// Borders plus eight content rows.
pub const CARD_HEIGHT: u16 = 10;
pub const CARD_WIDTH: u16 = 64;

/// Result card: name, readings, sun times, icon
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub report: &'a WeatherReport,
    pub clock: ClockZone,
    pub palette: Palette,
    pub is_focused: bool,
}

/// Card rows in display order.
pub fn card_lines(report: &WeatherReport, clock: ClockZone) -> Vec<String> {
    vec![
        report.name.clone(),
        format::temperature(report),
        format::description(report),
        format::humidity(report),
        format::wind_speed(report),
        format::sunrise(report, clock),
        format::sunset(report, clock),
        format!("Icon: {}", api::icon_url(&report.icon)),
    ]
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let border = if props.is_focused {
            palette.accent
        } else {
            palette.muted
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", api::condition_glyph(&props.report.icon)))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(palette.panel).fg(palette.fg));

        let mut rows = card_lines(props.report, props.clock).into_iter();
        let mut lines = Vec::with_capacity(CARD_HEIGHT as usize);
        if let Some(name) = rows.next() {
            lines.push(Line::from(Span::styled(
                name,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.extend(rows.map(Line::from));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use tui_dispatch::testing::*;

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

    #[test]
    fn test_card_lines_order() {
        let lines = card_lines(&london(), ClockZone::Utc);
        assert_eq!(
            lines,
            vec![
                "London",
                "Temperature: 15.2°C",
                "Weather: clear sky",
                "Humidity: 70%",
                "Wind Speed: 3.1 m/s",
                "Sunrise: 22:13",
                "Sunset: 09:20",
                "Icon: https://openweathermap.org/img/wn/01d@2x.png",
            ]
        );
    }

    #[test]
    fn test_render_card() {
        let mut render = RenderHarness::new(CARD_WIDTH, CARD_HEIGHT);
        let report = london();
        let mut card = WeatherCard;

        let output = render.render_to_string_plain(|frame| {
            card.render(
                frame,
                frame.area(),
                WeatherCardProps {
                    report: &report,
                    clock: ClockZone::Utc,
                    palette: Theme::Dark.palette(),
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("London"));
        assert!(output.contains("Wind Speed: 3.1 m/s"));
        assert!(output.contains("Sunset: 09:20"));
        assert!(output.contains("01d@2x.png"));
    }
}
