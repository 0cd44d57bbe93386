pub mod search_bar;
pub mod weather_card;
pub mod weather_widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_card::{CARD_HEIGHT, WeatherCard, WeatherCardProps};
pub use weather_widget::{WeatherWidget, WeatherWidgetProps};
