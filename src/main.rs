//! Weather widget TUI - city lookup against OpenWeatherMap

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_widget::action::Action;
use weather_widget::api::{self, WeatherClient};
use weather_widget::components::{Component, WeatherWidget, WeatherWidgetProps};
use weather_widget::effect::Effect;
use weather_widget::reducer::reducer;
use weather_widget::state::{AppState, ClockZone, LOADING_ANIM_TICK_MS};
use weather_widget::theme::Theme;

/// Weather widget - current conditions for a city
#[derive(Parser, Debug)]
#[command(name = "weather-widget")]
#[command(about = "Look up current weather for a city on OpenWeatherMap")]
struct Args {
    /// OpenWeatherMap API key (a missing key shows up as an invalid-key error)
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenWeatherMap endpoint
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = api::DEFAULT_BASE_URL)]
    api_base_url: String,

    /// City to look up on startup
    #[arg(long, short)]
    city: Option<String>,

    /// Initial theme
    #[arg(long, value_enum, default_value = "light")]
    theme: Theme,

    /// Show sunrise and sunset in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Append logs to this file (RUST_LOG filters, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WidgetComponentId {
    Widget,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WidgetContext {
    Main,
}

impl EventRoutingState<WidgetComponentId, WidgetContext> for AppState {
    fn focused(&self) -> Option<WidgetComponentId> {
        Some(WidgetComponentId::Widget)
    }

    fn modal(&self) -> Option<WidgetComponentId> {
        None
    }

    fn binding_context(&self, _id: WidgetComponentId) -> WidgetContext {
        WidgetContext::Main
    }

    fn default_context(&self) -> WidgetContext {
        WidgetContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // A missing .env is fine; the key may come from the real environment.
    let _ = dotenvy::dotenv();

    let Args {
        api_key,
        api_base_url,
        city,
        theme,
        utc,
        log_file,
        debug: debug_args,
    } = Args::parse();

    init_logging(log_file.as_deref())?;

    if api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; lookups will be rejected upstream");
    }
    let client = WeatherClient::new(api_base_url, api_key.unwrap_or_default());

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let clock = if utc { ClockZone::Utc } else { ClockZone::Local };
    let initial_query = city.clone().unwrap_or_default();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(initial_query, theme, clock))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let init_action = city.map(|_| Action::QuerySubmit);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        init_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

/// Logs go to a file or nowhere; the terminal belongs to the UI.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("logging setup failed: {e}")))
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

fn handle_widget_event(
    widget: &mut WeatherWidget,
    event: &EventKind,
    state: &AppState,
) -> HandlerResponse<Action> {
    let props = WeatherWidgetProps {
        state,
        is_focused: true,
    };
    let actions: Vec<_> = widget.handle_event(event, props).into_iter().collect();
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let widget = Rc::new(RefCell::new(WeatherWidget::new()));
    let mut bus: EventBus<AppState, Action, WidgetComponentId, WidgetContext> = EventBus::new();
    let keybindings: Keybindings<WidgetContext> = Keybindings::new();

    let widget_events = Rc::clone(&widget);
    bus.register(WidgetComponentId::Widget, move |event, state| {
        handle_widget_event(&mut widget_events.borrow_mut(), &event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                event_ctx.set_component_area(WidgetComponentId::Widget, area);
                let props = WeatherWidgetProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                widget.borrow_mut().render(frame, area, props);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks. Reusing the "weather" key replaces an
/// in-flight lookup, so the latest submission wins.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &WeatherClient) {
    match effect {
        Effect::FetchWeather { request, city } => {
            let client = client.clone();
            ctx.tasks().spawn("weather", async move {
                match client.current_weather(&city).await {
                    Ok(report) => Action::WeatherDidLoad { request, report },
                    Err(error) => Action::WeatherDidError { request, error },
                }
            });
        }
    }
}
