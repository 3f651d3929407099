//! lunaclock: a terminal clock with a time-coloured sky, the moon phase
//! and a zodiac clock for a chosen city.

use anyhow::{Context, Result};
use lunaclock::app::App;
use lunaclock::config::{Config, API_KEY_ENV};
use lunaclock::location::LocationSet;
use lunaclock::tui::theme::ClockTheme;
use lunaclock::tui::widgets::Starfield;
use lunaclock::tui::{spawn_event_reader, TermEvent, Tui};
use lunaclock::weather::WeatherClient;
use ratatui::widgets::Widget;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

/// Number of stars in the sky
const STAR_COUNT: usize = 60;

/// CLI arguments
#[derive(Debug, Default)]
struct Args {
    location: Option<String>,
    theme: Option<ClockTheme>,
    config: Option<PathBuf>,
    offline: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// SETUP
// ═══════════════════════════════════════════════════════════════════════════

fn print_help() {
    eprintln!("lunaclock - clock, moon phase and zodiac for a city\n");
    eprintln!("Usage: lunaclock [OPTIONS]\n");
    eprintln!("Options:");
    eprintln!("  --location, -l LABEL   Start at this location (e.g. \"Tokyo\")");
    eprintln!("  --theme, -t NAME       Zodiac clock theme: dark, gold, cosmic, white");
    eprintln!("  --config, -c PATH      Read configuration from PATH");
    eprintln!("  --offline              Do not fetch weather or moonrise");
    eprintln!("  --help, -h             Show this help message");
    eprintln!("\nEnvironment:");
    eprintln!("  {API_KEY_ENV}   Weather API key");
    eprintln!("  RUST_LOG=debug          Enable debug logging");
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--location" | "-l" => {
                args.location = Some(iter.next().context("--location needs a value")?);
            }
            "--theme" | "-t" => {
                let name = iter.next().context("--theme needs a value")?;
                args.theme = Some(name.parse().map_err(anyhow::Error::msg)?);
            }
            "--config" | "-c" => {
                args.config = Some(iter.next().context("--config needs a value")?.into());
            }
            "--offline" => args.offline = true,
            other => anyhow::bail!("Unknown argument '{other}' (see --help)"),
        }
    }
    Ok(args)
}

/// Log to a file under the cache dir; the terminal belongs to the TUI
fn init_tracing() -> Option<()> {
    let dir = dirs::cache_dir()?.join("lunaclock");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("lunaclock.log");
    let file = File::create(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Some(())
}

// ═══════════════════════════════════════════════════════════════════════════
// MAIN
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    if init_tracing().is_none() {
        eprintln!("lunaclock: no cache directory, logging disabled");
    }

    let config = Config::load(args.config.as_deref())?;
    let mut locations = LocationSet::from_specs(&config.locations)?;

    let wanted = args.location.as_deref().or(config.default_location.as_deref());
    if let Some(label) = wanted {
        if locations.select_label(label).is_none() {
            anyhow::bail!("Unknown location '{label}'");
        }
    }

    let theme = args.theme.unwrap_or(config.theme);
    let weather = if args.offline {
        None
    } else {
        WeatherClient::new(&config.weather).context("Failed to set up TLS for weather requests")?
    };

    info!(
        location = %locations.current().label,
        %theme,
        weather = weather.is_some(),
        "starting lunaclock"
    );

    let stars = Starfield::new(STAR_COUNT, &mut rand::thread_rng());
    let (mut app, mut app_events) = App::new(locations, theme, weather, stars);

    let mut tui = Tui::new().context("Failed to initialise the terminal")?;
    let mut term_events = spawn_event_reader();
    app.mount();

    loop {
        tui.terminal().draw(|frame| {
            let area = frame.area();
            (&app).render(area, frame.buffer_mut());
        })?;

        tokio::select! {
            Some(event) = term_events.recv() => match event {
                TermEvent::Key(key) => app.handle_key(key),
                TermEvent::Tick => app.tick(),
                TermEvent::Resize(_, _) => {}
            },
            Some(event) = app_events.recv() => app.handle_event(event),
            else => {
                warn!("event channels closed");
                break;
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.unmount();
    tui.restore()?;

    info!("lunaclock exited");
    Ok(())
}
