//! Render the lunaclock screens to plain text using ratatui's TestBackend.
//!
//! A developer utility for checking layout at a given terminal size
//! (`TUI_W`, `TUI_H`) without an interactive session.

use chrono::{DateTime, Utc};
use lunaclock::clock::local_time_at;
use lunaclock::location::{default_locations, LocationSet};
use lunaclock::tui::screens::{ClockScreen, LocationSelectScreen, WeatherReport};
use lunaclock::tui::theme::ClockTheme;
use lunaclock::tui::widgets::Starfield;
use lunaclock::weather::{Astro, Condition, CurrentWeather};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, prelude::Widget, Terminal};

fn buffer_to_text(buf: &Buffer, area: Rect) -> String {
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = &buf[(x, y)];
            if cell.skip {
                out.push(' ');
                continue;
            }
            match cell.symbol() {
                "" => out.push(' '),
                sym => out.push_str(sym),
            }
        }
        out.push('\n');
    }
    out
}

fn render_screen(
    width: u16,
    height: u16,
    name: &str,
    render: impl FnOnce(Rect, &mut Buffer),
) -> anyhow::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| {
        let area = frame.area();
        render(area, frame.buffer_mut());
    })?;

    let area = Rect::new(0, 0, width, height);
    Ok(format!(
        "=== {} ({}x{}) ===\n{}",
        name,
        width,
        height,
        buffer_to_text(terminal.backend().buffer(), area)
    ))
}

fn env_u16(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    let width = env_u16("TUI_W", 100);
    let height = env_u16("TUI_H", 40);

    let mut locations = LocationSet::from_specs(&default_locations())?;
    let location = locations
        .select_label("Tokyo")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Tokyo missing from default locations"))?;

    // A fixed instant keeps the output stable between runs
    let instant: DateTime<Utc> = "2026-10-19T10:07:09Z".parse()?;
    let now = local_time_at(location.zone, instant);
    let stars = Starfield::new(60, &mut StdRng::seed_from_u64(42));

    let mut clock = ClockScreen::new(location.clone(), now, ClockTheme::Cosmic, stars);
    clock.set_weather(WeatherReport {
        city: location.city.clone(),
        current: CurrentWeather {
            temp_c: 17.4,
            condition: Condition {
                text: "Partly cloudy".to_string(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
            },
        },
    });
    clock.set_astro(Some(Astro {
        moonrise: Some("11:38 AM".to_string()),
        moonset: Some("08:02 PM".to_string()),
    }));
    for _ in 0..120 {
        clock.tick();
    }

    let picker = LocationSelectScreen::new(locations.all(), locations.current_index());

    let mut out = String::new();
    out.push_str(&render_screen(width, height, "Clock", |a, b| {
        (&clock).render(a, b)
    })?);
    out.push('\n');
    for theme in [ClockTheme::Gold, ClockTheme::White] {
        clock.set_theme(theme);
        out.push_str(&render_screen(width, height, &format!("Clock [{theme}]"), |a, b| {
            (&clock).render(a, b)
        })?);
        out.push('\n');
    }
    out.push_str(&render_screen(width, height, "LocationSelect", |a, b| {
        (&clock).render(a, b);
        (&picker).render(a, b);
    })?);

    print!("{}", out);
    Ok(())
}
