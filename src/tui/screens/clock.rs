//! The clock screen: gradient, time, weather, moon and zodiac clock

use crate::clock::LocalTime;
use crate::color::{clock_color, gradient_row, Rgb};
use crate::location::Location;
use crate::lunar::{classify_phase, lunar_age_days, lunar_age_fraction, LunarPhase};
use crate::tui::theme::{self, big_glyph, big_width, glyphs, ClockTheme, BIG_HEIGHT};
use crate::tui::widgets::{inner_area, MoonWidget, Panel, PhasePreview, Starfield, ZodiacClock};
use crate::weather::{Astro, CurrentWeather};
use crate::zodiac::ZodiacReading;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Widget,
};
use std::time::Duration;

/// Nominal duration of one animation frame
pub const FRAME: Duration = Duration::from_millis(16);

/// Rows for the phase cycle panel: border, four disc rows, two label rows
const PREVIEW_HEIGHT: u16 = 8;

/// Mask change per frame; a full sweep takes ~900ms
const MASK_STEP: f64 = 1.0 / 56.0;

/// Weather as last received, with the city it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub current: CurrentWeather,
}

pub struct ClockScreen {
    frame: u64,
    location: Location,
    theme: ClockTheme,
    time: LocalTime,
    color: Rgb,
    reading: ZodiacReading,
    lunar_fraction: f64,
    phase: LunarPhase,
    mask_target: f64,
    mask_shown: f64,
    lunar_date: NaiveDate,
    weather: Option<WeatherReport>,
    astro: Option<Astro>,
    weather_enabled: bool,
    stars: Starfield,
}

impl ClockScreen {
    pub fn new(location: Location, now: LocalTime, theme: ClockTheme, stars: Starfield) -> Self {
        let fields = now.fields();
        let mut screen = Self {
            frame: 0,
            location,
            theme,
            time: now,
            color: clock_color(&fields),
            reading: ZodiacReading::from_fields(&fields),
            lunar_fraction: 0.0,
            phase: LunarPhase::FullMoon,
            mask_target: 1.0,
            mask_shown: 1.0,
            lunar_date: now.date(),
            weather: None,
            astro: None,
            weather_enabled: true,
            stars,
        };
        screen.update_lunar();
        screen
    }

    /// Advance one animation frame
    pub fn tick(&mut self) {
        self.frame += 1;
        let delta = self.mask_target - self.mask_shown;
        if delta.abs() <= MASK_STEP {
            self.mask_shown = self.mask_target;
        } else {
            self.mask_shown += MASK_STEP * delta.signum();
        }
    }

    /// Apply a clock reading.
    ///
    /// Readings for another timezone are ignored. Returns `true` when the
    /// local date changed, which also refreshes the lunar phase.
    pub fn set_time(&mut self, time: LocalTime) -> bool {
        if time.zone != self.location.zone {
            return false;
        }
        let fields = time.fields();
        self.time = time;
        self.color = clock_color(&fields);
        self.reading = ZodiacReading::from_fields(&fields);

        if time.date() != self.lunar_date {
            self.update_lunar();
            return true;
        }
        false
    }

    /// Switch to another location, keeping the last weather report on screen
    pub fn set_location(&mut self, location: Location, now: LocalTime) {
        self.location = location;
        self.astro = None;
        self.lunar_date = now.date();
        self.set_time(now);
        self.update_lunar();
    }

    fn update_lunar(&mut self) {
        self.lunar_fraction = lunar_age_fraction(self.time.datetime);
        let (phase, mask) = classify_phase(self.lunar_fraction);
        self.phase = phase;
        self.mask_target = mask;
        self.lunar_date = self.time.date();
    }

    pub fn set_weather(&mut self, report: WeatherReport) {
        self.weather = Some(report);
    }

    pub fn set_astro(&mut self, astro: Option<Astro>) {
        self.astro = astro;
    }

    pub fn set_weather_enabled(&mut self, enabled: bool) {
        self.weather_enabled = enabled;
    }

    pub fn set_theme(&mut self, theme: ClockTheme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> ClockTheme {
        self.theme
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn time(&self) -> &LocalTime {
        &self.time
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn reading(&self) -> &ZodiacReading {
        &self.reading
    }

    pub fn phase(&self) -> LunarPhase {
        self.phase
    }

    pub fn lunar_fraction(&self) -> f64 {
        self.lunar_fraction
    }

    pub fn mask_target(&self) -> f64 {
        self.mask_target
    }

    pub fn mask_shown(&self) -> f64 {
        self.mask_shown
    }

    pub fn weather(&self) -> Option<&WeatherReport> {
        self.weather.as_ref()
    }

    pub fn astro(&self) -> Option<&Astro> {
        self.astro.as_ref()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Animation time since the screen was mounted
    pub fn elapsed(&self) -> Duration {
        FRAME * self.frame.min(u32::MAX as u64) as u32
    }

    fn weather_line(&self) -> (String, Style) {
        if !self.weather_enabled {
            return ("weather offline".to_string(), theme::dim());
        }
        match &self.weather {
            Some(report) => {
                let mut line = format!("{} {}", glyphs::THERMOMETER, report.current.summary());
                if report.city != self.location.city {
                    line.push_str(&format!("  ({})", report.city));
                }
                (line, theme::normal())
            }
            None => ("fetching weather…".to_string(), theme::muted()),
        }
    }

    fn moon_times(&self) -> String {
        let rise = self
            .astro
            .as_ref()
            .and_then(|a| a.moonrise.as_deref())
            .unwrap_or(glyphs::PLACEHOLDER);
        let set = self
            .astro
            .as_ref()
            .and_then(|a| a.moonset.as_deref())
            .unwrap_or(glyphs::PLACEHOLDER);
        format!("Moonrise {rise}  ·  Moonset {set}")
    }
}

fn paint_gradient(area: Rect, buf: &mut Buffer, top: Rgb) {
    for row in 0..area.height {
        let color = gradient_row(top, row, area.height);
        let line = Rect::new(area.x, area.y + row, area.width, 1);
        buf.set_style(line, Style::default().bg(color.into()));
        for x in area.x..(area.x + area.width) {
            if let Some(cell) = buf.cell_mut((x, area.y + row)) {
                cell.set_symbol(" ");
            }
        }
    }
}

fn render_centered(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
    let text = theme::truncate_str(text, area.width as usize);
    buf.set_string(theme::center_x(area.x, area.width, &text), area.y, &text, style);
}

/// Draw `text` in block digits, falling back to plain text when too narrow
fn render_big_time(area: Rect, buf: &mut Buffer, text: &str, suffix: &str) {
    let width = big_width(text);
    let suffix_width = theme::text_width(suffix) + 1;
    if area.height < BIG_HEIGHT || width + suffix_width > area.width {
        let plain = format!("{text} {suffix}");
        let mid = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        render_centered(mid, buf, &plain, theme::clock());
        return;
    }

    let mut x = area.x + (area.width - width - suffix_width) / 2;
    for c in text.chars() {
        let Some(glyph) = big_glyph(c) else {
            continue;
        };
        for (row, line) in glyph.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    buf.set_string(x + col as u16, area.y + row as u16, ch.to_string(), theme::clock());
                }
            }
        }
        x += theme::text_width(glyph[0]) + 1;
    }
    buf.set_string(x, area.y + BIG_HEIGHT - 1, suffix, theme::title());
}

impl Widget for &ClockScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        paint_gradient(area, buf, self.color);

        let chunks = Layout::vertical([
            Constraint::Length(1),              // Top padding
            Constraint::Length(1),              // Location
            Constraint::Length(1),              // Spacer
            Constraint::Length(BIG_HEIGHT),     // Time
            Constraint::Length(1),              // Date
            Constraint::Length(1),              // Spacer
            Constraint::Length(1),              // Weather
            Constraint::Length(1),              // Spacer
            Constraint::Min(8),                 // Moon + zodiac
            Constraint::Length(PREVIEW_HEIGHT), // Phase cycle
            Constraint::Length(1),              // Help
        ])
        .split(area);

        let header = format!(
            "{}  ·  {}",
            self.location.label,
            self.location.timezone_name()
        );
        render_centered(chunks[1], buf, &header, theme::secondary());

        let display = self.time.display_time();
        let (clock, suffix) = display.split_once(' ').unwrap_or((display.as_str(), ""));
        render_big_time(chunks[3], buf, clock, suffix);

        render_centered(chunks[4], buf, &self.time.display_date(), theme::normal());

        let (weather, weather_style) = self.weather_line();
        render_centered(chunks[6], buf, &weather, weather_style);

        let [moon_area, zodiac_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(chunks[8]);

        // Moon panel
        Panel::new().title("Moon").render(moon_area, buf);
        let inner = inner_area(moon_area);
        if inner.height >= 3 {
            let label = format!(
                "Today: {}  ({:.1} days)",
                self.phase,
                lunar_age_days(self.time.datetime)
            );
            render_centered(Rect { height: 1, ..inner }, buf, &label, theme::title());
            let disc = Rect {
                y: inner.y + 1,
                height: inner.height - 2,
                ..inner
            };
            MoonWidget::new(self.phase, self.mask_shown)
                .frame(self.frame)
                .render(disc, buf);
            let times = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            render_centered(times, buf, &self.moon_times(), theme::secondary());
        }

        // Zodiac clock
        Panel::new().title("Zodiac").render(zodiac_area, buf);
        ZodiacClock::new(self.reading)
            .elapsed(self.elapsed())
            .theme(self.theme)
            .render(inner_area(zodiac_area), buf);

        Panel::new().title("Moon Cycle").render(chunks[9], buf);
        PhasePreview::new()
            .current(self.phase)
            .frame(self.frame)
            .render(inner_area(chunks[9]), buf);

        // Stars fill whatever is still blank in the upper half
        let sky = Rect {
            height: chunks[8].y.saturating_sub(area.y),
            ..area
        };
        self.stars.widget(self.frame).render(sky, buf);

        let help = format!(
            "[L] Location  [T] Theme: {}  [R] Refresh  [Q] Quit",
            self.theme
        );
        render_centered(chunks[10], buf, &help, theme::muted());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_time_at;
    use crate::location::{default_locations, LocationSet};
    use crate::weather::Condition;
    use chrono::{DateTime, Utc};
    use ratatui::style::Color;

    fn location(label: &str) -> Location {
        let mut set = LocationSet::from_specs(&default_locations()).unwrap();
        set.select_label(label).unwrap().clone()
    }

    fn at(loc: &Location, s: &str) -> LocalTime {
        let instant = DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        local_time_at(loc.zone, instant)
    }

    fn screen(label: &str, s: &str) -> ClockScreen {
        let loc = location(label);
        let now = at(&loc, s);
        ClockScreen::new(loc, now, ClockTheme::Cosmic, Starfield::default())
    }

    #[test]
    fn colour_tracks_time() {
        // 03:07:00 in London (UTC in winter)
        let s = screen("London", "2024-01-15T03:07:00Z");
        assert_eq!(s.color(), Rgb::new(170, 170, 85));
    }

    #[test]
    fn readings_for_other_zones_are_ignored() {
        let mut s = screen("London", "2024-01-15T03:07:00Z");
        let tokyo = location("Tokyo");
        let stray = at(&tokyo, "2024-01-15T03:08:00Z");
        assert!(!s.set_time(stray));
        assert_eq!(s.time().fields().minute, 7);
    }

    #[test]
    fn date_rollover_refreshes_phase() {
        let loc = location("London");
        let mut s = screen("London", "2024-01-15T23:59:59Z");
        assert!(!s.set_time(at(&loc, "2024-01-15T23:59:59Z")));
        assert!(s.set_time(at(&loc, "2024-01-16T00:00:00Z")));
        let expected = classify_phase(lunar_age_fraction(s.time().datetime));
        assert_eq!((s.phase(), s.mask_target()), expected);
    }

    #[test]
    fn location_change_clears_astro_keeps_weather() {
        let mut s = screen("London", "2024-01-15T12:00:00Z");
        s.set_weather(WeatherReport {
            city: "London".into(),
            current: CurrentWeather {
                temp_c: 7.0,
                condition: Condition {
                    text: "Overcast".into(),
                    icon: String::new(),
                },
            },
        });
        s.set_astro(Some(Astro::default()));

        let tokyo = location("Tokyo");
        let now = at(&tokyo, "2024-01-15T12:00:00Z");
        s.set_location(tokyo, now);

        assert_eq!(s.location().label, "Tokyo");
        assert!(s.astro().is_none());
        assert_eq!(s.weather().unwrap().city, "London");
        assert_eq!(s.time().fields().hour, 21);
        assert!(s.weather_line().0.contains("(London)"));
    }

    #[test]
    fn mask_eases_toward_target() {
        // Three days after the 2000-01-06 new moon is a waxing crescent
        let mut s = screen("London", "2000-01-09T14:24:00Z");
        assert_eq!(s.phase(), LunarPhase::WaxingCrescent);
        assert_eq!(s.mask_target(), 0.28);
        assert_eq!(s.mask_shown(), 1.0);
        s.tick();
        assert!(s.mask_shown() < 1.0);
        for _ in 0..60 {
            s.tick();
        }
        assert_eq!(s.mask_shown(), 0.28);
    }

    #[test]
    fn location_change_recomputes_phase() {
        // 23:30 in London is already the next morning in Tokyo
        let mut s = screen("London", "2024-01-15T23:30:00Z");
        let london_fraction = s.lunar_fraction();

        let tokyo = location("Tokyo");
        let now = at(&tokyo, "2024-01-15T23:30:00Z");
        s.set_location(tokyo, now);

        assert_eq!(s.time().iso_date(), "2024-01-16");
        let fraction = lunar_age_fraction(now.datetime);
        assert_eq!(s.lunar_fraction(), fraction);
        assert_ne!(s.lunar_fraction(), london_fraction);
        assert_eq!((s.phase(), s.mask_target()), classify_phase(fraction));
    }

    #[test]
    fn placeholders_without_astro() {
        let s = screen("Mumbai", "2024-01-15T12:00:00Z");
        assert_eq!(s.moon_times(), "Moonrise --:--  ·  Moonset --:--");
    }

    #[test]
    fn renders_header_and_phase() {
        let s = screen("Nepal", "2024-01-15T12:00:00Z");
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        s.render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Asia/Kathmandu"));
        assert!(text.contains(&format!("Today: {}", s.phase())));
        assert!(text.contains("Moonrise --:--"));
        assert!(text.contains("Moon Cycle"));
        for word in ["New Moon", "Full Moon", "Crescent", "Gibbous", "Quarter"] {
            assert!(text.contains(word), "missing {word}");
        }
        assert_eq!(buf[(0, 0)].bg, Color::from(s.color()));
    }
}
