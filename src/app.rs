//! Application state for the lunaclock TUI
//!
//! All state lives here and is only touched from the main loop. Background
//! work (the clock ticker, weather fetches) reports back over [`AppEvent`]s.

use crate::clock::{local_now, LocalTime};
use crate::location::{Location, LocationSet};
use crate::ticker::ClockTicker;
use crate::tui::screens::{ClockScreen, LocationSelectScreen, WeatherReport};
use crate::tui::theme::ClockTheme;
use crate::tui::widgets::Starfield;
use crate::weather::{Astro, CurrentWeather, WeatherClient};
use crossterm::event::KeyCode;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Results delivered by background tasks
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Clock(LocalTime),
    Weather {
        city: String,
        current: CurrentWeather,
    },
    Astronomy {
        city: String,
        date: String,
        astro: Option<Astro>,
    },
}

pub struct App {
    locations: LocationSet,
    pub screen: ClockScreen,
    pub picker: Option<LocationSelectScreen>,
    ticker: Option<ClockTicker>,
    weather: Option<Arc<WeatherClient>>,
    tx: mpsc::UnboundedSender<AppEvent>,
    pub should_quit: bool,
}

impl App {
    /// Build the app and the receiver for its background events.
    ///
    /// Nothing runs until [`App::mount`] is called.
    pub fn new(
        locations: LocationSet,
        theme: ClockTheme,
        weather: Option<WeatherClient>,
        stars: Starfield,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let location = locations.current().clone();
        let now = local_now(location.zone);

        let mut screen = ClockScreen::new(location, now, theme, stars);
        screen.set_weather_enabled(weather.is_some());
        if weather.is_none() {
            info!("no weather API key configured, weather and moonrise disabled");
        }

        let app = Self {
            locations,
            screen,
            picker: None,
            ticker: None,
            weather: weather.map(Arc::new),
            tx,
            should_quit: false,
        };
        (app, rx)
    }

    /// Start the clock ticker and the first fetches
    pub fn mount(&mut self) {
        let zone = self.location().zone;
        let tx = self.tx.clone();
        self.ticker = Some(ClockTicker::spawn(zone, move |t| {
            tx.send(AppEvent::Clock(t)).is_ok()
        }));
        self.refresh();
    }

    /// Stop the clock ticker
    pub fn unmount(&mut self) {
        self.ticker = None;
    }

    pub fn location(&self) -> &Location {
        self.locations.current()
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn ticker(&self) -> Option<&ClockTicker> {
        self.ticker.as_ref()
    }

    /// Switch location: retarget the ticker, recompute the moon, refetch
    pub fn select_location(&mut self, idx: usize) {
        if idx == self.locations.current_index() {
            return;
        }
        let Some(location) = self.locations.select(idx).cloned() else {
            return;
        };
        info!(label = %location.label, zone = location.timezone_name(), "location selected");

        let now = local_now(location.zone);
        self.screen.set_location(location.clone(), now);
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.retarget(location.zone);
        }
        self.refresh();
    }

    /// Fetch weather and astronomy for the current location
    pub fn refresh(&self) {
        self.fetch_weather();
        self.fetch_astronomy();
    }

    fn fetch_weather(&self) {
        let Some(client) = self.weather.clone() else {
            return;
        };
        let city = self.location().city.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match client.current(&city).await {
                Ok(Some(current)) => {
                    let _ = tx.send(AppEvent::Weather { city, current });
                }
                Ok(None) => debug!(%city, "no current weather in response"),
                Err(e) => warn!(%city, error = %e, "weather fetch failed"),
            }
        });
    }

    fn fetch_astronomy(&self) {
        let Some(client) = self.weather.clone() else {
            return;
        };
        let city = self.location().city.clone();
        let date = self.screen.time().iso_date();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let astro = match client.astronomy(&city, &date).await {
                Ok(astro) => astro,
                Err(e) => {
                    warn!(%city, %date, error = %e, "astronomy fetch failed");
                    None
                }
            };
            let _ = tx.send(AppEvent::Astronomy { city, date, astro });
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Clock(time) => {
                let rolled_over = self.screen.set_time(time);
                trace!(time = %time.display_time(), color = %self.screen.color().css(), "tick");
                if rolled_over {
                    debug!(date = %time.iso_date(), "date rolled over");
                    self.screen.set_astro(None);
                    self.fetch_astronomy();
                }
            }
            AppEvent::Weather { city, current } => {
                if city != self.location().city {
                    debug!(%city, "discarding weather for previous location");
                    return;
                }
                self.screen.set_weather(WeatherReport { city, current });
            }
            AppEvent::Astronomy { city, date, astro } => {
                if city != self.location().city || date != self.screen.time().iso_date() {
                    debug!(%city, %date, "discarding stale astronomy");
                    return;
                }
                self.screen.set_astro(astro);
            }
        }
    }

    pub fn tick(&mut self) {
        self.screen.tick();
        if let Some(picker) = self.picker.as_mut() {
            picker.tick();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.should_quit = true;
            return;
        }

        if let Some(picker) = self.picker.as_mut() {
            match key {
                KeyCode::Up | KeyCode::Char('k') => picker.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => picker.select_next(),
                KeyCode::Enter => {
                    let idx = picker.selected_index();
                    self.picker = None;
                    self.select_location(idx);
                }
                KeyCode::Esc => self.picker = None,
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Enter => {
                self.picker = Some(LocationSelectScreen::new(
                    self.locations.all(),
                    self.locations.current_index(),
                ));
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let next = self.screen.theme().next();
                debug!(theme = %next, "theme changed");
                self.screen.set_theme(next);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.screen.render(area, buf);
        if let Some(picker) = &self.picker {
            picker.render(area, buf);
        }
    }
}
