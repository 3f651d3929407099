//! Terminal front end for lunaclock
//!
//! Owns the alternate screen and turns crossterm input plus a frame timer
//! into a single event stream.

pub mod screens;
pub mod theme;
pub mod widgets;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal wrapper with RAII cleanup
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Initialize the terminal in raw mode
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore terminal to normal state
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Terminal events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    Key(KeyCode),
    Resize(u16, u16),
    Tick,
}

/// Spawn the frame timer and the input reader
pub fn spawn_event_reader() -> mpsc::UnboundedReceiver<TermEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    let tx_tick = tx.clone();

    // Frame timer (~60fps) for the starfield, moon glow and orbits
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(screens::FRAME);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx_tick.send(TermEvent::Tick).is_err() {
                break;
            }
        }
    });

    // crossterm polling blocks, keep it off the async workers
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
            continue;
        }
        let Ok(event) = event::read() else {
            continue;
        };
        let term_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => TermEvent::Key(key.code),
            Event::Resize(w, h) => TermEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(term_event).is_err() {
            break;
        }
    });

    rx
}
