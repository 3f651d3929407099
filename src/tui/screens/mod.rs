//! TUI screens for lunaclock

mod clock;
mod location_select;

pub use clock::{ClockScreen, WeatherReport, FRAME};
pub use location_select::LocationSelectScreen;
