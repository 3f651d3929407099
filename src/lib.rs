//! lunaclock - clock, moon phase and zodiac for a city
//!
//! The colour of the sky comes from the digits of the local time and the
//! moon from its age in the synodic month. Weather and moonrise are
//! fetched from a weather API when a key is configured.

pub mod app;
pub mod clock;
pub mod color;
pub mod config;
pub mod location;
pub mod lunar;
pub mod ticker;
pub mod tui;
pub mod weather;
pub mod zodiac;
