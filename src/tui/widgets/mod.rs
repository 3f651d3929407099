//! Widgets for the clock face, moon and location picker

mod list;
mod moon;
mod panel;
mod starfield;
mod zodiac_clock;

pub use list::{scroll_offset, ListItem, SelectList};
pub use moon::{glow_level, is_lit, preview_mask, MoonWidget, PhasePreview};
pub use panel::{inner_area, Panel};
pub use starfield::{drift, Star, Starfield, StarfieldWidget};
pub use zodiac_clock::ZodiacClock;
