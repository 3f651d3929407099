//! Twinkling starfield
//!
//! Stars are seeded once. A single frame counter animates all of them, so
//! there is nothing per star to start or cancel.

use crate::tui::theme::glyphs;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use std::f64::consts::TAU;

/// Frames for one full drift cycle (22s out and back at ~60fps)
const DRIFT_PERIOD: f64 = 2640.0;

/// Static seed for one star; positions are fractions of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub base: f64,
    /// Frames per twinkle cycle
    pub speed: f64,
    pub phase: f64,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
            size: rng.gen_range(0.8..2.8),
            base: rng.gen_range(0.2..1.0),
            speed: rng.gen_range(48.0..144.0),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Brightness in `[0.2, 1]` at `frame`
    pub fn brightness(&self, frame: u64) -> f64 {
        let wave = (frame as f64 / self.speed * TAU + self.phase).sin();
        (self.base + 0.35 * wave).clamp(0.2, 1.0)
    }

    pub fn glyph(&self, frame: u64) -> char {
        let b = self.brightness(frame) * self.size / 2.8;
        if b > 0.6 {
            glyphs::STAR_BRIGHT
        } else if b > 0.25 {
            glyphs::STAR
        } else {
            glyphs::STAR_FAINT
        }
    }
}

/// Vertical drift in rows at `frame`, within `[-1, 1]`
pub fn drift(frame: u64) -> f64 {
    (frame as f64 / DRIFT_PERIOD * TAU).sin()
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(rng)).collect(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn widget(&self, frame: u64) -> StarfieldWidget<'_> {
        StarfieldWidget {
            stars: &self.stars,
            frame,
        }
    }
}

pub struct StarfieldWidget<'a> {
    stars: &'a [Star],
    frame: u64,
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let offset = drift(self.frame);

        for star in self.stars {
            let col = (star.x * (area.width - 1) as f64).round() as u16;
            let row = (star.y * (area.height - 1) as f64 + offset)
                .round()
                .clamp(0.0, (area.height - 1) as f64) as u16;

            let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                continue;
            };
            // Never draw over text
            if cell.symbol() != " " {
                continue;
            }
            let level = (star.brightness(self.frame) * 255.0) as u8;
            cell.set_char(star.glyph(self.frame))
                .set_fg(Color::Rgb(level, level, level));
        }
    }
}
