//! Night-sky colour palette and styling
//!
//! Text sits on top of a time-derived gradient, so most styles are light
//! foregrounds without a background of their own.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

// ============================================================================
// Color Palette
// ============================================================================

/// Deep night backgrounds
pub const BG_VOID: Color = Color::Rgb(4, 4, 10);
pub const BG: Color = Color::Rgb(10, 10, 22);
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 30, 60);

/// Text colors
pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
pub const TEXT_SECONDARY: Color = Color::Rgb(200, 200, 215);
pub const TEXT_MUTED: Color = Color::Rgb(130, 130, 150);
pub const TEXT_DIM: Color = Color::Rgb(70, 70, 90);

/// Moon surface and shadow
pub const MOON_LIT: Color = Color::Rgb(240, 240, 230);
pub const MOON_SHADOW: Color = Color::Rgb(35, 35, 45);
pub const MOON_GLOW: Color = Color::Rgb(0, 234, 255);

/// Clock hands and planets
pub const HAND_HOUR: Color = Color::Rgb(255, 255, 255);
pub const HAND_MINUTE: Color = Color::Rgb(204, 204, 204);
pub const HAND_SECOND: Color = Color::Rgb(255, 85, 85);
pub const TICK: Color = Color::Rgb(119, 119, 119);
pub const NUMERAL: Color = Color::Rgb(255, 255, 255);
pub const SIGN_IDLE: Color = Color::Rgb(170, 170, 170);
pub const VENUS: Color = Color::Rgb(255, 217, 102);
pub const MARS: Color = Color::Rgb(255, 107, 107);

// ============================================================================
// Style Presets
// ============================================================================

/// Big clock digits
pub fn clock() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn normal() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item
pub fn highlight() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn cursor() -> Style {
    Style::default()
        .fg(MOON_GLOW)
        .add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn border_focused() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

// ============================================================================
// Zodiac clock themes
// ============================================================================

/// Colours of the zodiac clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockPalette {
    pub ring: Color,
    pub glow: Color,
    pub zodiac: Color,
    pub bg: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockTheme {
    Dark,
    Gold,
    #[default]
    Cosmic,
    White,
}

impl ClockTheme {
    pub const ALL: [ClockTheme; 4] = [
        ClockTheme::Dark,
        ClockTheme::Gold,
        ClockTheme::Cosmic,
        ClockTheme::White,
    ];

    pub fn palette(self) -> ClockPalette {
        match self {
            ClockTheme::Dark => ClockPalette {
                ring: Color::Rgb(0x55, 0x55, 0x55),
                glow: Color::Rgb(0xff, 0xff, 0xff),
                zodiac: Color::Rgb(0x88, 0x88, 0xff),
                bg: None,
            },
            ClockTheme::Gold => ClockPalette {
                ring: Color::Rgb(0xbf, 0xa1, 0x4a),
                glow: Color::Rgb(0xff, 0xd9, 0x66),
                zodiac: Color::Rgb(0xff, 0xdd, 0x88),
                bg: None,
            },
            ClockTheme::Cosmic => ClockPalette {
                ring: Color::Rgb(0x6a, 0x5a, 0xcd),
                glow: Color::Rgb(0x9f, 0x8c, 0xff),
                zodiac: Color::Rgb(0xb1, 0x9c, 0xff),
                bg: None,
            },
            ClockTheme::White => ClockPalette {
                ring: Color::Rgb(0xcc, 0xcc, 0xcc),
                glow: Color::Rgb(0xff, 0xff, 0xff),
                zodiac: Color::Rgb(0xaa, 0xaa, 0xff),
                bg: Some(Color::Rgb(0x11, 0x11, 0x11)),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClockTheme::Dark => "dark",
            ClockTheme::Gold => "gold",
            ClockTheme::Cosmic => "cosmic",
            ClockTheme::White => "white",
        }
    }

    /// Next theme in [`ClockTheme::ALL`], wrapping around
    pub fn next(self) -> ClockTheme {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ClockTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClockTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown theme '{s}' (expected dark, gold, cosmic or white)"))
    }
}

// ============================================================================
// Glyphs
// ============================================================================

pub mod glyphs {
    pub const STAR_BRIGHT: char = '✦';
    pub const STAR: char = '·';
    pub const STAR_FAINT: char = '.';
    pub const THERMOMETER: &str = "🌡";
    pub const PLACEHOLDER: &str = "--:--";
}

// ============================================================================
// Block digits
// ============================================================================

/// Rows in a block-digit glyph
pub const BIG_HEIGHT: u16 = 5;

/// 5-row block glyph for a clock character, `None` if it has no glyph
pub fn big_glyph(c: char) -> Option<[&'static str; 5]> {
    let g = match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        ' ' => [" ", " ", " ", " ", " "],
        _ => return None,
    };
    Some(g)
}

/// Width of `s` in block digits, one blank column between glyphs
pub fn big_width(s: &str) -> u16 {
    let widths: Vec<u16> = s
        .chars()
        .filter_map(big_glyph)
        .map(|g| text_width(g[0]))
        .collect();
    widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16
}

// ============================================================================
// Text helpers
// ============================================================================

/// Display width of `s` in terminal cells
pub fn text_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// X coordinate that centres `s` inside `[x, x + width)`
pub fn center_x(x: u16, width: u16, s: &str) -> u16 {
    x + width.saturating_sub(text_width(s)) / 2
}

/// Truncate to at most `max` display cells, ending in `…` when cut
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parsing() {
        assert_eq!("Gold".parse::<ClockTheme>(), Ok(ClockTheme::Gold));
        assert!("neon".parse::<ClockTheme>().is_err());
        assert_eq!(ClockTheme::default(), ClockTheme::Cosmic);
    }

    #[test]
    fn theme_cycle_wraps() {
        assert_eq!(ClockTheme::White.next(), ClockTheme::Dark);
        assert_eq!(ClockTheme::Dark.next(), ClockTheme::Gold);
    }

    #[test]
    fn only_white_has_background() {
        for t in ClockTheme::ALL {
            assert_eq!(t.palette().bg.is_some(), t == ClockTheme::White);
        }
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_str("Mexico City", 20), "Mexico City");
        assert_eq!(truncate_str("Mexico City", 6), "Mexic…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn big_digit_width() {
        assert_eq!(big_width("3:07:09"), 3 * 5 + 2 + 6);
        assert_eq!(big_width("10"), 7);
        assert!(big_glyph('x').is_none());
    }

    #[test]
    fn centring() {
        assert_eq!(center_x(0, 10, "abcd"), 3);
        assert_eq!(center_x(5, 2, "abcd"), 5);
    }
}
