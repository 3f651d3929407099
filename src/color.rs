//! Digital-sum colour mapping
//!
//! Each clock field is reduced to the number of 1-bits in its binary form,
//! that count picks a primary colour, and the three primaries are averaged
//! into the background colour.

use crate::clock::TimeFields;
use ratatui::style::Color;

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// CSS-style `rgb(r,g,b)` string
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value.r, value.g, value.b)
    }
}

/// Number of 1-bits in `value`
pub fn digital_sum(value: u32) -> u32 {
    value.count_ones()
}

/// Base colour for a single clock field.
///
/// Popcount 1, 2 and 3 give blue, red and green. Every other count,
/// including zero, gives white.
pub fn color_for_field(value: u32) -> Rgb {
    match digital_sum(value) {
        1 => Rgb::BLUE,
        2 => Rgb::RED,
        3 => Rgb::GREEN,
        _ => Rgb::WHITE,
    }
}

/// Channel-wise integer average of three colours
pub fn mix(a: Rgb, b: Rgb, c: Rgb) -> Rgb {
    let avg = |x: u8, y: u8, z: u8| ((x as u16 + y as u16 + z as u16) / 3) as u8;
    Rgb {
        r: avg(a.r, b.r, c.r),
        g: avg(a.g, b.g, c.g),
        b: avg(a.b, b.b, c.b),
    }
}

/// Background colour for a moment on the clock
pub fn clock_color(fields: &TimeFields) -> Rgb {
    mix(
        color_for_field(fields.hour),
        color_for_field(fields.minute),
        color_for_field(fields.second),
    )
}

/// Colour of `row` in a `rows`-tall gradient from `top` down to black
pub fn gradient_row(top: Rgb, row: u16, rows: u16) -> Rgb {
    if rows <= 1 {
        return top;
    }
    let remaining = (rows - 1 - row.min(rows - 1)) as u32;
    let span = (rows - 1) as u32;
    let scale = |c: u8| (c as u32 * remaining / span) as u8;
    Rgb {
        r: scale(top.r),
        g: scale(top.g),
        b: scale(top.b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_color_depends_only_on_popcount() {
        for v in 0..60u32 {
            let expected = match v.count_ones() {
                1 => Rgb::BLUE,
                2 => Rgb::RED,
                3 => Rgb::GREEN,
                _ => Rgb::WHITE,
            };
            assert_eq!(color_for_field(v), expected, "value {v}");
        }
    }

    #[test]
    fn zero_and_high_popcounts_are_white() {
        assert_eq!(color_for_field(0), Rgb::WHITE);
        assert_eq!(color_for_field(15), Rgb::WHITE);
        // 59 = 0b111011
        assert_eq!(color_for_field(59), Rgb::WHITE);
        assert_eq!(color_for_field(1), Rgb::BLUE);
        assert_eq!(color_for_field(3), Rgb::RED);
        assert_eq!(color_for_field(7), Rgb::GREEN);
    }

    #[test]
    fn mix_is_order_independent_and_bounded() {
        let samples = [Rgb::BLUE, Rgb::RED, Rgb::GREEN, Rgb::WHITE, Rgb::new(1, 2, 254)];
        for a in samples {
            for b in samples {
                for c in samples {
                    let m = mix(a, b, c);
                    assert_eq!(m, mix(c, a, b));
                    assert_eq!(m, mix(b, c, a));
                    assert_eq!(m, mix(b, a, c));
                }
            }
        }
        assert_eq!(mix(Rgb::WHITE, Rgb::WHITE, Rgb::WHITE), Rgb::WHITE);
    }

    #[test]
    fn three_oh_seven_and_zero_seconds() {
        let fields = TimeFields::new(3, 7, 0);
        assert_eq!(clock_color(&fields), Rgb::new(170, 170, 85));
    }

    #[test]
    fn clock_color_is_repeatable() {
        let fields = TimeFields::new(23, 59, 58);
        assert_eq!(clock_color(&fields), clock_color(&fields));
    }

    #[test]
    fn gradient_fades_to_black() {
        let top = Rgb::new(200, 100, 50);
        assert_eq!(gradient_row(top, 0, 11), top);
        assert_eq!(gradient_row(top, 10, 11), Rgb::BLACK);
        assert_eq!(gradient_row(top, 5, 11), Rgb::new(100, 50, 25));
        assert_eq!(gradient_row(top, 0, 1), top);
    }

    #[test]
    fn css_string() {
        assert_eq!(Rgb::new(170, 170, 85).css(), "rgb(170,170,85)");
    }
}
