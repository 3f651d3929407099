//! Analog clock ringed by the zodiac with orbiting planets

use crate::tui::theme::{self, ClockTheme};
use crate::zodiac::{polar, sign_angle, ZodiacReading, ORBITERS, ZODIAC};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Widget,
    },
};
use std::time::Duration;

const SIZE: f64 = 340.0;
const CENTER: f64 = SIZE / 2.0;
const R_OUTER: f64 = 155.0;
const R_MINUTE: f64 = 150.0;
const R_NUMBER: f64 = 125.0;
const R_ZODIAC: f64 = 110.0;
const R_PLANET: f64 = 90.0;

const HOUR_HAND: f64 = 70.0;
const MINUTE_HAND: f64 = 95.0;
const SECOND_HAND: f64 = 115.0;

/// Face point at `deg`/`r`, flipped into canvas space (y up)
fn face(deg: f64, r: f64) -> (f64, f64) {
    let (x, y) = polar(CENTER, CENTER, deg, r);
    (x, SIZE - y)
}

pub struct ZodiacClock {
    reading: ZodiacReading,
    elapsed: Duration,
    theme: ClockTheme,
}

impl ZodiacClock {
    pub fn new(reading: ZodiacReading) -> Self {
        Self {
            reading,
            elapsed: Duration::ZERO,
            theme: ClockTheme::default(),
        }
    }

    /// Time since the clock was mounted; drives the orbits
    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn theme(mut self, theme: ClockTheme) -> Self {
        self.theme = theme;
        self
    }

    fn hand(ctx: &mut Context, deg: f64, len: f64, color: Color) {
        let (x2, y2) = face(deg, len);
        ctx.draw(&CanvasLine {
            x1: CENTER,
            y1: CENTER,
            x2,
            y2,
            color,
        });
    }

    fn glow_body(ctx: &mut Context, x: f64, y: f64, r: f64, color: Color, intensity: f64) {
        for radius in [r, r + 4.0 * intensity, r + 8.0 * intensity] {
            ctx.draw(&Circle {
                x,
                y,
                radius,
                color,
            });
        }
    }

    fn paint(&self, ctx: &mut Context) {
        let palette = self.theme.palette();

        ctx.draw(&Circle {
            x: CENTER,
            y: CENTER,
            radius: R_OUTER,
            color: palette.ring,
        });

        for i in 0..60 {
            let deg = i as f64 * 6.0;
            let inner = if i % 5 == 0 { R_MINUTE - 14.0 } else { R_MINUTE - 7.0 };
            let (x1, y1) = face(deg, R_MINUTE);
            let (x2, y2) = face(deg, inner);
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color: theme::TICK,
            });
        }

        ctx.draw(&Circle {
            x: CENTER,
            y: CENTER,
            radius: R_ZODIAC,
            color: palette.zodiac,
        });

        for orbiter in &ORBITERS {
            let (x, y) = face(orbiter.angle(self.elapsed), R_PLANET - orbiter.inset);
            let (color, r) = match orbiter.name() {
                "Venus" => (theme::VENUS, 5.0),
                "Mars" => (theme::MARS, 6.0),
                _ => (palette.glow, 4.0),
            };
            let intensity = if orbiter.planet == self.reading.active_planet {
                2.0
            } else {
                1.0
            };
            Self::glow_body(ctx, x, y, r, color, intensity);
        }

        Self::hand(ctx, self.reading.hour_angle, HOUR_HAND, theme::HAND_HOUR);
        Self::hand(ctx, self.reading.minute_angle, MINUTE_HAND, theme::HAND_MINUTE);
        Self::hand(ctx, self.reading.second_angle, SECOND_HAND, theme::HAND_SECOND);

        for i in 0..12 {
            let (x, y) = face((i + 1) as f64 * 30.0, R_NUMBER);
            ctx.print(
                x,
                y,
                Span::styled(
                    (i + 1).to_string(),
                    Style::default()
                        .fg(theme::NUMERAL)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }

        for (i, glyph) in ZODIAC.iter().enumerate() {
            let (x, y) = face(sign_angle(i), R_ZODIAC - 12.0);
            let style = if i == self.reading.active_sign {
                Style::default()
                    .fg(palette.glow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::SIGN_IDLE)
            };
            ctx.print(x, y, Span::styled(*glyph, style));
        }

        let label = Style::default().fg(palette.glow);
        let outer = R_OUTER + 8.0;
        ctx.print(
            CENTER - 12.0,
            CENTER + outer,
            Span::styled(self.reading.planet_name(), label),
        );
        ctx.print(
            CENTER,
            CENTER - outer - 2.0,
            Span::styled(self.reading.sign_glyph(), label),
        );
    }
}

impl Widget for ZodiacClock {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 4 {
            return;
        }

        // Keep the face round: a cell is about twice as tall as wide
        let height = area.height.min(area.width / 2);
        let width = height * 2;
        let face_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, SIZE])
            .y_bounds([0.0, SIZE])
            .paint(|ctx| self.paint(ctx));
        if let Some(bg) = self.theme.palette().bg {
            canvas = canvas.background_color(bg);
        }
        canvas.render(face_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeFields;

    fn rendered(fields: TimeFields, theme: ClockTheme) -> Buffer {
        let area = Rect::new(0, 0, 80, 40);
        let mut buf = Buffer::empty(area);
        ZodiacClock::new(ZodiacReading::from_fields(&fields))
            .theme(theme)
            .render(area, &mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_active_planet_name() {
        let buf = rendered(TimeFields::new(6, 0, 0), ClockTheme::Cosmic);
        assert!(text(&buf).contains("Mars"));
    }

    #[test]
    fn draws_numerals() {
        let buf = rendered(TimeFields::new(1, 2, 3), ClockTheme::Gold);
        let s = text(&buf);
        assert!(s.contains("12"));
        assert!(s.contains('♈'));
    }

    #[test]
    fn face_points_up_at_zero() {
        let (x, y) = face(0.0, 100.0);
        assert!((x - CENTER).abs() < 1e-9);
        assert!((y - (CENTER + 100.0)).abs() < 1e-9);
    }
}
