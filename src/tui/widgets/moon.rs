//! Moon disc with a phase reveal and a pulsing halo
//!
//! Drawn with upper-half blocks so each cell carries two vertical pixels.

use crate::lunar::LunarPhase;
use crate::tui::theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Frames for one halo pulse cycle at ~60fps (1.4s out, 1.4s back)
const GLOW_PERIOD: u64 = 168;

/// Whether the pixel at horizontal position `u` (0 = left edge, 1 = right
/// edge of the disc) is lit.
///
/// Waxing moons reveal from the right, waning moons from the left.
pub fn is_lit(u: f64, mask: f64, waning: bool) -> bool {
    if mask <= 0.0 {
        return false;
    }
    if waning {
        u <= mask
    } else {
        u >= 1.0 - mask
    }
}

/// Halo strength in `[0, 1]` for an animation frame
pub fn glow_level(frame: u64) -> f64 {
    let t = (frame % GLOW_PERIOD) as f64 / GLOW_PERIOD as f64;
    0.5 - 0.5 * (t * std::f64::consts::TAU).cos()
}

fn blend(a: Color, b: Color, t: f64) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => b,
    }
}

pub struct MoonWidget {
    phase: LunarPhase,
    mask: f64,
    frame: u64,
}

impl MoonWidget {
    pub fn new(phase: LunarPhase, mask: f64) -> Self {
        Self {
            phase,
            mask: mask.clamp(0.0, 1.0),
            frame: 0,
        }
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }

    /// Colour of one pixel, or `None` outside the halo
    fn pixel(&self, nx: f64, ny: f64, glow: f64) -> Option<Color> {
        let d = (nx * nx + ny * ny).sqrt();
        if d <= 1.0 {
            let u = (nx + 1.0) / 2.0;
            if is_lit(u, self.mask, self.phase.is_waning()) {
                Some(theme::MOON_LIT)
            } else {
                Some(theme::MOON_SHADOW)
            }
        } else if d <= 1.0 + 0.12 * glow {
            Some(blend(theme::BG_VOID, theme::MOON_GLOW, 0.25 + 0.35 * glow))
        } else {
            None
        }
    }
}

impl Widget for MoonWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        // Terminal cells are roughly twice as tall as wide
        let px_rows = area.height as f64 * 2.0;
        let diameter = (area.width as f64).min(px_rows) * 0.85;
        let radius = diameter / 2.0;
        let cx = area.width as f64 / 2.0;
        let cy = px_rows / 2.0;
        let glow = glow_level(self.frame);

        for row in 0..area.height {
            for col in 0..area.width {
                let nx = (col as f64 + 0.5 - cx) / radius;
                let top = self.pixel(nx, (row as f64 * 2.0 + 0.5 - cy) / radius, glow);
                let bottom = self.pixel(nx, (row as f64 * 2.0 + 1.5 - cy) / radius, glow);

                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };
                match (top, bottom) {
                    (Some(t), Some(b)) => {
                        cell.set_symbol("▀").set_fg(t).set_bg(b);
                    }
                    (Some(t), None) => {
                        cell.set_symbol("▀").set_fg(t);
                    }
                    (None, Some(b)) => {
                        cell.set_symbol("▄").set_fg(b);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

/// Smallest share of a preview disc that stays lit, so a new moon still shows
const PREVIEW_MIN_MASK: f64 = 0.1;

/// Mask used for `phase` in the cycle preview
pub fn preview_mask(phase: LunarPhase) -> f64 {
    phase.mask_fraction().max(PREVIEW_MIN_MASK)
}

/// Row of all eight phases, each revealed by its own mask and named below.
///
/// Names that do not fit a column wrap onto a second line at the space.
pub struct PhasePreview {
    current: Option<LunarPhase>,
    frame: u64,
}

impl PhasePreview {
    pub fn new() -> Self {
        Self {
            current: None,
            frame: 0,
        }
    }

    /// Highlight `phase` and give it the pulsing halo
    pub fn current(mut self, phase: LunarPhase) -> Self {
        self.current = Some(phase);
        self
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }
}

impl Default for PhasePreview {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PhasePreview {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = LunarPhase::ALL.len() as u16;
        let col_width = area.width / cols;
        if col_width < 4 || area.height < 4 {
            return;
        }
        let disc_height = area.height - 2;

        for (i, phase) in LunarPhase::ALL.into_iter().enumerate() {
            let col = Rect {
                x: area.x + i as u16 * col_width,
                y: area.y,
                width: col_width,
                height: area.height,
            };
            let is_current = self.current == Some(phase);

            // Glow level is zero at frame 0, so only the current phase pulses
            let frame = if is_current { self.frame } else { 0 };
            MoonWidget::new(phase, preview_mask(phase))
                .frame(frame)
                .render(Rect { height: disc_height, ..col }, buf);

            let style = if is_current {
                theme::cursor()
            } else {
                theme::secondary()
            };
            let name = phase.name();
            let lines = if theme::text_width(name) <= col_width {
                (name, "")
            } else {
                name.split_once(' ').unwrap_or((name, ""))
            };
            for (row, line) in [lines.0, lines.1].into_iter().enumerate() {
                let line = theme::truncate_str(line, col_width as usize);
                buf.set_string(
                    theme::center_x(col.x, col.width, &line),
                    col.y + disc_height + row as u16,
                    &line,
                    style,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn waxing_lights_right_side() {
        assert!(is_lit(0.9, 0.28, false));
        assert!(!is_lit(0.1, 0.28, false));
        assert!(is_lit(0.1, 0.28, true));
        assert!(!is_lit(0.9, 0.28, true));
    }

    #[test]
    fn new_moon_is_dark_and_full_is_lit() {
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            assert!(!is_lit(u, 0.0, false));
            assert!(is_lit(u, 1.0, false));
            assert!(is_lit(u, 1.0, true));
        }
    }

    #[test]
    fn glow_ping_pongs() {
        assert!(glow_level(0) < 1e-9);
        assert!((glow_level(GLOW_PERIOD / 2) - 1.0).abs() < 1e-9);
        assert!(glow_level(GLOW_PERIOD) < 1e-9);
    }

    #[test]
    fn full_moon_centre_is_lit() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        MoonWidget::new(LunarPhase::FullMoon, 1.0).render(area, &mut buf);
        let centre = &buf[(10, 5)];
        assert_eq!(centre.symbol(), "▀");
        assert_eq!(centre.fg, theme::MOON_LIT);
    }

    #[test]
    fn new_moon_centre_is_shadow() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        MoonWidget::new(LunarPhase::NewMoon, 0.0).render(area, &mut buf);
        assert_eq!(buf[(10, 5)].fg, theme::MOON_SHADOW);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn preview_keeps_a_sliver_of_new_moon() {
        assert_eq!(preview_mask(LunarPhase::NewMoon), PREVIEW_MIN_MASK);
        assert_eq!(preview_mask(LunarPhase::FullMoon), 1.0);
        assert_eq!(preview_mask(LunarPhase::WaningCrescent), 0.28);
    }

    #[test]
    fn preview_names_every_phase() {
        let area = Rect::new(0, 0, 160, 6);
        let mut buf = Buffer::empty(area);
        PhasePreview::new()
            .current(LunarPhase::FirstQuarter)
            .render(area, &mut buf);
        let s = text(&buf);
        for phase in LunarPhase::ALL {
            assert!(s.contains(phase.name()), "missing {phase}");
        }
    }

    #[test]
    fn narrow_preview_wraps_names() {
        // 10 columns per phase: two-word names longer than that wrap
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        PhasePreview::new().render(area, &mut buf);
        let s = text(&buf);
        let rows: Vec<&str> = s.lines().collect();
        assert!(rows[4].contains("New Moon") && rows[4].contains("Full Moon"));
        assert!(rows[4].contains("Waxing") && rows[4].contains("Waning"));
        assert!(rows[5].contains("Crescent") && rows[5].contains("Gibbous"));
        assert!(rows[5].contains("Quarter"));
    }

    #[test]
    fn waxing_and_waning_light_opposite_sides() {
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        PhasePreview::new().render(area, &mut buf);
        // Waxing Crescent occupies x 10..20, Waning Crescent x 70..80
        assert_eq!(buf[(17, 2)].fg, theme::MOON_LIT);
        assert_eq!(buf[(12, 2)].fg, theme::MOON_SHADOW);
        assert_eq!(buf[(72, 2)].fg, theme::MOON_LIT);
        assert_eq!(buf[(77, 2)].fg, theme::MOON_SHADOW);
    }
}
