//! Bordered panel drawn over the gradient

use crate::tui::theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// A panel with rounded borders and an optional translucent fill
pub struct Panel<'a> {
    title: Option<&'a str>,
    focused: bool,
    fill: Option<Color>,
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self {
            title: None,
            focused: false,
            fill: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Paint the interior with `color` instead of leaving the gradient visible
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

impl Default for Panel<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let style = if self.focused {
            theme::border_focused()
        } else {
            theme::border()
        };
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        if let Some(fill) = self.fill {
            buf.set_style(area, ratatui::style::Style::default().bg(fill));
            for y in area.y..=bottom {
                for x in area.x..=right {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(" ");
                    }
                }
            }
        }

        for x in (area.x + 1)..right {
            buf.set_string(x, area.y, "─", style);
            buf.set_string(x, bottom, "─", style);
        }
        for y in (area.y + 1)..bottom {
            buf.set_string(area.x, y, "│", style);
            buf.set_string(right, y, "│", style);
        }
        buf.set_string(area.x, area.y, "╭", style);
        buf.set_string(right, area.y, "╮", style);
        buf.set_string(area.x, bottom, "╰", style);
        buf.set_string(right, bottom, "╯", style);

        if let Some(title) = self.title {
            let label = format!(" {} ", title);
            let max = area.width.saturating_sub(4) as usize;
            let label = theme::truncate_str(&label, max);
            let title_style = if self.focused {
                theme::title()
            } else {
                theme::secondary()
            };
            buf.set_string(area.x + 2, area.y, &label, title_style);
        }
    }
}

/// Usable area inside a panel, one cell of padding on each side
pub fn inner_area(area: Rect) -> Rect {
    if area.width < 4 || area.height < 3 {
        return Rect::default();
    }
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    }
}
