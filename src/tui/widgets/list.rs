//! Scrolling selection list

use crate::tui::theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// One row of a [`SelectList`]
pub struct ListItem {
    pub label: String,
    pub detail: Option<String>,
    pub marked: bool,
}

impl ListItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            marked: false,
        }
    }

    /// Right-aligned secondary text
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Show the "current" marker
    pub fn marked(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }
}

/// A single-select list that keeps the cursor row visible
pub struct SelectList<'a> {
    items: &'a [ListItem],
    selected: usize,
    frame: u64,
}

impl<'a> SelectList<'a> {
    pub fn new(items: &'a [ListItem]) -> Self {
        Self {
            items,
            selected: 0,
            frame: 0,
        }
    }

    pub fn selected(mut self, idx: usize) -> Self {
        self.selected = idx;
        self
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: usize, len: usize, rows: usize) -> usize {
    if rows == 0 || len <= rows {
        return 0;
    }
    let half = rows / 2;
    selected.saturating_sub(half).min(len - rows)
}

impl Widget for SelectList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height as usize;
        let offset = scroll_offset(self.selected, self.items.len(), rows);

        for (row, (idx, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows)
            .enumerate()
        {
            let y = area.y + row as u16;
            let is_selected = idx == self.selected;

            if is_selected {
                buf.set_style(Rect::new(area.x, y, area.width, 1), theme::highlight());
                let cursor = ['▸', '▹'][(self.frame / 20) as usize % 2];
                buf.set_string(area.x, y, cursor.to_string(), theme::cursor());
            }

            let label_style = if is_selected {
                theme::highlight()
            } else {
                theme::normal()
            };
            let label_width = area.width.saturating_sub(4) as usize;
            buf.set_string(
                area.x + 2,
                y,
                theme::truncate_str(&item.label, label_width),
                label_style,
            );

            if item.marked {
                buf.set_string(area.x + area.width.saturating_sub(1), y, "●", theme::cursor());
            }

            if let Some(ref detail) = item.detail {
                let label_end = area.x + 3 + theme::text_width(&item.label);
                let detail_x = (area.x + area.width)
                    .saturating_sub(theme::text_width(detail) + 2);
                if detail_x > label_end {
                    let style = if is_selected {
                        theme::highlight()
                    } else {
                        theme::muted()
                    };
                    buf.set_string(detail_x, y, detail, style);
                }
            }
        }

        if offset > 0 {
            buf.set_string(area.x + area.width.saturating_sub(1), area.y, "↑", theme::dim());
        }
        if offset + rows < self.items.len() && area.height > 0 {
            buf.set_string(
                area.x + area.width.saturating_sub(1),
                area.y + area.height - 1,
                "↓",
                theme::dim(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 18, 5), 0);
        assert_eq!(scroll_offset(10, 18, 5), 8);
        assert_eq!(scroll_offset(17, 18, 5), 13);
        assert_eq!(scroll_offset(3, 4, 10), 0);
    }

    #[test]
    fn renders_visible_window() {
        let items: Vec<ListItem> = (0..10).map(|i| ListItem::new(format!("item{i}"))).collect();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SelectList::new(&items).selected(9).render(area, &mut buf);
        assert_eq!(buf[(2, 2)].symbol(), "i");
        assert_eq!(buf[(6, 2)].symbol(), "9");
        assert_eq!(buf[(6, 0)].symbol(), "7");
    }
}
