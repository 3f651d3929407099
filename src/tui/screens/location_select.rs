//! Location picker popup

use crate::location::Location;
use crate::tui::theme;
use crate::tui::widgets::{ListItem, Panel, SelectList};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Clear, Widget},
};

/// Popup listing every configured location
pub struct LocationSelectScreen {
    frame: u64,
    items: Vec<ListItem>,
    cursor: usize,
}

impl LocationSelectScreen {
    /// `current` is marked and starts under the cursor
    pub fn new(locations: &[Location], current: usize) -> Self {
        let items = locations
            .iter()
            .enumerate()
            .map(|(i, loc)| {
                ListItem::new(loc.label.clone())
                    .detail(loc.timezone_name())
                    .marked(i == current)
            })
            .collect::<Vec<_>>();
        let cursor = current.min(items.len().saturating_sub(1));
        Self {
            frame: 0,
            items,
            cursor,
        }
    }

    pub fn tick(&mut self) {
        self.frame += 1;
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected_index(&self) -> usize {
        self.cursor
    }

    /// Popup rectangle centred in `area`
    pub fn popup_area(&self, area: Rect) -> Rect {
        let width = area.width.min(48);
        let height = area.height.min(self.items.len() as u16 + 4);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for &LocationSelectScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.popup_area(area);
        Clear.render(popup, buf);
        Panel::new()
            .title("Location")
            .focused(true)
            .fill(theme::BG)
            .render(popup, buf);

        let inner = Rect {
            x: popup.x + 2,
            y: popup.y + 1,
            width: popup.width.saturating_sub(4),
            height: popup.height.saturating_sub(3),
        };
        SelectList::new(&self.items)
            .selected(self.cursor)
            .frame(self.frame)
            .render(inner, buf);

        let help = "[↑↓] Navigate  [ENTER] Select  [ESC] Back";
        let help = theme::truncate_str(help, popup.width.saturating_sub(2) as usize);
        if popup.height >= 3 {
            buf.set_string(
                theme::center_x(popup.x, popup.width, &help),
                popup.y + popup.height - 2,
                &help,
                theme::muted(),
            );
        }
    }
}
