//! # Button Row
//!
//! Terminal "buttons": bracketed labels laid out left to right, wrapping
//! onto further rows when the area is too narrow. Both the category bar and
//! the pagination strip are button rows.
//!
//! Layout is computed separately from rendering so the parent can size the
//! area up front and register click regions for exactly the cells drawn.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Columns between adjacent buttons.
const GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Highlighted as the current choice.
    pub active: bool,
    /// Disabled buttons render dimmed and are not clickable.
    pub enabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: false,
            enabled: true,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn text(&self) -> String {
        format!("[ {} ]", self.label)
    }

    fn width(&self) -> u16 {
        self.text().width() as u16
    }

    fn style(&self) -> Style {
        if !self.enabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if self.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

/// Places each button inside `area`, returning one rect per button.
///
/// Buttons wider than the area are clipped to its width. Once the rows run
/// past the bottom of the area, every remaining button gets an empty rect.
pub fn layout_buttons(buttons: &[Button], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(buttons.len());
    let mut x = area.x;
    let mut y = area.y;
    let right = area.right();
    let bottom = area.bottom();

    for button in buttons {
        if y >= bottom {
            rects.push(Rect::new(area.x, bottom, 0, 0));
            continue;
        }
        let width = button.width().min(area.width);
        if x > area.x && x.saturating_add(width) > right {
            x = area.x;
            y = y.saturating_add(1);
            if y >= bottom {
                rects.push(Rect::new(area.x, bottom, 0, 0));
                continue;
            }
        }
        rects.push(Rect::new(x, y, width, 1));
        x = x.saturating_add(width).saturating_add(GAP);
    }
    rects
}

/// Number of rows needed to show every button at the given width,
/// saturating at `u16::MAX`.
pub fn rows_needed(buttons: &[Button], width: u16) -> u16 {
    if buttons.is_empty() || width == 0 {
        return 1;
    }
    let mut rows: u16 = 1;
    let mut x: u16 = 0;
    for button in buttons {
        let button_width = button.width().min(width);
        if x > 0 && x.saturating_add(button_width) > width {
            x = 0;
            rows = rows.saturating_add(1);
        }
        x = x.saturating_add(button_width).saturating_add(GAP);
    }
    rows
}

/// Stateless widget drawing a row of buttons.
pub struct ButtonRow<'a> {
    pub buttons: &'a [Button],
}

impl<'a> Widget for ButtonRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (button, rect) in self.buttons.iter().zip(layout_buttons(self.buttons, area)) {
            if rect.height == 0 {
                continue;
            }
            Span::styled(button.text(), button.style()).render(rect, buf);
        }
    }
}
