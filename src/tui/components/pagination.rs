//! # Pagination Component
//!
//! `Previous`, one numbered button per page, `Next`.
//!
//! By default every page from 1 to `total_pages` gets a button. When a cap
//! is configured (`max_page_buttons`), only a window of that many pages is
//! shown, centred on the current page where possible.
//!
//! Previous is disabled on the first page, Next on the last. Disabled
//! buttons register no click region.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::core::action::Action;
use crate::tui::component::Component;
use crate::tui::components::button::{Button, ButtonRow, layout_buttons, rows_needed};
use crate::tui::components::{ClickTarget, HitRegion};

const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButtonKind {
    Previous,
    Number(u32),
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub kind: PageButtonKind,
    pub enabled: bool,
    pub active: bool,
}

impl PageButton {
    pub fn label(&self) -> String {
        match self.kind {
            PageButtonKind::Previous => "Previous".to_string(),
            PageButtonKind::Number(n) => n.to_string(),
            PageButtonKind::Next => "Next".to_string(),
        }
    }

    pub fn action(&self) -> Action {
        match self.kind {
            PageButtonKind::Previous => Action::PreviousPage,
            PageButtonKind::Number(n) => Action::SetPage(n),
            PageButtonKind::Next => Action::NextPage,
        }
    }
}

/// Range of page numbers to show. `None` for `max_buttons` shows them all.
pub fn visible_pages(current: u32, total_pages: u32, max_buttons: Option<u32>) -> std::ops::RangeInclusive<u32> {
    match max_buttons {
        Some(max) if max > 0 && total_pages > max => {
            let half = max / 2;
            let start = current
                .saturating_sub(half)
                .max(1)
                .min(total_pages - max + 1);
            start..=start + max - 1
        }
        _ => 1..=total_pages,
    }
}

/// Builds the full strip: Previous, the visible page numbers, Next.
pub fn page_buttons(current: u32, total_pages: u32, max_buttons: Option<u32>) -> Vec<PageButton> {
    let mut buttons = Vec::new();
    buttons.push(PageButton {
        kind: PageButtonKind::Previous,
        enabled: current > 1,
        active: false,
    });
    for n in visible_pages(current, total_pages, max_buttons) {
        buttons.push(PageButton {
            kind: PageButtonKind::Number(n),
            enabled: true,
            active: n == current,
        });
    }
    buttons.push(PageButton {
        kind: PageButtonKind::Next,
        enabled: current < total_pages,
        active: false,
    });
    buttons
}

fn as_buttons(page_buttons: &[PageButton]) -> Vec<Button> {
    page_buttons
        .iter()
        .map(|b| Button::new(b.label()).active(b.active).enabled(b.enabled))
        .collect()
}

pub struct Pagination<'a> {
    pub current: u32,
    pub total_pages: u32,
    pub max_buttons: Option<u32>,
    pub hit_regions: &'a mut Vec<HitRegion>,
}

impl<'a> Pagination<'a> {
    pub fn new(
        current: u32,
        total_pages: u32,
        max_buttons: Option<u32>,
        hit_regions: &'a mut Vec<HitRegion>,
    ) -> Self {
        Self {
            current,
            total_pages,
            max_buttons,
            hit_regions,
        }
    }

    pub fn calculate_height(current: u32, total_pages: u32, max_buttons: Option<u32>, width: u16) -> u16 {
        let buttons = as_buttons(&page_buttons(current, total_pages, max_buttons));
        rows_needed(&buttons, width.saturating_sub(2)) + VERTICAL_OVERHEAD
    }
}

impl<'a> Component for Pagination<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Pages ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let strip = page_buttons(self.current, self.total_pages, self.max_buttons);
        let buttons = as_buttons(&strip);
        for (button, rect) in strip.iter().zip(layout_buttons(&buttons, inner)) {
            if button.enabled && rect.height > 0 {
                self.hit_regions.push(HitRegion {
                    area: rect,
                    target: ClickTarget::Intent(button.action()),
                });
            }
        }
        frame.render_widget(ButtonRow { buttons: &buttons }, inner);
    }
}
