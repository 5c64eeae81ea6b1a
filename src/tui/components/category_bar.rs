//! # CategoryBar Component
//!
//! One button per category, the active one highlighted. Clicking a button
//! emits `SetCategory`, even for the category already shown.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::core::action::Action;
use crate::news::Category;
use crate::tui::component::Component;
use crate::tui::components::button::{Button, ButtonRow, layout_buttons, rows_needed};
use crate::tui::components::{ClickTarget, HitRegion};

/// Rows taken by the block borders.
const VERTICAL_OVERHEAD: u16 = 2;

pub struct CategoryBar<'a> {
    pub current: Category,
    /// Click regions are appended here during render.
    pub hit_regions: &'a mut Vec<HitRegion>,
}

impl<'a> CategoryBar<'a> {
    pub fn new(current: Category, hit_regions: &'a mut Vec<HitRegion>) -> Self {
        Self {
            current,
            hit_regions,
        }
    }

    pub fn buttons(current: Category) -> Vec<Button> {
        Category::ALL
            .iter()
            .map(|c| Button::new(c.label()).active(*c == current))
            .collect()
    }

    pub fn calculate_height(width: u16) -> u16 {
        let buttons = Self::buttons(Category::default());
        rows_needed(&buttons, width.saturating_sub(2)) + VERTICAL_OVERHEAD
    }
}

impl<'a> Component for CategoryBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Category ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let buttons = Self::buttons(self.current);
        for (category, rect) in Category::ALL.iter().zip(layout_buttons(&buttons, inner)) {
            if rect.height > 0 {
                self.hit_regions.push(HitRegion {
                    area: rect,
                    target: ClickTarget::Intent(Action::SetCategory(*category)),
                });
            }
        }
        frame.render_widget(ButtonRow { buttons: &buttons }, inner);
    }
}
