//! # ArticleList Component
//!
//! Scrollable column of article cards with keyboard selection.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ArticleListState` lives in `TuiState` (scroll, selection, heights)
//! - `ArticleList` is created each frame with borrowed state and props
//!
//! The list resets to the top whenever a new page arrives (tracked by the
//! request token of the page being shown).

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::news::{Article, PAGE_SIZE};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::article::{ArticleCard, image_ref};
use crate::tui::components::{ClickTarget, HitRegion};
use crate::tui::event::TuiEvent;

/// Persistent state for the article list.
pub struct ArticleListState {
    pub scroll_state: ScrollViewState,
    pub selected_index: Option<usize>,
    /// Card heights from the last render.
    pub heights: Vec<u16>,
    /// Running totals of `heights` (bottom edge of each card).
    pub prefix_heights: Vec<u16>,
    pub viewport_height: u16,
    /// Request token of the page currently laid out.
    shown_token: Option<u64>,
}

impl Default for ArticleListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by the article list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleEvent {
    Open(usize),
}

impl ArticleListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected_index: None,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            viewport_height: 0,
            shown_token: None,
        }
    }

    /// Reset selection and scroll when a different page is shown.
    pub fn sync_token(&mut self, token: u64, article_count: usize) {
        if self.shown_token != Some(token) {
            self.shown_token = Some(token);
            self.selected_index = if article_count > 0 { Some(0) } else { None };
            self.scroll_state.scroll_to_top();
        }
    }

    fn rebuild_prefix_heights(&mut self) {
        let mut total: u16 = 0;
        self.prefix_heights = self
            .heights
            .iter()
            .map(|h| {
                total = total.saturating_add(*h);
                total
            })
            .collect();
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected card is fully visible.
    /// If the card is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let item_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    pub fn select(&mut self, idx: usize) {
        self.selected_index = Some(idx);
        self.scroll_to_selected();
    }
}

impl EventHandler for ArticleListState {
    type Event = ArticleEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let count = self.heights.len();
        match event {
            TuiEvent::CursorUp => {
                if count > 0 {
                    let idx = self
                        .selected_index
                        .map(|i| i.saturating_sub(1))
                        .unwrap_or(0);
                    self.select(idx);
                }
                None
            }
            TuiEvent::CursorDown => {
                if count > 0 {
                    let idx = self
                        .selected_index
                        .map(|i| (i + 1).min(count - 1))
                        .unwrap_or(0);
                    self.select(idx);
                }
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::Open => self
                .selected_index
                .filter(|&i| i < count)
                .map(ArticleEvent::Open),
            _ => None,
        }
    }
}

/// Scrollable article view.
/// Created fresh each frame with references to state and data.
pub struct ArticleList<'a> {
    pub state: &'a mut ArticleListState,
    pub articles: &'a [Article],
    pub page: u32,
    pub token: u64,
    pub failed_images: &'a HashSet<usize>,
    pub placeholder_image: &'a str,
    pub hit_regions: &'a mut Vec<HitRegion>,
}

impl<'a> ArticleList<'a> {
    fn card(&self, index: usize, article: &'a Article) -> ArticleCard<'a> {
        let number = (self.page.saturating_sub(1)) * PAGE_SIZE + index as u32 + 1;
        let image = image_ref(article, self.failed_images.contains(&index), self.placeholder_image);
        let is_selected = self.state.selected_index == Some(index);
        ArticleCard::new(article, number, image, is_selected)
    }
}

impl<'a> Component for ArticleList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync_token(self.token, self.articles.len());

        let block = Block::bordered()
            .title(" Headlines ")
            .title_bottom(
                Line::from(" b/t/e Category  ←/→ Page  ↑/↓ Select  Enter Open  q Quit ")
                    .centered(),
            )
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.articles.is_empty() {
            self.state.heights.clear();
            self.state.prefix_heights.clear();
            let empty = Paragraph::new("No articles on this page.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, inner);
            return;
        }

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar safe area

        let articles = self.articles;
        let cards: Vec<ArticleCard<'a>> = articles
            .iter()
            .enumerate()
            .map(|(i, article)| self.card(i, article))
            .collect();
        self.state.heights = cards
            .iter()
            .map(|c| c.calculate_height(content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        self.state.viewport_height = inner.height;
        self.state.clamp_scroll();

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_offset = self.state.scroll_state.offset().y;
        let mut y_offset: u16 = 0;
        for (i, card) in cards.into_iter().enumerate() {
            let height = self.state.heights[i];
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));

            // Register the visible slice of the card for mouse clicks.
            let top = y_offset.max(scroll_offset);
            let bottom = y_offset.saturating_add(height).min(scroll_offset + inner.height);
            if bottom > top {
                self.hit_regions.push(HitRegion {
                    area: Rect::new(
                        inner.x,
                        inner.y + (top - scroll_offset),
                        content_width,
                        bottom - top,
                    ),
                    target: ClickTarget::Article(i),
                });
            }
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
