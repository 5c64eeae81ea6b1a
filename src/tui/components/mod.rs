//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line
//! - `CategoryBar`: category buttons, active one highlighted
//! - `ArticleCard`: a single article (title, image reference, description, link)
//! - `Pagination`: Previous / numbered pages / Next
//! - `LoadingView`, `ErrorView`: full-area status views
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ArticleList`: scrollable card list with selection; its state lives in
//!   `TuiState` and it emits `ArticleEvent::Open`
//!
//! ## Click Handling
//!
//! Components that draw clickable cells push a [`HitRegion`] for each one
//! while rendering. The event loop rebuilds the list every frame and
//! resolves mouse clicks against it, so hit testing always matches what is
//! on screen.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── button.rs        (button row layout shared by bars)
//! ├── title_bar.rs
//! ├── category_bar.rs
//! ├── article.rs       (single card + description/image rules)
//! ├── article_list.rs
//! ├── pagination.rs
//! └── status_view.rs   (loading / error)
//! ```

use ratatui::layout::{Position, Rect};

use crate::core::action::Action;

pub mod article;
pub mod article_list;
pub mod button;
pub mod category_bar;
pub mod pagination;
pub mod status_view;
mod title_bar;

pub use article::ArticleCard;
pub use article_list::{ArticleEvent, ArticleList, ArticleListState};
pub use category_bar::CategoryBar;
pub use pagination::Pagination;
pub use status_view::{ErrorView, LoadingView};
pub use title_bar::TitleBar;

/// What a click on a region does.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// Feed this action to the reducer.
    Intent(Action),
    /// Select (or, if already selected, open) an article.
    Article(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: ClickTarget,
}

/// Finds the click target under a screen cell. Later regions win.
pub fn hit_test(regions: &[HitRegion], column: u16, row: u16) -> Option<&ClickTarget> {
    regions
        .iter()
        .rev()
        .find(|r| r.area.contains(Position::new(column, row)))
        .map(|r| &r.target)
}
