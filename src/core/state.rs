//! # Application State
//!
//! Core business state for Newsdesk. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn HeadlineProvider>  // news provider
//! ├── country: String                      // fixed for the session
//! ├── selection: Selection                 // category + page
//! ├── result: ResultState                  // articles + fetch status
//! ├── latest_token: u64                    // token of the newest request
//! └── status_message: String               // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::news::{Article, Category, HeadlineProvider, HeadlineRequest, total_pages};

/// What the user is looking at: one page of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub category: Category,
    pub page: u32,
}

impl Selection {
    pub fn new(category: Category) -> Self {
        Self { category, page: 1 }
    }
}

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultState {
    pub articles: Vec<Article>,
    pub total_results: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Indices into `articles` whose image failed to load after rendering.
    pub failed_images: HashSet<usize>,
}

/// The single view the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState<'a> {
    Loading,
    Error(&'a str),
    Articles(&'a [Article]),
}

impl ResultState {
    /// Loading wins over error, error wins over (stale) articles.
    pub fn display(&self) -> DisplayState<'_> {
        if self.loading {
            DisplayState::Loading
        } else if let Some(reason) = &self.error {
            DisplayState::Error(reason)
        } else {
            DisplayState::Articles(&self.articles)
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }

    pub fn image_failed(&self, index: usize) -> bool {
        self.failed_images.contains(&index)
    }
}

pub struct App {
    pub provider: Arc<dyn HeadlineProvider>,
    pub country: String,
    pub selection: Selection,
    pub result: ResultState,
    /// Token of the newest issued request. Completions carrying any other
    /// token are stale and get dropped.
    pub latest_token: u64,
    pub status_message: String,
}

impl App {
    pub fn new(provider: Arc<dyn HeadlineProvider>, country: String, category: Category) -> Self {
        Self {
            provider,
            country,
            selection: Selection::new(category),
            result: ResultState {
                loading: true,
                ..Default::default()
            },
            latest_token: 0,
            status_message: String::from("Welcome to Newsdesk!"),
        }
    }

    pub fn from_config(provider: Arc<dyn HeadlineProvider>, config: &ResolvedConfig) -> Self {
        Self::new(provider, config.country.clone(), config.category)
    }

    /// The request that matches the current selection.
    pub fn current_request(&self) -> HeadlineRequest {
        HeadlineRequest::new(
            self.country.clone(),
            self.selection.category,
            self.selection.page,
        )
    }

    pub fn total_pages(&self) -> u32 {
        self.result.total_pages()
    }
}
