//! # Actions
//!
//! Everything that can happen in Newsdesk becomes an `Action`.
//! User presses `t`? That's `Action::SetCategory(Category::Technology)`.
//! Provider responds? That's `Action::FetchSucceeded { token, page }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates it, and returns an `Effect` describing the I/O the adapter
//! should perform next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch is stamped with a fresh request token. Completions carrying
//! an older token are dropped, so the result always belongs to the most
//! recently *requested* selection, whatever order the network answers in.

use log::{debug, info, warn};

use crate::core::state::App;
use crate::news::{Category, HeadlinePage, HeadlineRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial fetch for the startup selection.
    Mount,
    SetCategory(Category),
    SetPage(u32),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    FetchSucceeded { token: u64, page: HeadlinePage },
    FetchFailed { token: u64, reason: String },
    /// An article image could not be loaded after it was rendered.
    ImageFailed { token: u64, index: usize },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue exactly this request, tagged with `token`.
    Fetch { token: u64, request: HeadlineRequest },
    /// Try loading each `(article index, image url)` of the page fetched under `token`.
    ProbeImages { token: u64, images: Vec<(usize, String)> },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => begin_fetch(app),
        Action::SetCategory(category) => {
            app.selection.category = category;
            app.selection.page = 1;
            // The old total describes another category; no page beyond 1
            // is valid until this category's total arrives.
            app.result.total_results = 0;
            begin_fetch(app)
        }
        Action::SetPage(page) => set_page(app, page),
        Action::NextPage => set_page(app, app.selection.page.saturating_add(1)),
        Action::PreviousPage => set_page(app, app.selection.page.saturating_sub(1)),
        Action::FirstPage => set_page(app, 1),
        Action::LastPage => set_page(app, app.total_pages()),
        Action::FetchSucceeded { token, page } => {
            if token != app.latest_token {
                debug!(
                    "Discarding stale response (token={}, latest={})",
                    token, app.latest_token
                );
                return Effect::None;
            }
            info!(
                "Fetch {} succeeded: {} articles, totalResults={}",
                token,
                page.articles.len(),
                page.total_results
            );
            let result = &mut app.result;
            result.articles = page.articles;
            result.total_results = page.total_results;
            result.loading = false;
            result.error = None;
            result.failed_images.clear();

            let total_pages = app.total_pages();
            if app.selection.page > total_pages.max(1) {
                if total_pages == 0 {
                    app.selection.page = 1;
                } else {
                    info!(
                        "Page {} is past the last page ({}), refetching the last page",
                        app.selection.page, total_pages
                    );
                    app.selection.page = total_pages;
                    return begin_fetch(app);
                }
            }
            app.status_message = format!(
                "{} · page {} of {}",
                app.selection.category.label(),
                app.selection.page,
                app.total_pages().max(1)
            );

            let images: Vec<(usize, String)> = app
                .result
                .articles
                .iter()
                .enumerate()
                .filter_map(|(i, a)| a.image_url().map(|url| (i, url.to_string())))
                .collect();
            if images.is_empty() {
                Effect::None
            } else {
                Effect::ProbeImages { token, images }
            }
        }
        Action::FetchFailed { token, reason } => {
            if token != app.latest_token {
                debug!(
                    "Discarding stale failure (token={}, latest={}): {}",
                    token, app.latest_token, reason
                );
                return Effect::None;
            }
            warn!("Fetch {} failed: {}", token, reason);
            // Prior articles stay in place but the error view hides them.
            app.result.loading = false;
            app.result.error = Some(reason);
            app.status_message = String::from("Fetch failed");
            Effect::None
        }
        Action::ImageFailed { token, index } => {
            if token == app.latest_token && index < app.result.articles.len() {
                debug!("Image for article {} failed, using placeholder", index);
                app.result.failed_images.insert(index);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Accepts `page` only when it lies in `1..=total_pages`; anything else is
/// a silent no-op.
fn set_page(app: &mut App, page: u32) -> Effect {
    let total_pages = app.total_pages();
    if page < 1 || page > total_pages {
        debug!("Ignoring page {} (valid range 1..={})", page, total_pages);
        return Effect::None;
    }
    app.selection.page = page;
    begin_fetch(app)
}

fn begin_fetch(app: &mut App) -> Effect {
    app.latest_token += 1;
    app.result.loading = true;
    app.result.error = None;
    app.status_message = format!(
        "Loading {} page {}...",
        app.selection.category.label(),
        app.selection.page
    );
    let request = app.current_request();
    info!(
        "Issuing fetch {}: category={}, page={}",
        app.latest_token, request.category, request.page
    );
    Effect::Fetch {
        token: app.latest_token,
        request,
    }
}
