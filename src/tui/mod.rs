//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core::Action values, and
//! carries out the `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on input, resize, or a
//!   background completion.
//!
//! ## Background Work
//!
//! Fetches and image probes run as tokio tasks. Each one sends exactly one
//! `Action` back over an mpsc channel; the loop reduces them in arrival
//! order. Stale completions are filtered by the reducer's request token.

mod browser;
mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, DisplayState};
use crate::news::{HeadlineProvider, HeadlineRequest, NewsApiProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{ArticleEvent, ArticleListState, ClickTarget, HitRegion, hit_test};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub article_list: ArticleListState,
    /// Image reference shown when an article's own image is missing or broken.
    pub placeholder_image: String,
    pub max_page_buttons: Option<u32>,
    /// Clickable cells from the last frame.
    pub hit_regions: Vec<HitRegion>,
}

impl TuiState {
    pub fn new(placeholder_image: String, max_page_buttons: Option<u32>) -> Self {
        Self {
            article_list: ArticleListState::new(),
            placeholder_image,
            max_page_buttons,
            hit_regions: Vec::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.placeholder_image.clone(), config.max_page_buttons)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the headline provider from a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn HeadlineProvider> {
    if config.newsapi_api_key.is_none() {
        warn!("No NewsAPI key configured; fetches will fail until one is set");
    }
    Arc::new(NewsApiProvider::new(
        config.newsapi_api_key.clone(),
        Some(config.newsapi_base_url.clone()),
    ))
}

/// Maps an input event to the intent it expresses, if any.
fn intent_for(event: &TuiEvent, app: &App) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Category(category) => Some(Action::SetCategory(*category)),
        TuiEvent::NextCategory => Some(Action::SetCategory(app.selection.category.next())),
        TuiEvent::PreviousCategory => {
            Some(Action::SetCategory(app.selection.category.previous()))
        }
        TuiEvent::NextPage => Some(Action::NextPage),
        TuiEvent::PreviousPage => Some(Action::PreviousPage),
        TuiEvent::FirstPage => Some(Action::FirstPage),
        TuiEvent::LastPage => Some(Action::LastPage),
        TuiEvent::JumpToPage(n) => Some(Action::SetPage(*n)),
        _ => None,
    }
}

/// Reduces an action and performs the resulting effect.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::Quit => return true,
        Effect::Fetch { token, request } => {
            spawn_fetch(app.provider.clone(), token, request, tx.clone());
        }
        Effect::ProbeImages { token, images } => {
            spawn_image_probes(app.provider.clone(), token, images, tx.clone());
        }
        Effect::None => {}
    }
    false
}

fn open_article(app: &App, index: usize) {
    let Some(article) = app.result.articles.get(index) else {
        return;
    };
    if article.url.is_empty() {
        warn!("Article {} has no URL to open", index);
        return;
    }
    info!("Opening article {}: {}", index, article.url);
    if let Err(e) = browser::open(&article.url) {
        warn!("Failed to open {}: {}", article.url, e);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::from_config(&config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, Action::Mount, &tx);

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.result.loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if let TuiEvent::MouseClick(column, row) = event {
                match hit_test(&tui.hit_regions, column, row).cloned() {
                    Some(ClickTarget::Intent(action)) => {
                        if dispatch(&mut app, action, &tx) {
                            break 'main;
                        }
                    }
                    Some(ClickTarget::Article(index)) => {
                        if tui.article_list.selected_index == Some(index) {
                            open_article(&app, index);
                        } else {
                            tui.article_list.select(index);
                        }
                    }
                    None => {}
                }
                continue;
            }

            if let Some(action) = intent_for(&event, &app) {
                if dispatch(&mut app, action, &tx) {
                    break 'main;
                }
                continue;
            }

            // Everything else belongs to the article list, which only
            // exists while articles are on screen.
            if matches!(app.result.display(), DisplayState::Articles(_))
                && let Some(ArticleEvent::Open(index)) = tui.article_list.handle_event(&event)
            {
                open_article(&app, index);
            }
        }

        // Handle background task actions (fetch results, image probes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action_label(&action));
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Short description of an action for logs (pages can be large).
fn action_label(action: &Action) -> String {
    match action {
        Action::FetchSucceeded { token, page } => format!(
            "FetchSucceeded(token={}, articles={})",
            token,
            page.articles.len()
        ),
        other => format!("{other:?}"),
    }
}

/// Runs one headline request and turns its outcome into an action.
pub async fn fetch_page(
    provider: Arc<dyn HeadlineProvider>,
    token: u64,
    request: HeadlineRequest,
) -> Action {
    match provider.top_headlines(&request).await {
        Ok(page) => Action::FetchSucceeded { token, page },
        Err(e) => {
            info!("Fetch {} via {} failed: {}", token, provider.name(), e);
            Action::FetchFailed {
                token,
                reason: e.to_string(),
            }
        }
    }
}

fn spawn_fetch(
    provider: Arc<dyn HeadlineProvider>,
    token: u64,
    request: HeadlineRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning fetch {}", token);
    tokio::spawn(async move {
        let action = fetch_page(provider, token, request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch {} result: receiver dropped", token);
        }
    });
}

fn spawn_image_probes(
    provider: Arc<dyn HeadlineProvider>,
    token: u64,
    images: Vec<(usize, String)>,
    tx: mpsc::Sender<Action>,
) {
    debug!("Probing {} images for fetch {}", images.len(), token);
    for (index, url) in images {
        let provider = provider.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = provider.probe_image(&url).await {
                debug!("Image probe failed for article {}: {}", index, e);
                if tx.send(Action::ImageFailed { token, index }).is_err() {
                    warn!("Failed to deliver image failure: receiver dropped");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{Category, NewsApiProvider};
    use crate::test_support::test_app;
    use crate::tui::components::pagination::{PageButtonKind, page_buttons};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn articles_json(count: usize) -> Vec<serde_json::Value> {
        (0..count)
            .map(|i| {
                serde_json::json!({
                    "source": {"id": null, "name": "Wire"},
                    "title": format!("Story {i}"),
                    "description": "A short summary.",
                    "url": format!("https://news.example/{i}"),
                    "urlToImage": null,
                    "publishedAt": "2024-05-01T08:00:00Z"
                })
            })
            .collect()
    }

    fn app_against(server: &MockServer) -> App {
        let provider: Arc<dyn HeadlineProvider> = Arc::new(NewsApiProvider::new(
            Some("test-key".to_string()),
            Some(server.uri()),
        ));
        App::new(provider, "us".to_string(), Category::Business)
    }

    /// Mounts the app and runs the resulting fetch to completion.
    async fn mount(app: &mut App) {
        let Effect::Fetch { token, request } = update(app, Action::Mount) else {
            panic!("mount must fetch");
        };
        let action = fetch_page(app.provider.clone(), token, request).await;
        update(app, action);
    }

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_mount_with_defaults_renders_three_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("country", "us"))
            .and(query_param("category", "business"))
            .and(query_param("page", "1"))
            .and(query_param("pageSize", "10"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 25,
                "articles": articles_json(10)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_against(&server);
        mount(&mut app).await;

        assert!(!app.result.loading);
        assert_eq!(app.total_pages(), 3);
        let buttons = page_buttons(app.selection.page, app.total_pages(), None);
        let numbered = buttons
            .iter()
            .filter(|b| matches!(b.kind, PageButtonKind::Number(_)))
            .count();
        assert_eq!(numbered, 3);
        assert!(!buttons.first().unwrap().enabled, "Previous disabled");
        assert!(buttons.last().unwrap().enabled, "Next enabled");

        let mut tui = TuiState::new("ph.webp".to_string(), None);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Story 0"));
        assert!(text.contains("[ 3 ]"));
        assert!(!text.contains("[ 4 ]"));
    }

    #[tokio::test]
    async fn test_mount_http_error_shows_error_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid or incorrect."
            })))
            .mount(&server)
            .await;

        let mut app = app_against(&server);
        mount(&mut app).await;

        assert!(app.result.error.is_some());
        let mut tui = TuiState::new("ph.webp".to_string(), None);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Your API key is invalid or incorrect."));
        assert!(text.contains("HTTP 401"));
        assert!(!text.contains("Headlines"));
        assert!(!text.contains("[ Next ]"));
    }

    #[tokio::test]
    async fn test_page_change_requests_selected_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("category", "technology"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 42,
                "articles": articles_json(10)
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("category", "technology"))
            .and(query_param("page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 42,
                "articles": articles_json(2)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_against(&server);
        app.selection.category = Category::Technology;
        mount(&mut app).await;

        let Effect::Fetch { token, request } = update(&mut app, Action::SetPage(5)) else {
            panic!("page 5 of 5 is in range");
        };
        let action = fetch_page(app.provider.clone(), token, request).await;
        update(&mut app, action);

        assert_eq!(app.selection.page, 5);
        assert_eq!(app.result.articles.len(), 2);
    }

    #[test]
    fn test_intent_for_maps_navigation_keys() {
        let app = test_app();
        assert_eq!(intent_for(&TuiEvent::Quit, &app), Some(Action::Quit));
        assert_eq!(
            intent_for(&TuiEvent::NextCategory, &app),
            Some(Action::SetCategory(Category::Technology))
        );
        assert_eq!(
            intent_for(&TuiEvent::PreviousCategory, &app),
            Some(Action::SetCategory(Category::Entertainment))
        );
        assert_eq!(intent_for(&TuiEvent::JumpToPage(4), &app), Some(Action::SetPage(4)));
        assert_eq!(intent_for(&TuiEvent::CursorDown, &app), None);
        assert_eq!(intent_for(&TuiEvent::Open, &app), None);
    }

    #[tokio::test]
    async fn test_dispatch_out_of_range_page_spawns_nothing() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();
        assert!(!dispatch(&mut app, Action::SetPage(3), &tx));
        assert_eq!(app.latest_token, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dispatch_mount_delivers_completion() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();
        assert!(!dispatch(&mut app, Action::Mount, &tx));

        let action = tokio::task::spawn_blocking(move || {
            rx.recv_timeout(std::time::Duration::from_secs(5))
        })
        .await
        .unwrap()
        .unwrap();
        assert!(matches!(action, Action::FetchSucceeded { token: 1, .. }));
    }
}
