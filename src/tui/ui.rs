use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, DisplayState};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ArticleList, CategoryBar, ErrorView, LoadingView, Pagination, TitleBar,
};

/// Borders plus one row of buttons.
const MIN_PAGINATION_HEIGHT: u16 = 3;

/// Draws one frame from core state and rebuilds the click map.
///
/// ```text
/// ┌ title bar (1 row) ─────────────────────────────┐
/// │ loading view | error view | ┌ category bar ┐   │
/// │                             │ article list │   │
/// │                             └ pagination ──┘   │
/// └────────────────────────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    tui.hit_regions.clear();

    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
    TitleBar::new(app.status_message.clone()).render(frame, title_area);

    match app.result.display() {
        DisplayState::Loading => {
            LoadingView { spinner_frame }.render(frame, main_area);
        }
        DisplayState::Error(reason) => {
            ErrorView { reason }.render(frame, main_area);
        }
        DisplayState::Articles(articles) => {
            let selection = app.selection;
            let total_pages = app.total_pages();
            let category_height = CategoryBar::calculate_height(main_area.width);
            // A long strip may take at most a third of the screen; rows past
            // that are clipped so the article list keeps its space.
            let pagination_height = Pagination::calculate_height(
                selection.page,
                total_pages,
                tui.max_page_buttons,
                main_area.width,
            )
            .min((main_area.height / 3).max(MIN_PAGINATION_HEIGHT));
            let [category_area, list_area, pagination_area] = Layout::vertical([
                Length(category_height),
                Min(0),
                Length(pagination_height),
            ])
            .areas(main_area);

            CategoryBar::new(selection.category, &mut tui.hit_regions)
                .render(frame, category_area);

            ArticleList {
                state: &mut tui.article_list,
                articles,
                page: selection.page,
                token: app.latest_token,
                failed_images: &app.result.failed_images,
                placeholder_image: &tui.placeholder_image,
                hit_regions: &mut tui.hit_regions,
            }
            .render(frame, list_area);

            Pagination::new(
                selection.page,
                total_pages,
                tui.max_page_buttons,
                &mut tui.hit_regions,
            )
            .render(frame, pagination_area);
        }
    }
}
