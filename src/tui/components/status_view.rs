//! Loading and error views. Each replaces the whole content area: no
//! partial list while loading, no list or retry affordance on error.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView {
    pub spinner_frame: usize,
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let text = Paragraph::new(format!("{spinner} Loading..."))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(text, middle);
    }
}

pub struct ErrorView<'a> {
    pub reason: &'a str,
}

impl<'a> Component for ErrorView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let error_paragraph = Paragraph::new(format!("Error: {}", self.reason))
            .block(
                Block::bordered()
                    .title("ERROR")
                    .border_style(Style::default().fg(Color::Red))
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(error_paragraph, area);
    }
}
