use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::news::Article;

/// Descriptions longer than this many characters are cut and get "...".
pub const DESCRIPTION_LIMIT: usize = 100;
pub const NO_DESCRIPTION: &str = "No description available";

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Shortens a description to its first 100 characters plus "...".
/// Absent or empty descriptions become the placeholder text.
pub fn format_description(description: Option<&str>) -> Cow<'_, str> {
    match description {
        None | Some("") => Cow::Borrowed(NO_DESCRIPTION),
        Some(text) => match text.char_indices().nth(DESCRIPTION_LIMIT) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
            None => Cow::Borrowed(text),
        },
    }
}

/// Which image reference a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Provided(&'a str),
    Placeholder(&'a str),
}

/// The article's own image, unless it is missing or has failed to load.
pub fn image_ref<'a>(article: &'a Article, failed: bool, placeholder: &'a str) -> ImageRef<'a> {
    match article.image_url() {
        Some(url) if !failed => ImageRef::Provided(url),
        _ => ImageRef::Placeholder(placeholder),
    }
}

/// A stateless component that renders a single article card.
///
/// Created fresh each frame by `ArticleList` with the data it needs.
#[derive(Clone, Copy)]
pub struct ArticleCard<'a> {
    pub article: &'a Article,
    /// 1-based position across all pages, shown in the border.
    pub number: u32,
    pub image: ImageRef<'a>,
    pub is_selected: bool,
}

impl<'a> ArticleCard<'a> {
    pub fn new(article: &'a Article, number: u32, image: ImageRef<'a>, is_selected: bool) -> Self {
        Self {
            article,
            number,
            image,
            is_selected,
        }
    }

    fn meta_text(&self) -> Option<String> {
        let published = self
            .article
            .published_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string());
        match (self.article.source_name(), published) {
            (Some(source), Some(date)) => Some(format!("{source} · {date}")),
            (Some(source), None) => Some(source.to_string()),
            (None, Some(date)) => Some(date),
            (None, None) => None,
        }
    }

    fn image_text(&self) -> String {
        match self.image {
            ImageRef::Provided(url) => format!("Image: {url}"),
            ImageRef::Placeholder(placeholder) => format!("Image: {placeholder} (placeholder)"),
        }
    }

    fn title_text(&self) -> &str {
        let title = self.article.title.trim();
        if title.is_empty() { "(untitled)" } else { title }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled(
            self.title_text().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(meta) = self.meta_text() {
            lines.push(Line::from(Span::styled(
                meta,
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(Span::styled(
            self.image_text(),
            Style::default().fg(Color::Magenta),
        )));
        lines.push(Line::from(
            format_description(self.article.description.as_deref()).into_owned(),
        ));
        lines.push(Line::from(Span::styled(
            format!("Read more: {}", self.article.url),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )));
        lines
    }

    /// Calculate the height required for this card given a width.
    ///
    /// Uses `textwrap` with options matching ratatui's `Paragraph` wrapping so
    /// the list can size its scroll canvas without rendering.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let content_lines: usize = self
            .lines()
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                textwrap::wrap(&text, &options).len().max(1)
            })
            .sum();
        content_lines as u16 + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for ArticleCard<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(format!(" #{} ", self.number))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_article;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    // ==========================================================================
    // format_description tests
    // ==========================================================================

    #[test]
    fn test_long_description_is_truncated() {
        let long = "x".repeat(150);
        let formatted = format_description(Some(&long));
        assert_eq!(formatted, format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_exactly_limit_is_unmodified() {
        let exact = "y".repeat(100);
        assert_eq!(format_description(Some(&exact)), exact.as_str());
        assert_eq!(format_description(Some("short")), "short");
    }

    #[test]
    fn test_absent_description_uses_placeholder() {
        assert_eq!(format_description(None), "No description available");
        assert_eq!(format_description(Some("")), "No description available");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let accented = "é".repeat(120);
        let formatted = format_description(Some(&accented));
        assert_eq!(formatted.chars().count(), 103);
        assert!(formatted.ends_with("..."));
    }

    // ==========================================================================
    // image_ref tests
    // ==========================================================================

    #[test]
    fn test_image_ref_falls_back_when_missing_or_failed() {
        let mut article = sample_article(1);
        assert_eq!(
            image_ref(&article, false, "ph.webp"),
            ImageRef::Provided("https://img.example/1.jpg")
        );
        assert_eq!(
            image_ref(&article, true, "ph.webp"),
            ImageRef::Placeholder("ph.webp")
        );
        article.url_to_image = None;
        assert_eq!(
            image_ref(&article, false, "ph.webp"),
            ImageRef::Placeholder("ph.webp")
        );
    }

    // ==========================================================================
    // rendering tests
    // ==========================================================================

    #[test]
    fn test_height_counts_every_line_plus_borders() {
        let article = sample_article(2);
        let card = ArticleCard::new(&article, 3, ImageRef::Placeholder("p"), false);
        // title, meta, image, description, link
        assert_eq!(card.calculate_height(200), 5 + 2);
    }

    #[test]
    fn test_card_renders_all_parts() {
        let mut article = sample_article(4);
        article.description = None;
        let card = ArticleCard::new(&article, 14, ImageRef::Placeholder("ph.webp"), true);
        let height = card.calculate_height(80);

        let backend = TestBackend::new(80, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(card, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("#14"));
        assert!(text.contains("Headline 4"));
        assert!(text.contains("Wire"));
        assert!(text.contains("ph.webp (placeholder)"));
        assert!(text.contains("No description available"));
        assert!(text.contains("https://news.example/4"));
    }
}
