//! Fixtures for unit tests: an offline provider and sample headlines.

use std::sync::Arc;
use async_trait::async_trait;

use crate::news::{
    Article, ArticleSource, Category, HeadlinePage, HeadlineProvider, HeadlineRequest,
    ProviderError,
};

/// Answers every request with an empty page and accepts every image.
pub struct NoopProvider;

#[async_trait]
impl HeadlineProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn top_headlines(
        &self,
        _request: &HeadlineRequest,
    ) -> Result<HeadlinePage, ProviderError> {
        Ok(HeadlinePage::default())
    }

    async fn probe_image(&self, _url: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// An `App` on business/us backed by [`NoopProvider`].
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopProvider), "us".to_string(), Category::Business)
}

/// Builds a distinguishable article for list tests.
pub fn sample_article(n: usize) -> Article {
    Article {
        source: Some(ArticleSource {
            id: None,
            name: Some("Wire".to_string()),
        }),
        title: format!("Headline {n}"),
        description: Some(format!("Description {n}")),
        url: format!("https://news.example/{n}"),
        url_to_image: Some(format!("https://img.example/{n}.jpg")),
        published_at: None,
    }
}

pub fn sample_page(count: usize, total_results: u32) -> HeadlinePage {
    HeadlinePage {
        articles: (0..count).map(sample_article).collect(),
        total_results,
    }
}
