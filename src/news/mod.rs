pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{HeadlineProvider, ProviderError};
pub use providers::NewsApiProvider;
pub use types::{
    Article, ArticleSource, Category, HeadlinePage, HeadlineRequest, PAGE_SIZE, total_pages,
};
