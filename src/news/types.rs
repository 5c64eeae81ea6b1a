use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Articles per page. Fixed; the provider is always asked for this many.
pub const PAGE_SIZE: u32 = 10;

/// News-topic tag used to filter provider results.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Business,
    Technology,
    Entertainment,
}

impl Category {
    /// Every category, in the order the category bar shows them.
    pub const ALL: [Category; 3] = [
        Category::Business,
        Category::Technology,
        Category::Entertainment,
    ];

    /// Query-string value sent to the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
        }
    }

    /// Capitalized label for buttons ("Business").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Entertainment => "Entertainment",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected business, technology or entertainment)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Publisher attached to an article. NewsAPI sends `{ "id": .., "name": .. }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single news item as returned by the provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Publisher name, when the provider sent one.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Image URL, treating an empty string the same as absent.
    pub fn image_url(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|u| !u.trim().is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of headlines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadlinePage {
    pub articles: Vec<Article>,
    pub total_results: u32,
}

/// Parameters of a single headline request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRequest {
    pub country: String,
    pub category: Category,
    pub page: u32,
    pub page_size: u32,
}

impl HeadlineRequest {
    pub fn new(country: impl Into<String>, category: Category, page: u32) -> Self {
        Self {
            country: country.into(),
            category,
            page,
            page_size: PAGE_SIZE,
        }
    }
}

/// `ceil(total_results / PAGE_SIZE)`.
pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}
