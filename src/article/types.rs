//! Article types for newsfeed.

use chrono::{DateTime, SecondsFormat, Utc};

/// A stored article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Surrogate key, ascending in insertion order.
    pub id: i64,
    /// Article title (never empty).
    pub title: String,
    /// Article description (may be empty).
    pub description: String,
    /// Source item identifier; unique across all articles.
    pub link: String,
    /// Category.
    pub category: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    /// Article title.
    pub title: String,
    /// Article description.
    pub description: String,
    /// Source item identifier.
    pub link: String,
    /// Category.
    pub category: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

impl NewArticle {
    /// Create a new article with an empty description and no category.
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            link: link.into(),
            category: None,
            thumbnail: thumbnail.into(),
            created_at,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Text column an article filter can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Description,
    Link,
    Category,
}

impl Column {
    /// SQL column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Description => "description",
            Column::Link => "link",
            Column::Category => "category",
        }
    }
}

/// A single compiled filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column contains the value (ASCII case-insensitive).
    Contains(Column, String),
    /// `created_at >= bound`.
    CreatedAtOrAfter(DateTime<Utc>),
    /// `created_at < bound`.
    CreatedBefore(DateTime<Utc>),
}

/// Optional predicates restricting an article page.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
}

impl Filters {
    /// Filters that match every article.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn created_after(mut self, bound: DateTime<Utc>) -> Self {
        self.created_after = Some(bound);
        self
    }

    pub fn created_before(mut self, bound: DateTime<Utc>) -> Self {
        self.created_before = Some(bound);
        self
    }

    /// Compile the present filters into predicates, each against its own column.
    pub fn predicates(&self) -> Vec<Predicate> {
        let text = [
            (Column::Title, &self.title),
            (Column::Description, &self.description),
            (Column::Link, &self.link),
            (Column::Category, &self.category),
        ];

        let mut predicates: Vec<Predicate> = text
            .into_iter()
            .filter_map(|(column, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| Predicate::Contains(column, v.to_string()))
            })
            .collect();

        if let Some(bound) = self.created_after {
            predicates.push(Predicate::CreatedAtOrAfter(bound));
        }
        if let Some(bound) = self.created_before {
            predicates.push(Predicate::CreatedBefore(bound));
        }

        predicates
    }

    /// Evaluate the filters against an article in memory.
    ///
    /// Mirrors the SQL semantics: substring matches are ASCII case-insensitive
    /// and a missing category never matches a category filter.
    pub fn matches(&self, article: &Article) -> bool {
        self.predicates().iter().all(|predicate| match predicate {
            Predicate::Contains(column, needle) => {
                let haystack = match column {
                    Column::Title => Some(article.title.as_str()),
                    Column::Description => Some(article.description.as_str()),
                    Column::Link => Some(article.link.as_str()),
                    Column::Category => article.category.as_deref(),
                };
                haystack.is_some_and(|h| {
                    h.to_ascii_lowercase()
                        .contains(&needle.to_ascii_lowercase())
                })
            }
            Predicate::CreatedAtOrAfter(bound) => article.created_at >= *bound,
            Predicate::CreatedBefore(bound) => article.created_at < *bound,
        })
    }
}

/// Request for a page of articles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetArticlesRequest {
    /// Highest id seen so far; 0 for the first page.
    pub cursor: i64,
    pub category: Option<String>,
    /// Accepted but not used for filtering.
    pub provider: Option<String>,
    pub title: Option<String>,
}

/// API-facing view of an article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSummary {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub image_ref: String,
    pub link: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            summary: article.description,
            image_ref: article.thumbnail,
            link: article.link,
        }
    }
}

/// One page of articles plus the cursor for the next request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub next_cursor: i64,
    pub articles: Vec<ArticleSummary>,
}

/// Format a timestamp for storage.
///
/// Fixed width (microseconds, `Z` suffix), so text order equals time order.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
