//! Feed types for newsfeed.

/// A single item read from a syndication feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    /// Unique item identifier (RSS guid, Atom id); empty when the feed omitted it.
    pub id: String,
    /// Item title; may be empty if the feed omitted it.
    pub title: String,
    /// Plain-text description (HTML stripped, truncated).
    pub description: String,
    /// First category term.
    pub category: Option<String>,
    /// Image URL from the item's media.
    pub image_url: Option<String>,
}

impl FeedItem {
    /// Create an item with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Parsed feed data from an external source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    /// Items in document order.
    pub items: Vec<FeedItem>,
}

impl ParsedFeed {
    /// A feed holding the given items.
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self { items }
    }
}
