//! Request DTOs for the HTTP API.

use serde::Deserialize;
use validator::Validate;

use crate::article::GetArticlesRequest;

use super::validation::no_control_chars;

/// Longest accepted filter value, in characters.
pub const MAX_FILTER_LENGTH: u64 = 256;

/// Query parameters for `GET /loadArticles`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoadArticlesQuery {
    /// Id of the last article already seen.
    #[serde(default)]
    #[validate(range(min = 0, message = "cursor must not be negative"))]
    pub cursor: i64,

    #[validate(
        length(max = MAX_FILTER_LENGTH, message = "category must be at most 256 characters"),
        custom(function = "no_control_chars")
    )]
    pub category: Option<String>,

    /// Accepted for compatibility; does not filter.
    #[validate(length(
        max = MAX_FILTER_LENGTH,
        message = "provider must be at most 256 characters"
    ))]
    pub provider: Option<String>,

    #[validate(
        length(max = MAX_FILTER_LENGTH, message = "title must be at most 256 characters"),
        custom(function = "no_control_chars")
    )]
    pub title: Option<String>,
}

impl From<LoadArticlesQuery> for GetArticlesRequest {
    fn from(query: LoadArticlesQuery) -> Self {
        GetArticlesRequest {
            cursor: query.cursor,
            category: query.category,
            provider: query.provider,
            title: query.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_validation() {
        let query = LoadArticlesQuery {
            cursor: 3,
            title: Some("rust".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        let query = LoadArticlesQuery {
            cursor: -1,
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = LoadArticlesQuery {
            title: Some("x".repeat(MAX_FILTER_LENGTH as usize + 1)),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let at_limit = "x".repeat(MAX_FILTER_LENGTH as usize);
        let query = LoadArticlesQuery {
            category: Some(at_limit.clone()),
            provider: Some(at_limit.clone()),
            title: Some(at_limit),
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        let query = LoadArticlesQuery {
            provider: Some("x".repeat(MAX_FILTER_LENGTH as usize + 1)),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = LoadArticlesQuery {
            category: Some("world\u{0}".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_query_into_request() {
        let request: GetArticlesRequest = LoadArticlesQuery {
            cursor: 9,
            category: Some("sport".to_string()),
            provider: Some("bbc".to_string()),
            title: None,
        }
        .into();

        assert_eq!(request.cursor, 9);
        assert_eq!(request.category.as_deref(), Some("sport"));
        assert_eq!(request.provider.as_deref(), Some("bbc"));
        assert_eq!(request.title, None);
    }
}
