//! SQLite article repository.

use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::store::{ArticleStore, StoreError};
use super::types::{
    format_timestamp, parse_timestamp, Article, Filters, NewArticle, Predicate,
};
use crate::db::DbPool;

const SELECT_ARTICLES: &str =
    "SELECT id, title, description, link, category, thumbnail, created_at FROM articles";

/// Row type for an article from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: String,
    link: String,
    category: Option<String>,
    thumbnail: String,
    created_at: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = StoreError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&row.created_at).ok_or_else(|| {
            StoreError::Database(format!(
                "article {} has invalid created_at: {:?}",
                row.id, row.created_at
            ))
        })?;

        Ok(Article {
            id: row.id,
            title: row.title,
            description: row.description,
            link: row.link,
            category: row.category,
            thumbnail: row.thumbnail,
            created_at,
        })
    }
}

/// Repository for article persistence.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: DbPool,
}

impl ArticleRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert an article.
    ///
    /// Fails with [`StoreError::DuplicateKey`] carrying the link when an
    /// article with the same link already exists.
    pub async fn insert(&self, article: &NewArticle) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (title, description, link, category, thumbnail, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.link)
        .bind(&article.category)
        .bind(&article.thumbnail)
        .bind(format_timestamp(&article.created_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::DuplicateKey(_) => StoreError::DuplicateKey(article.link.clone()),
            other => other,
        })?;

        Ok(id)
    }

    /// Get an article by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!("{SELECT_ARTICLES} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Article::try_from).transpose()
    }

    /// Get an article by its source link.
    pub async fn get_by_link(&self, link: &str) -> Result<Option<Article>, StoreError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!("{SELECT_ARTICLES} WHERE link = ?"))
            .bind(link)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Article::try_from).transpose()
    }

    /// Count all articles.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl ArticleStore for ArticleRepository {
    async fn insert_if_absent(&self, article: &NewArticle) -> Result<Option<i64>, StoreError> {
        match self.insert(article).await {
            Ok(id) => Ok(Some(id)),
            Err(StoreError::DuplicateKey(link)) => {
                debug!(link = %link, "Article already stored");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_page(
        &self,
        after_id: i64,
        limit: u32,
        filters: &Filters,
    ) -> Result<Vec<Article>, StoreError> {
        let mut query = build_page_query(after_id, limit, filters);
        let rows = query
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Article::try_from).collect()
    }
}

/// Build the page query: id watermark, filter predicates, ascending id order.
fn build_page_query(after_id: i64, limit: u32, filters: &Filters) -> QueryBuilder<'static, Sqlite> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ARTICLES);
    query.push(" WHERE id > ").push_bind(after_id);

    for predicate in filters.predicates() {
        match predicate {
            Predicate::Contains(column, value) => {
                query
                    .push(" AND ")
                    .push(column.as_str())
                    .push(" LIKE ")
                    .push_bind(like_pattern(&value))
                    .push(" ESCAPE '\\'");
            }
            Predicate::CreatedAtOrAfter(bound) => {
                query
                    .push(" AND created_at >= ")
                    .push_bind(format_timestamp(&bound));
            }
            Predicate::CreatedBefore(bound) => {
                query
                    .push(" AND created_at < ")
                    .push_bind(format_timestamp(&bound));
            }
        }
    }

    query.push(" ORDER BY id ASC LIMIT ").push_bind(i64::from(limit));
    query
}

/// Wrap a value in `%…%`, escaping LIKE wildcards so it matches literally.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
