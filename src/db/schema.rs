//! Database schema and migrations for newsfeed.
//!
//! Migrations are applied in order; `schema_version` records the last one run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: articles
    r#"
CREATE TABLE articles (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL CHECK (length(title) > 0),
    description  TEXT NOT NULL DEFAULT '',
    link         TEXT NOT NULL,                -- source item identifier
    category     TEXT,
    thumbnail    TEXT NOT NULL,
    created_at   TEXT NOT NULL                 -- RFC 3339, UTC, microseconds
);

CREATE UNIQUE INDEX idx_articles_link ON articles(link);
CREATE INDEX idx_articles_category ON articles(category);
CREATE INDEX idx_articles_created_at ON articles(created_at);
"#,
];
