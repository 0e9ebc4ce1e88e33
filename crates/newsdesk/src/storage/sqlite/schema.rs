//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as fixed-width RFC 3339 text so
//! lexical order matches chronological order.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Authors table
CREATE TABLE IF NOT EXISTS authors (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);

-- Articles table
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    author_id TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    image_url TEXT,
    category TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES authors(id)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_articles_created_at_id ON articles(created_at, id);
CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title);
"#;

// Author queries
pub const INSERT_AUTHOR: &str = r#"
INSERT INTO authors (id, first_name, last_name)
VALUES (?1, ?2, ?3)
"#;

// Article queries
pub const INSERT_ARTICLE: &str = r#"
INSERT INTO articles (id, author_id, title, content, image_url, category, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const UPDATE_ARTICLE: &str = r#"
UPDATE articles
SET title = ?2, content = ?3, image_url = ?4, category = ?5, updated_at = ?6
WHERE id = ?1
RETURNING id, author_id, title, content, image_url, category, created_at, updated_at
"#;

pub const DELETE_ARTICLE: &str = r#"
DELETE FROM articles
WHERE id = ?1
"#;

pub const SELECT_ARTICLE_WITH_AUTHOR: &str = r#"
SELECT a.id, a.author_id, a.title, a.content, a.image_url, a.category, a.created_at, a.updated_at,
       au.first_name, au.last_name
FROM articles a
JOIN authors au ON au.id = a.author_id
WHERE a.id = ?1
"#;

pub const COUNT_ARTICLES: &str = r#"
SELECT COUNT(*) FROM articles
"#;

pub const SELECT_ARTICLES_PAGE: &str = r#"
SELECT id, author_id, title, content, image_url, category, created_at, updated_at
FROM articles
ORDER BY created_at ASC, id ASC
LIMIT ?2 OFFSET ?1
"#;

pub const COUNT_ARTICLES_BY_TITLE: &str = r#"
SELECT COUNT(*) FROM articles
WHERE title LIKE ?1 ESCAPE '\'
"#;

pub const SELECT_ARTICLES_BY_TITLE_PAGE: &str = r#"
SELECT id, author_id, title, content, image_url, category, created_at, updated_at
FROM articles
WHERE title LIKE ?1 ESCAPE '\'
ORDER BY created_at ASC, id ASC
LIMIT ?3 OFFSET ?2
"#;
