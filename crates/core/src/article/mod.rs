mod types;

pub use types::{Article, ArticleList, ArticleUpdate, ArticleWithAuthor, Author, NewArticle};
