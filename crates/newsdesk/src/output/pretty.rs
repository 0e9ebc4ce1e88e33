//! Pretty output formatting.

use newsdesk_core::article::{Article, ArticleList, ArticleWithAuthor, Author};

/// Format an author for display.
pub fn format_author(author: &Author) -> String {
    format!("{}\n  ID: {}", author.display_name(), author.id)
}

/// Format an article for display.
pub fn format_article(article: &Article) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Author ID: {}",
        article.title, article.category, article.id, article.author_id
    );
    if let Some(url) = &article.image_url {
        output.push_str(&format!("\n  Image: {}", url));
    }
    output.push_str(&format!(
        "\n  Created: {}\n  Updated: {}",
        article.created_at, article.updated_at
    ));
    output
}

/// Format an article with its byline, including the body.
pub fn format_article_with_author(article: &ArticleWithAuthor) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  By: {}",
        article.title, article.category, article.id, article.author
    );
    if let Some(url) = &article.image_url {
        output.push_str(&format!("\n  Image: {}", url));
    }
    output.push_str(&format!(
        "\n  Created: {}\n  Updated: {}\n\n{}",
        article.created_at, article.updated_at, article.content
    ));
    output
}

/// Format one page of articles for display.
pub fn format_article_list(list: &ArticleList) -> String {
    if list.articles.is_empty() {
        return format!(
            "No articles on page {} of {} ({} total).",
            list.page, list.total_pages, list.total_count
        );
    }
    let mut output = format!(
        "ARTICLES page {}/{} ({} total)\n",
        list.page, list.total_pages, list.total_count
    );
    output.push_str(&"-".repeat(40));
    for article in &list.articles {
        output.push_str(&format!("\n{}", format_article(article)));
        output.push('\n');
    }
    if list.has_more {
        output.push_str(&format!("\nMore results on page {}.", list.page + 1));
    }
    output
}
