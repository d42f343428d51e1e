//! Page content extraction for URL submissions
//!
//! Fetches a page and reduces its HTML to a bounded run of visible text that
//! can be handed to the text analysis path.

pub mod mock;
pub mod page;

pub use mock::MockContentExtractor;
pub use page::PageExtractor;

use crate::Result;
use async_trait::async_trait;
use scraper::Html;

/// Upper bound on whitespace-delimited tokens forwarded downstream.
pub const MAX_TOKENS: usize = 1000;

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String>;
}

/// Collect visible text from an HTML document, collapsing whitespace and
/// keeping at most `max_tokens` tokens.
pub fn html_to_text(html: &str, max_tokens: usize) -> String {
    let document = Html::parse_document(html);

    let tokens: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            })
        })
        .filter_map(|node| node.value().as_text())
        .flat_map(|text| text.split_whitespace())
        .take(max_tokens)
        .collect();

    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_script_style_and_noscript() {
        let html = r#"<html><head><title>Breaking</title>
            <style>body { color: red; }</style>
            <script>var tracking = "fake";</script></head>
            <body><h1>Headline</h1><p>First   paragraph
            continues.</p><noscript>Enable JS</noscript></body></html>"#;

        assert_eq!(
            html_to_text(html, MAX_TOKENS),
            "Breaking Headline First paragraph continues."
        );
    }

    #[test]
    fn test_adjacent_elements_do_not_merge_words() {
        let html = "<p>one</p><p>two</p><span>three</span>";
        assert_eq!(html_to_text(html, MAX_TOKENS), "one two three");
    }

    #[test]
    fn test_caps_token_count() {
        let body: String = (0..2500).map(|i| format!("w{} ", i)).collect();
        let html = format!("<html><body><p>{}</p></body></html>", body);

        let text = html_to_text(&html, MAX_TOKENS);
        let tokens: Vec<&str> = text.split(' ').collect();
        assert_eq!(tokens.len(), MAX_TOKENS);
        assert_eq!(tokens[0], "w0");
        assert_eq!(tokens[MAX_TOKENS - 1], "w999");
    }

    #[test]
    fn test_script_only_page_is_empty() {
        let html = "<html><head><script>alert(1)</script><style>p{}</style></head><body></body></html>";
        assert_eq!(html_to_text(html, MAX_TOKENS), "");
    }

    #[test]
    fn test_comments_are_not_text() {
        let html = "<body><!-- hidden note --><p>shown</p></body>";
        assert_eq!(html_to_text(html, MAX_TOKENS), "shown");
    }
}
