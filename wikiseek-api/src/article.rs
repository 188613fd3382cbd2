//! Article adaptation: paragraph prefix and reference labels.
//!
//! The prefix is cut on the literal `</p>` token, not by parsing the
//! markup, so the output is not guaranteed to be well-formed HTML.

use url::Url;

use crate::types::{Article, ArticleView, Reference};

/// Closing tag the article markup is split on.
const PARAGRAPH_CLOSE: &str = "</p>";

/// Label used when a URL has no final path segment.
pub const UNKNOWN_REFERENCE_TITLE: &str = "Unknown";

/// Keep at most `limit` `</p>`-separated segments of `html`.
///
/// Segments are rejoined with `</p>` and a single `</p>` is appended.
/// Input with fewer closes is returned whole plus the trailing close.
pub fn truncate_paragraphs(html: &str, limit: usize) -> String {
    let mut prefix = html
        .split(PARAGRAPH_CLOSE)
        .take(limit)
        .collect::<Vec<_>>()
        .join(PARAGRAPH_CLOSE);
    prefix.push_str(PARAGRAPH_CLOSE);
    prefix
}

/// Display label for an external link: the text after the last `/`.
pub fn reference_title(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_owned(),
        _ => UNKNOWN_REFERENCE_TITLE.to_owned(),
    }
}

/// Map external-link URLs to [`Reference`]s, preserving order.
pub fn map_references<S: AsRef<str>>(links: &[S]) -> Vec<Reference> {
    links
        .iter()
        .map(|link| {
            let url = link.as_ref();
            Reference {
                url: url.to_owned(),
                title: reference_title(url),
            }
        })
        .collect()
}

/// The `?curid=` link for a page on `site_root`.
///
/// Falls back to `site_root` followed by the query if the root cannot be
/// parsed; configuration validation normally rules that out.
pub fn read_more_url(site_root: &str, page_id: u64) -> String {
    match Url::parse(site_root) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .clear()
                .append_pair("curid", &page_id.to_string());
            url.to_string()
        }
        Err(_) => format!("{site_root}?curid={page_id}"),
    }
}

impl ArticleView {
    /// Adapt a parsed article for display.
    pub fn from_article(article: Article, paragraph_limit: usize) -> Self {
        Self {
            page_id: article.page_id,
            html: truncate_paragraphs(&article.html, paragraph_limit),
            references: map_references(&article.external_links),
            title: article.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_closes_returns_input_plus_close() {
        let html = "<p>one</p><p>two</p>";
        assert_eq!(truncate_paragraphs(html, 4), "<p>one</p><p>two</p></p>");
    }

    #[test]
    fn no_closes_appends_close() {
        assert_eq!(truncate_paragraphs("<div>x</div>", 4), "<div>x</div></p>");
    }

    #[test]
    fn empty_input_is_single_close() {
        assert_eq!(truncate_paragraphs("", 4), "</p>");
    }

    #[test]
    fn keeps_four_segments() {
        let html = "<p>1</p><p>2</p><p>3</p><p>4</p><p>5</p><p>6</p>";
        let out = truncate_paragraphs(html, 4);
        assert_eq!(out, "<p>1</p><p>2</p><p>3</p><p>4</p>");
        assert!(!out.contains('5'));
    }

    #[test]
    fn truncated_output_ends_with_exactly_one_close() {
        let html = "<p>a</p>\n<p>b</p>\n<p>c</p>\n<p>d</p>\n<p>e</p>";
        let out = truncate_paragraphs(html, 4);
        assert!(out.ends_with("</p>"));
        assert!(!out.ends_with("</p></p>"));
        assert!(out.split("</p>").count() <= 5);
    }

    #[test]
    fn exactly_four_closes_keeps_content_before_trailing_text() {
        let html = "<p>1</p><p>2</p><p>3</p><p>4</p>tail";
        assert_eq!(truncate_paragraphs(html, 4), "<p>1</p><p>2</p><p>3</p><p>4</p>");
    }

    #[test]
    fn custom_limit() {
        assert_eq!(truncate_paragraphs("<p>1</p><p>2</p>", 1), "<p>1</p>");
    }

    #[test]
    fn reference_title_is_last_segment() {
        assert_eq!(reference_title("https://example.com/foo/bar"), "bar");
    }

    #[test]
    fn reference_title_unknown_for_trailing_slash() {
        assert_eq!(reference_title("https://example.com/"), "Unknown");
    }

    #[test]
    fn reference_title_unknown_for_empty() {
        assert_eq!(reference_title(""), "Unknown");
    }

    #[test]
    fn reference_title_keeps_query_string() {
        assert_eq!(reference_title("https://example.com/doc?id=3"), "doc?id=3");
    }

    #[test]
    fn map_references_preserves_order() {
        let refs = map_references(&["https://a.org/x", "//b.org/", "https://c.org/y/z"]);
        let titles: Vec<&str> = refs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "Unknown", "z"]);
        assert_eq!(refs[1].url, "//b.org/");
    }

    #[test]
    fn read_more_url_uses_curid() {
        assert_eq!(
            read_more_url("https://en.wikipedia.org/", 29414838),
            "https://en.wikipedia.org/?curid=29414838"
        );
    }

    #[test]
    fn article_view_applies_both_stages() {
        let article = Article {
            page_id: 3,
            title: "Three".into(),
            html: "<p>a</p><p>b</p><p>c</p><p>d</p><p>e</p>".into(),
            external_links: vec!["https://example.com/ref".into()],
        };
        let view = ArticleView::from_article(article, 4);
        assert_eq!(view.page_id, 3);
        assert_eq!(view.title, "Three");
        assert_eq!(view.html, "<p>a</p><p>b</p><p>c</p><p>d</p>");
        assert_eq!(view.references[0].title, "ref");
    }
}
