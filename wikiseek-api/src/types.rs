//! Core types for search hits, articles and their references.

use serde::{Deserialize, Serialize};

/// A single search hit as returned by `list=search`.
///
/// `snippet` is an HTML fragment supplied by the API (match highlighting
/// uses `<span class="searchmatch">`). It must be treated as external markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Wikipedia page id.
    #[serde(rename = "pageid")]
    pub page_id: u64,
    /// Page title.
    pub title: String,
    /// HTML-bearing snippet around the matched terms.
    pub snippet: String,
}

/// An external link cited by an article, with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The cited URL, unchanged.
    pub url: String,
    /// Last path segment of the URL, or `"Unknown"`.
    pub title: String,
}

/// A parsed article as returned by `action=parse`, before adaptation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Wikipedia page id.
    pub page_id: u64,
    /// Page title.
    pub title: String,
    /// Full rendered HTML body.
    pub html: String,
    /// Raw external-link URLs, in API order.
    pub external_links: Vec<String>,
}

/// An article prepared for display: paragraph prefix plus references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleView {
    /// Wikipedia page id.
    pub page_id: u64,
    /// Page title.
    pub title: String,
    /// The first paragraphs of the rendered HTML.
    pub html: String,
    /// External links mapped to display labels.
    pub references: Vec<Reference>,
}
