//! # wikiseek-api
//!
//! Wikipedia Action API access for wikiseek.
//!
//! This crate issues the three requests the front-end needs (full-text
//! search, category lookup, article parse) and holds the two pieces of
//! post-processing that sit between the API and the view: the category
//! filter and the article adapter.
//!
//! ## Design
//!
//! - [`WikiApi`] is the seam: [`WikipediaClient`] talks HTTP, tests plug in
//!   scripted implementations
//! - Category lookups run one after another, never fanned out
//! - Article markup is cut on `</p>`, not parsed
//! - No retries and no caching: a failure surfaces as a single error
//!
//! ## Security
//!
//! - Snippets and article HTML are returned untouched; callers must treat
//!   them as external markup
//! - Queries are logged only at trace level

pub mod article;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;

pub use client::{WikiApi, WikipediaClient};
pub use config::{ApiConfig, CategoryFailurePolicy};
pub use error::{Result, WikiError};
pub use types::{Article, ArticleView, Reference, SearchResult};

/// Search and drop hits whose categories match the configured terms.
///
/// Issues one search request followed by one category request per hit,
/// sequentially. Results keep the API's relevance order.
///
/// # Errors
///
/// Returns the search error, or the first category lookup error when the
/// failure policy is [`CategoryFailurePolicy::Propagate`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wikiseek_api::Result<()> {
/// let config = wikiseek_api::ApiConfig::default();
/// let client = wikiseek_api::WikipediaClient::new(&config)?;
/// let results = wikiseek_api::search(&client, "rust programming", &config).await?;
/// for result in &results {
///     println!("{}: {}", result.page_id, result.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<A: WikiApi>(
    api: &A,
    query: &str,
    config: &ApiConfig,
) -> Result<Vec<SearchResult>> {
    let hits = api.search(query).await?;
    filter::filter_results(api, hits, config).await
}

/// Fetch an article and adapt it for display.
///
/// # Errors
///
/// Returns [`WikiError`] if the parse request fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wikiseek_api::Result<()> {
/// let config = wikiseek_api::ApiConfig::default();
/// let client = wikiseek_api::WikipediaClient::new(&config)?;
/// let article = wikiseek_api::open_article(&client, 29414838, &config).await?;
/// println!("{} references", article.references.len());
/// # Ok(())
/// # }
/// ```
pub async fn open_article<A: WikiApi>(
    api: &A,
    page_id: u64,
    config: &ApiConfig,
) -> Result<ArticleView> {
    let article = api.parse(page_id).await?;
    Ok(ArticleView::from_article(article, config.paragraph_limit))
}
