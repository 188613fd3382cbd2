//! The Wikipedia Action API client and the trait it is consumed through.
//!
//! Everything downstream (category filter, view controller) takes a
//! [`WikiApi`] so tests can substitute a scripted implementation for the
//! network.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Result, WikiError};
use crate::http;
use crate::types::{Article, SearchResult};

/// The three query shapes the front-end issues.
///
/// All implementations must be `Send + Sync`; futures returned must be `Send`
/// so operations can run on a multi-threaded runtime.
pub trait WikiApi: Send + Sync {
    /// Full-text search. Hits come back in the API's relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError`] if the request fails or the body cannot be read.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;

    /// Category titles of a page. A page without categories yields an
    /// empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError`] if the request fails or the body cannot be read.
    fn categories(&self, page_id: u64) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Rendered HTML and external links of a page.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError`] if the request fails, the page does not exist,
    /// or the body cannot be read.
    fn parse(&self, page_id: u64) -> impl Future<Output = Result<Article>> + Send;
}

impl<T: WikiApi> WikiApi for Arc<T> {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<SearchResult>>> + Send {
        (**self).search(query)
    }

    fn categories(&self, page_id: u64) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).categories(page_id)
    }

    fn parse(&self, page_id: u64) -> impl Future<Output = Result<Article>> + Send {
        (**self).parse(page_id)
    }
}

/// [`WikiApi`] over HTTP against a MediaWiki Action API endpoint.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl WikipediaClient {
    /// Create a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Config`] if the configuration is invalid, or
    /// [`WikiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| WikiError::Config(format!("invalid endpoint: {e}")))?;
        Ok(Self {
            http: http::build_client(config)?,
            endpoint,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL for a parameter set. `format=json` and
    /// `origin=*` are always appended.
    pub(crate) fn request_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("format", "json")
            .append_pair("origin", "*");
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let url = self.request_url(params);
        tracing::trace!(%url, "Wikipedia API request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WikiError::Http(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| WikiError::Http(format!("bad status: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| WikiError::Http(format!("response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "Wikipedia API response received");
        decode_body(&body)
    }
}

impl WikiApi for WikipediaClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::trace!(query, "Wikipedia search");
        let response: SearchResponse = self
            .get_json(&[("action", "query"), ("list", "search"), ("srsearch", query)])
            .await?;
        let hits = response.query.search;
        tracing::debug!(count = hits.len(), "search hits received");
        Ok(hits)
    }

    async fn categories(&self, page_id: u64) -> Result<Vec<String>> {
        let id = page_id.to_string();
        let response: CategoriesResponse = self
            .get_json(&[
                ("action", "query"),
                ("pageids", id.as_str()),
                ("prop", "categories"),
            ])
            .await?;
        Ok(response.into_titles(&id))
    }

    async fn parse(&self, page_id: u64) -> Result<Article> {
        let id = page_id.to_string();
        let response: ParseResponse = self
            .get_json(&[
                ("action", "parse"),
                ("pageid", id.as_str()),
                ("prop", "text|externallinks"),
            ])
            .await?;
        let parse = response.parse;
        tracing::debug!(
            page_id,
            bytes = parse.text.html.len(),
            links = parse.externallinks.len(),
            "article parsed"
        );
        Ok(Article {
            page_id: parse.pageid.unwrap_or(page_id),
            title: parse.title,
            html: parse.text.html,
            external_links: parse.externallinks,
        })
    }
}

/// Decode an API body, surfacing `{"error": {...}}` envelopes as [`WikiError::Api`].
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| WikiError::Parse(format!("invalid JSON: {e}")))?;

    if let Some(error) = value.get("error") {
        let error: ApiErrorBody = serde_json::from_value(error.clone())
            .map_err(|e| WikiError::Parse(format!("malformed error envelope: {e}")))?;
        return Err(WikiError::Api {
            code: error.code,
            info: error.info,
        });
    }

    serde_json::from_value(value).map_err(|e| WikiError::Parse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    query: Option<CategoriesQuery>,
}

#[derive(Debug, Deserialize)]
struct CategoriesQuery {
    #[serde(default)]
    pages: HashMap<String, CategoryPage>,
}

#[derive(Debug, Deserialize)]
struct CategoryPage {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    title: String,
}

impl CategoriesResponse {
    /// Titles for `page_id`; any missing level counts as "no categories".
    fn into_titles(self, page_id: &str) -> Vec<String> {
        self.query
            .and_then(|mut q| q.pages.remove(page_id))
            .map(|page| page.categories.into_iter().map(|c| c.title).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: ParseBody,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    pageid: Option<u64>,
    text: ParseText,
    #[serde(default)]
    externallinks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: String,
}
