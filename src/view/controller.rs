//! Runs network operations and feeds their outcomes through the reducer.
//!
//! Starting an operation and finishing it are separate steps
//! (`begin_*`, `run_*`, [`Controller::apply`]) so a caller can interleave
//! several requests; [`Controller::submit_search`] and
//! [`Controller::open_result`] chain the three for the common case.

use wikiseek_api::{ApiConfig, WikiApi};

use super::state::{Event, Phase, RequestId, StalePolicy, ViewState};

/// A started search, waiting to be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Tag of the request.
    pub request: RequestId,
    /// Query captured when the search was started.
    pub query: String,
}

/// A started article fetch, waiting to be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleTicket {
    /// Tag of the request.
    pub request: RequestId,
    /// Page being opened.
    pub page_id: u64,
}

/// Owns the view state and drives it with a [`WikiApi`].
pub struct Controller<A> {
    api: A,
    config: ApiConfig,
    state: ViewState,
    next_request: u64,
}

impl<A: WikiApi> Controller<A> {
    /// Controller in the initial state.
    pub fn new(api: A, config: ApiConfig, stale_policy: StalePolicy) -> Self {
        Self {
            api,
            config,
            state: ViewState::new(stale_policy),
            next_request: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Client configuration in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Feed an event through the reducer.
    pub fn apply(&mut self, event: Event) {
        if let Some(request) = event.completion_of() {
            if !self.state.accepts(request) {
                tracing::warn!(%request, "discarding completion of superseded request");
            }
        }
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event);
    }

    /// Update the query input.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.apply(Event::QueryChanged(query.into()));
    }

    /// Update the input focus flag.
    pub fn set_focus(&mut self, focused: bool) {
        self.apply(Event::FocusChanged(focused));
    }

    /// Bring the result list back after opening an article.
    pub fn show_results(&mut self) {
        self.apply(Event::ShowResults);
    }

    /// Enter `Searching` for the current query.
    pub fn begin_search(&mut self) -> SearchTicket {
        let request = self.next_request_id();
        self.apply(Event::SearchStarted { request });
        SearchTicket {
            request,
            query: self.state.query.clone(),
        }
    }

    /// Enter `LoadingArticle` for `page_id`.
    pub fn begin_article(&mut self, page_id: u64) -> ArticleTicket {
        let request = self.next_request_id();
        self.apply(Event::ArticleStarted { request, page_id });
        ArticleTicket { request, page_id }
    }

    /// Search and filter for a ticket, returning the completion event.
    ///
    /// Failures are logged with their cause; the event only carries the
    /// request tag.
    pub async fn run_search(&self, ticket: SearchTicket) -> Event {
        let SearchTicket { request, query } = ticket;
        match wikiseek_api::search(&self.api, &query, &self.config).await {
            Ok(results) => {
                tracing::debug!(%request, count = results.len(), "search completed");
                Event::SearchSucceeded { request, results }
            }
            Err(err) => {
                tracing::error!(%request, error = %err, "Error fetching data from Wikipedia");
                Event::SearchFailed { request }
            }
        }
    }

    /// Fetch and adapt an article for a ticket, returning the completion event.
    pub async fn run_article(&self, ticket: ArticleTicket) -> Event {
        let ArticleTicket { request, page_id } = ticket;
        match wikiseek_api::open_article(&self.api, page_id, &self.config).await {
            Ok(article) => {
                tracing::debug!(%request, page_id, references = article.references.len(), "article loaded");
                Event::ArticleLoaded { request, article }
            }
            Err(err) => {
                tracing::error!(%request, page_id, error = %err, "Error fetching article content from Wikipedia");
                Event::ArticleFailed { request }
            }
        }
    }

    /// Search for the current query and apply the outcome.
    pub async fn submit_search(&mut self) -> Phase {
        let ticket = self.begin_search();
        let event = self.run_search(ticket).await;
        self.apply(event);
        self.state.phase()
    }

    /// Open an article by page id and apply the outcome.
    pub async fn open_result(&mut self, page_id: u64) -> Phase {
        let ticket = self.begin_article(page_id);
        let event = self.run_article(ticket).await;
        self.apply(event);
        self.state.phase()
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}
