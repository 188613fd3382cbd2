//! View state and its reducer.
//!
//! [`ViewState`] is an immutable value: every interaction and every network
//! completion is an [`Event`], and [`ViewState::reduce`] maps the current
//! state and an event to the next state without side effects.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐ submit ┌───────────┐  ok   ┌──────────────┐ open ┌────────────────┐  ok  ┌──────────────┐
//! │ Idle ├───────►│ Searching ├──────►│ ResultsShown ├─────►│ LoadingArticle ├─────►│ ArticleShown │
//! └──────┘        └─────┬─────┘       └──────────────┘      └───────┬────────┘      └──────────────┘
//!                       │ err                                       │ err
//!                       ▼                                           ▼
//!                 ┌────────────┐◄───────────────────────────────────┘
//!                 │ ErrorShown │
//!                 └────────────┘
//! ```
//!
//! Any phase can re-enter `Searching` or `LoadingArticle`.

use std::fmt;

use serde::{Deserialize, Serialize};
use wikiseek_api::{ArticleView, Reference, SearchResult};

/// User-facing message for a failed search (including category lookups).
pub const SEARCH_ERROR_MESSAGE: &str = "Error fetching data from Wikipedia";

/// User-facing message for a failed article fetch.
pub const ARTICLE_ERROR_MESSAGE: &str = "Error fetching article content from Wikipedia";

/// Tag attached to every started operation so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How completions of superseded requests are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Only the completion of the most recently started request is applied.
    #[default]
    DiscardStale,
    /// Every completion is applied in arrival order; a late response to an
    /// older request overwrites newer state.
    LastWriteWins,
}

/// What a pending request is fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Search plus category filtering.
    Search,
    /// Article parse for a page.
    Article {
        /// Page being opened.
        page_id: u64,
    },
}

/// The in-flight request the view is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    /// Request tag.
    pub id: RequestId,
    /// What is being fetched.
    pub kind: RequestKind,
}

/// Interaction phase, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been requested yet.
    Idle,
    /// A search is in flight.
    Searching,
    /// Search results are visible.
    ResultsShown,
    /// The last operation failed.
    ErrorShown,
    /// An article is being fetched.
    LoadingArticle,
    /// An article is visible and results are hidden.
    ArticleShown,
}

/// Everything that can happen to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The query input changed.
    QueryChanged(String),
    /// The query input gained or lost focus.
    FocusChanged(bool),
    /// A search for the current query was started.
    SearchStarted {
        /// Tag of the new request.
        request: RequestId,
    },
    /// A search finished; `results` are already filtered.
    SearchSucceeded {
        /// Tag of the completed request.
        request: RequestId,
        /// Filtered results in relevance order.
        results: Vec<SearchResult>,
    },
    /// A search or one of its category lookups failed.
    SearchFailed {
        /// Tag of the failed request.
        request: RequestId,
    },
    /// An article fetch was started.
    ArticleStarted {
        /// Tag of the new request.
        request: RequestId,
        /// Page being opened.
        page_id: u64,
    },
    /// An article fetch finished.
    ArticleLoaded {
        /// Tag of the completed request.
        request: RequestId,
        /// Adapted article.
        article: ArticleView,
    },
    /// An article fetch failed.
    ArticleFailed {
        /// Tag of the failed request.
        request: RequestId,
    },
    /// Make the (possibly hidden) result list visible again.
    ShowResults,
}

impl Event {
    /// The request a completion event belongs to, if it is one.
    pub fn completion_of(&self) -> Option<RequestId> {
        match self {
            Self::SearchSucceeded { request, .. }
            | Self::SearchFailed { request }
            | Self::ArticleLoaded { request, .. }
            | Self::ArticleFailed { request } => Some(*request),
            _ => None,
        }
    }
}

/// The complete view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Current query input.
    pub query: String,
    /// Filtered results of the last applied search.
    pub results: Vec<SearchResult>,
    /// Paragraph prefix of the open article; empty when none.
    pub selected_article: String,
    /// Title of the open article; empty when none.
    pub selected_title: String,
    /// References of the open article.
    pub references: Vec<Reference>,
    /// A request is in flight.
    pub loading: bool,
    /// User-facing error of the last failed operation.
    pub error: Option<String>,
    /// Whether the result list is the primary content.
    pub show_results: bool,
    /// Whether the query input has focus.
    pub input_focused: bool,
    /// Request whose completion is awaited.
    pub pending: Option<PendingRequest>,
    /// Whether any completion has been applied yet.
    settled: bool,
    /// Staleness handling.
    pub stale_policy: StalePolicy,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

impl ViewState {
    /// Initial state.
    pub fn new(stale_policy: StalePolicy) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            selected_article: String::new(),
            selected_title: String::new(),
            references: Vec::new(),
            loading: false,
            error: None,
            show_results: true,
            input_focused: false,
            pending: None,
            settled: false,
            stale_policy,
        }
    }

    /// Map this state and `event` to the next state.
    pub fn reduce(self, event: Event) -> Self {
        if let Some(request) = event.completion_of() {
            if !self.accepts(request) {
                return self;
            }
        }

        match event {
            Event::QueryChanged(query) => Self { query, ..self },
            Event::FocusChanged(input_focused) => Self {
                input_focused,
                ..self
            },
            Event::ShowResults => Self {
                show_results: true,
                ..self
            },
            Event::SearchStarted { request } => self.begin(request, RequestKind::Search),
            Event::ArticleStarted { request, page_id } => {
                self.begin(request, RequestKind::Article { page_id })
            }
            Event::SearchSucceeded { results, .. } => Self {
                results,
                error: None,
                show_results: true,
                ..self.settle()
            },
            Event::SearchFailed { .. } => Self {
                error: Some(SEARCH_ERROR_MESSAGE.to_owned()),
                ..self.settle()
            },
            Event::ArticleLoaded { article, .. } => Self {
                selected_article: article.html,
                selected_title: article.title,
                references: article.references,
                show_results: false,
                ..self.settle()
            },
            Event::ArticleFailed { .. } => Self {
                error: Some(ARTICLE_ERROR_MESSAGE.to_owned()),
                ..self.settle()
            },
        }
    }

    /// Whether a completion for `request` would be applied.
    pub fn accepts(&self, request: RequestId) -> bool {
        match self.stale_policy {
            StalePolicy::LastWriteWins => true,
            StalePolicy::DiscardStale => self.pending.is_some_and(|p| p.id == request),
        }
    }

    /// Current interaction phase.
    pub fn phase(&self) -> Phase {
        if let Some(pending) = self.pending {
            return match pending.kind {
                RequestKind::Search => Phase::Searching,
                RequestKind::Article { .. } => Phase::LoadingArticle,
            };
        }
        if self.error.is_some() {
            return Phase::ErrorShown;
        }
        if !self.settled {
            Phase::Idle
        } else if !self.show_results && !self.selected_article.is_empty() {
            Phase::ArticleShown
        } else {
            Phase::ResultsShown
        }
    }

    /// Whether there is anything to show below the search box.
    pub fn has_content(&self) -> bool {
        !self.results.is_empty() || !self.selected_article.is_empty()
    }

    fn begin(self, id: RequestId, kind: RequestKind) -> Self {
        Self {
            loading: true,
            error: None,
            pending: Some(PendingRequest { id, kind }),
            ..self
        }
    }

    fn settle(self) -> Self {
        Self {
            loading: false,
            pending: None,
            settled: true,
            ..self
        }
    }
}
