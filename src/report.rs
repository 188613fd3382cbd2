//! Output of the one-shot `search` and `article` commands.

use serde::Serialize;
use wikiseek_api::Reference;

use crate::error::{AppError, Result};
use crate::view::{Phase, TerminalRenderer, ViewState};

/// What a one-shot command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// The filtered result list.
    Results,
    /// The open article.
    Article {
        /// Page that was requested.
        page_id: u64,
    },
}

#[derive(Serialize)]
struct ArticleJson<'a> {
    page_id: u64,
    title: &'a str,
    html: &'a str,
    references: &'a [Reference],
}

/// Text to print for a settled one-shot command, newline-terminated.
///
/// # Errors
///
/// A state in [`Phase::ErrorShown`] becomes [`AppError::Request`] carrying
/// the user-facing message, so the binary exits non-zero.
pub fn render_report(
    state: &ViewState,
    renderer: &TerminalRenderer,
    report: Report,
    json: bool,
) -> Result<String> {
    if state.phase() == Phase::ErrorShown {
        let message = state.error.as_deref().unwrap_or("request failed");
        return Err(AppError::Request(message.to_owned()));
    }
    if !json {
        return Ok(renderer.render(state));
    }

    let mut out = match report {
        Report::Results => serde_json::to_string_pretty(&state.results)?,
        Report::Article { page_id } => serde_json::to_string_pretty(&ArticleJson {
            page_id,
            title: &state.selected_title,
            html: &state.selected_article,
            references: &state.references,
        })?,
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ARTICLE_ERROR_MESSAGE, Event, RequestId, SEARCH_ERROR_MESSAGE};
    use wikiseek_api::{ArticleView, SearchResult};

    fn renderer() -> TerminalRenderer {
        TerminalRenderer::new("https://en.wikipedia.org/")
    }

    fn searched() -> ViewState {
        ViewState::default()
            .reduce(Event::SearchStarted {
                request: RequestId(1),
            })
            .reduce(Event::SearchSucceeded {
                request: RequestId(1),
                results: vec![SearchResult {
                    page_id: 42,
                    title: "Answer".into(),
                    snippet: "<b>42</b>".into(),
                }],
            })
    }

    fn opened() -> ViewState {
        ViewState::default()
            .reduce(Event::ArticleStarted {
                request: RequestId(1),
                page_id: 42,
            })
            .reduce(Event::ArticleLoaded {
                request: RequestId(1),
                article: ArticleView {
                    page_id: 42,
                    title: "Answer".into(),
                    html: "<p>Forty-two.</p>".into(),
                    references: vec![Reference {
                        url: "https://example.com/guide".into(),
                        title: "guide".into(),
                    }],
                },
            })
    }

    #[test]
    fn results_json_is_array_of_hits() {
        let out = render_report(&searched(), &renderer(), Report::Results, true).expect("report");
        assert!(out.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value[0]["pageid"], 42);
        assert_eq!(value[0]["title"], "Answer");
        assert_eq!(value[0]["snippet"], "<b>42</b>");
    }

    #[test]
    fn article_json_shape() {
        let out = render_report(&opened(), &renderer(), Report::Article { page_id: 42 }, true)
            .expect("report");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "page_id": 42,
                "title": "Answer",
                "html": "<p>Forty-two.</p>",
                "references": [{"url": "https://example.com/guide", "title": "guide"}]
            })
        );
    }

    #[test]
    fn text_output_is_rendered_view() {
        let out = render_report(&searched(), &renderer(), Report::Results, false).expect("report");
        assert!(out.starts_with("NexusBrowser\n"));
        assert!(out.contains("[1] Answer"));
    }

    #[test]
    fn failed_search_is_error_with_message() {
        let state = ViewState::default()
            .reduce(Event::SearchStarted {
                request: RequestId(1),
            })
            .reduce(Event::SearchFailed {
                request: RequestId(1),
            });
        let err = render_report(&state, &renderer(), Report::Results, true).unwrap_err();
        assert!(matches!(err, AppError::Request(_)));
        assert_eq!(err.to_string(), SEARCH_ERROR_MESSAGE);
    }

    #[test]
    fn failed_article_is_error_even_for_text() {
        let state = ViewState::default()
            .reduce(Event::ArticleStarted {
                request: RequestId(1),
                page_id: 7,
            })
            .reduce(Event::ArticleFailed {
                request: RequestId(1),
            });
        let err = render_report(&state, &renderer(), Report::Article { page_id: 7 }, false)
            .unwrap_err();
        assert_eq!(err.to_string(), ARTICLE_ERROR_MESSAGE);
    }
}
