//! Line-oriented interactive session.
//!
//! Reads commands from an async reader, drives a [`Controller`] and writes
//! the re-rendered view after every step. A plain line searches; commands
//! start with `:`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use wikiseek_api::WikiApi;

use crate::error::Result;
use crate::view::{Controller, TerminalRenderer};

/// Help text listing the session commands.
pub const HELP: &str = "\
<text>      search Wikipedia for <text>
:open <n>   open result number <n>
:back       show the result list again
:help       show this help
:quit       leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for the text.
    Search(String),
    /// Open the result with this 1-based number.
    Open(usize),
    /// Show the result list again.
    Back,
    /// Print the help text.
    Help,
    /// End the session.
    Quit,
    /// Blank line.
    Empty,
    /// Anything starting with `:` that is not a command, or a bad argument.
    Invalid(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Search(line.to_owned());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("q" | "quit"), None, _) => Self::Quit,
            (Some("back"), None, _) => Self::Back,
            (Some("help"), None, _) => Self::Help,
            (Some("open"), Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Open(n),
                _ => Self::Invalid(format!("not a result number: {n}")),
            },
            _ => Self::Invalid(format!("unknown command: {line}")),
        }
    }
}

/// Run the session until the reader closes or `:quit` is entered.
///
/// # Errors
///
/// Returns an error only for I/O failures on `reader` or `writer`; fetch
/// failures are part of the view.
pub async fn run_session<A, R, W>(
    controller: &mut Controller<A>,
    renderer: &TerminalRenderer,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    A: WikiApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        controller.set_focus(true);
        writer
            .write_all(renderer.render(controller.state()).as_bytes())
            .await?;
        writer.write_all(b"\nwikiseek> ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        controller.set_focus(false);

        match Command::parse(&line) {
            Command::Search(query) => {
                controller.set_query(query);
                let phase = controller.submit_search().await;
                tracing::debug!(?phase, "search settled");
            }
            Command::Open(number) => {
                let page_id = controller.state().results.get(number - 1).map(|r| r.page_id);
                match page_id {
                    Some(page_id) => {
                        let phase = controller.open_result(page_id).await;
                        tracing::debug!(?phase, page_id, "article settled");
                    }
                    None => {
                        writer
                            .write_all(format!("no result number {number}\n").as_bytes())
                            .await?;
                    }
                }
            }
            Command::Back => controller.show_results(),
            Command::Help => {
                writer.write_all(HELP.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            Command::Quit => break,
            Command::Empty => {}
            Command::Invalid(message) => {
                writer.write_all(format!("{message}\n").as_bytes()).await?;
            }
        }
    }

    controller.set_focus(false);
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Phase, StalePolicy};
    use wikiseek_api::{ApiConfig, Article, SearchResult, WikiError};

    struct OneResultApi;

    impl WikiApi for OneResultApi {
        async fn search(&self, query: &str) -> wikiseek_api::Result<Vec<SearchResult>> {
            Ok(vec![SearchResult {
                page_id: 10,
                title: format!("About {query}"),
                snippet: "<b>snippet</b>".into(),
            }])
        }

        async fn categories(&self, _page_id: u64) -> wikiseek_api::Result<Vec<String>> {
            Ok(vec![])
        }

        async fn parse(&self, page_id: u64) -> wikiseek_api::Result<Article> {
            if page_id != 10 {
                return Err(WikiError::Http("unexpected page".into()));
            }
            Ok(Article {
                page_id,
                title: "About rust".into(),
                html: "<p>Article body.</p>".into(),
                external_links: vec!["https://example.com/cited".into()],
            })
        }
    }

    fn controller() -> Controller<OneResultApi> {
        Controller::new(OneResultApi, ApiConfig::default(), StalePolicy::DiscardStale)
    }

    async fn run(input: &str) -> (Controller<OneResultApi>, String) {
        let mut c = controller();
        let renderer = TerminalRenderer::new("https://en.wikipedia.org/");
        let mut out = Vec::new();
        run_session(&mut c, &renderer, input.as_bytes(), &mut out)
            .await
            .expect("session");
        (c, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("  rust lang "), Command::Search("rust lang".into()));
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":quit"), Command::Quit);
        assert_eq!(Command::parse(":back"), Command::Back);
        assert_eq!(Command::parse(":help"), Command::Help);
        assert_eq!(Command::parse(":open 3"), Command::Open(3));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(Command::parse(":open 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":open x"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":open 1 2"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":nope"), Command::Invalid(_)));
    }

    #[tokio::test]
    async fn search_open_and_quit() {
        let (c, out) = run("rust\n:open 1\n:quit\n").await;
        assert_eq!(c.state().phase(), Phase::ArticleShown);
        assert!(out.contains("[1] About rust"));
        assert!(out.contains("- cited <https://example.com/cited>"));
        assert!(out.contains("    Article body."));
    }

    #[tokio::test]
    async fn back_shows_results_again() {
        let (c, _) = run("rust\n:open 1\n:back\n").await;
        assert_eq!(c.state().phase(), Phase::ResultsShown);
    }

    #[tokio::test]
    async fn out_of_range_open_reports() {
        let (c, out) = run("rust\n:open 5\n").await;
        assert!(out.contains("no result number 5"));
        assert_eq!(c.state().phase(), Phase::ResultsShown);
    }

    #[tokio::test]
    async fn eof_ends_session_unfocused() {
        let (c, out) = run("").await;
        assert!(out.contains("NexusBrowser"));
        assert!(!c.state().input_focused);
        assert_eq!(c.state().phase(), Phase::Idle);
    }
}
