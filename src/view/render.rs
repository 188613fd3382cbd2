//! Terminal rendering of the view state.

use wikiseek_api::article::read_more_url;

use super::markup::{ExternalHtml, Surface, TextSurface, TrustedMarkup};
use super::state::ViewState;

/// Product banner.
pub const BANNER: &str = "NexusBrowser";

/// Subtitle under the banner.
pub const SUBTITLE: &str = "Search for articles on Wikipedia";

/// Label of the query input.
pub const INPUT_LABEL: &str = "Search Wikipedia";

/// Draws a [`ViewState`] onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    site_root: String,
}

impl TerminalRenderer {
    /// Renderer whose "read more" links point at `site_root`.
    pub fn new(site_root: impl Into<String>) -> Self {
        Self {
            site_root: site_root.into(),
        }
    }

    /// Render to a string.
    pub fn render(&self, state: &ViewState) -> String {
        let mut surface = TextSurface::new();
        self.render_to(state, &mut surface);
        surface.into_string()
    }

    /// Render onto any surface. Snippets and the article body go through
    /// [`Surface::external`]; everything else is chrome.
    pub fn render_to<S: Surface>(&self, state: &ViewState, surface: &mut S) {
        surface.chrome(&TrustedMarkup::new(BANNER));
        surface.chrome(&TrustedMarkup::new(SUBTITLE));
        surface.chrome(&TrustedMarkup::new(""));

        let marker = if state.input_focused { ">" } else { " " };
        surface.chrome(&TrustedMarkup::from_plain(&format!(
            "{marker} {INPUT_LABEL}: {}",
            state.query
        )));

        if state.loading {
            surface.chrome(&TrustedMarkup::new("Loading..."));
            return;
        }

        if let Some(error) = &state.error {
            surface.chrome(&TrustedMarkup::new(format!("[error] {error}")));
        }

        if !state.has_content() {
            return;
        }

        if state.show_results {
            surface.chrome(&TrustedMarkup::new(""));
            for (index, result) in state.results.iter().enumerate() {
                surface.chrome(&TrustedMarkup::from_plain(&format!(
                    "[{}] {}",
                    index + 1,
                    result.title
                )));
                surface.external(ExternalHtml::new(&result.snippet));
                surface.chrome(&TrustedMarkup::new(format!(
                    "    Read more: {}",
                    read_more_url(&self.site_root, result.page_id)
                )));
            }
        }

        surface.chrome(&TrustedMarkup::new(""));
        surface.chrome(&TrustedMarkup::new("── References ──"));
        for reference in &state.references {
            surface.chrome(&TrustedMarkup::from_plain(&format!(
                "- {} <{}>",
                reference.title, reference.url
            )));
        }

        if !state.selected_article.is_empty() {
            surface.chrome(&TrustedMarkup::new(""));
            surface.chrome(&TrustedMarkup::from_plain(&format!(
                "── {} ──",
                state.selected_title
            )));
            surface.external(ExternalHtml::new(&state.selected_article));
        }
    }
}
