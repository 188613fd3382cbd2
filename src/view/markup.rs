//! Trust boundary between wikiseek's own output and API-supplied HTML.
//!
//! [`TrustedMarkup`] can only be built inside this crate and is written to
//! a [`Surface`] as-is. [`ExternalHtml`] wraps snippets and article bodies
//! from the API; a surface must sanitise it before display.

use scraper::{Html, Node};

/// Elements dropped together with their content before text extraction.
const DROPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "iframe", "svg"];

/// Elements that start a new line in the extracted text.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "tr", "table", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "dd", "dt",
];

/// Text produced by wikiseek itself (banners, labels, list chrome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Chrome text. Plain strings from the API (titles, URLs) pass through
    /// [`strip_control`] first.
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Chrome line built from API-supplied plain text.
    pub(crate) fn from_plain(text: &str) -> Self {
        Self(strip_control(text))
    }

    /// The text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// HTML received from the API. Never written to a surface unsanitised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalHtml<'a>(&'a str);

impl<'a> ExternalHtml<'a> {
    /// Wrap an API-supplied fragment.
    pub fn new(html: &'a str) -> Self {
        Self(html)
    }

    /// The untouched markup.
    pub fn raw(&self) -> &'a str {
        self.0
    }

    /// Readable text: dropped elements removed, entities decoded, block
    /// elements on their own lines, whitespace collapsed.
    ///
    /// A dropped element that is never closed swallows the rest of the
    /// fragment, as it would in a browser.
    pub fn to_plain_text(&self) -> String {
        let cleaned = strip_dropped_elements(self.0);
        let fragment = Html::parse_fragment(&cleaned);

        let mut text = String::with_capacity(cleaned.len());
        for node in fragment.root_element().descendants() {
            match node.value() {
                Node::Text(t) => {
                    let dropped = node.ancestors().any(|ancestor| {
                        ancestor
                            .value()
                            .as_element()
                            .is_some_and(|el| DROPPED_ELEMENTS.iter().any(|d| *d == el.name()))
                    });
                    if !dropped {
                        text.push_str(&t.text);
                    }
                }
                Node::Element(el) if BLOCK_ELEMENTS.iter().any(|b| *b == el.name()) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        normalise_whitespace(&strip_control(&text))
    }
}

/// Output target with separate entry points per trust level.
pub trait Surface {
    /// Write a line of trusted chrome.
    fn chrome(&mut self, markup: &TrustedMarkup);

    /// Write API-supplied markup. Implementations decide how to sanitise it.
    fn external(&mut self, html: ExternalHtml<'_>);
}

/// A [`Surface`] that builds plain terminal text.
#[derive(Debug, Default)]
pub struct TextSurface {
    out: String,
}

impl TextSurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated text.
    pub fn into_string(self) -> String {
        self.out
    }
}

impl Surface for TextSurface {
    fn chrome(&mut self, markup: &TrustedMarkup) {
        self.out.push_str(markup.as_str());
        self.out.push('\n');
    }

    fn external(&mut self, html: ExternalHtml<'_>) {
        let text = html.to_plain_text();
        if text.is_empty() {
            return;
        }
        for line in text.lines() {
            self.out.push_str("    ");
            self.out.push_str(line);
            self.out.push('\n');
        }
    }
}

/// Remove control characters (terminal escapes included), keeping newlines and tabs.
pub fn strip_control(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Remove dropped elements and their content before parsing.
fn strip_dropped_elements(html: &str) -> String {
    DROPPED_ELEMENTS
        .iter()
        .fold(html.to_owned(), |acc, tag| strip_element(&acc, tag))
}

/// Remove all closed instances of one element, case-insensitively,
/// including content. An unclosed instance and everything after it is left
/// for the parser.
fn strip_element(html: &str, tag: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut result = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find(&open) {
        let start = pos + offset;
        let after = start + open.len();

        // `<stylesheet>` is not `<style`.
        let boundary = lower.as_bytes().get(after).copied();
        if !matches!(boundary, None | Some(b' ' | b'>' | b'/' | b'\n' | b'\r' | b'\t')) {
            result.push_str(&html[pos..after]);
            pos = after;
            continue;
        }

        result.push_str(&html[pos..start]);
        match lower[start..].find(&close) {
            Some(end) => pos = start + end + close.len(),
            None => {
                pos = start;
                break;
            }
        }
    }

    result.push_str(&html[pos..]);
    result
}

/// Collapse runs of spaces to one and runs of blank lines to one blank line.
fn normalise_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0;

    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_run += 1;
            if blank_run > 1 || lines.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(collapsed);
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}
