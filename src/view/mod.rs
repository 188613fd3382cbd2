//! The view layer: state reducer, controller, markup boundary and renderer.

pub mod controller;
pub mod markup;
pub mod render;
pub mod state;

pub use controller::{ArticleTicket, Controller, SearchTicket};
pub use markup::{ExternalHtml, Surface, TextSurface, TrustedMarkup};
pub use render::TerminalRenderer;
pub use state::{
    ARTICLE_ERROR_MESSAGE, Event, Phase, RequestId, SEARCH_ERROR_MESSAGE, StalePolicy, ViewState,
};
