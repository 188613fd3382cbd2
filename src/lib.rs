//! # wikiseek
//!
//! A Wikipedia search front-end: search, drop results by category, open an
//! article preview with its references.
//!
//! The network side lives in [`wikiseek_api`]. This crate holds the view:
//! an immutable [`view::ViewState`] driven by a pure reducer, a
//! [`view::Controller`] that runs requests and applies their outcomes, a
//! trust boundary for API-supplied markup, and a terminal renderer.

pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod view;

pub use config::{AppConfig, ViewConfig};
pub use error::{AppError, Result};
pub use view::{Controller, Phase, StalePolicy, TerminalRenderer, ViewState};
