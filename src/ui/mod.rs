//! Interactive terminal UI orchestration for `reel`.
//!
//! The [`builder`] module exposes the public-facing [`SearchUi`] builder. The
//! remaining submodules implement the event loop, rendering pipeline, state
//! management, and the reusable widgets/style definitions that power the
//! terminal application.

mod actions;
mod builder;
pub mod components;
mod render;
mod runtime;
mod state;
pub mod style;

use crate::catalog::Movie;

pub use builder::SearchUi;
pub use state::{App, DEFAULT_DEBOUNCE};

/// What the picker session ended with.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// `false` when the user cancelled with Esc.
    pub accepted: bool,
    /// The query text at the moment the session ended.
    pub query: String,
    /// The movie highlighted when Enter was pressed, if any.
    pub selection: Option<Movie>,
}
