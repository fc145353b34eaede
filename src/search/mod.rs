//! The debounced search pipeline.
//!
//! Keystrokes land in [`QueryDebouncer`]; once a value settles, the UI asks
//! [`SearchRuntime`] to issue a fetch. Fetches run on background threads and
//! report back over a channel tagged with the request id that issued them.
//! Only the response for the most recent id is allowed to touch
//! [`SearchState`] — a late response for a superseded query is discarded at
//! commit time.

mod commands;
mod debounce;
mod runtime;
mod worker;

use crate::catalog::Movie;

pub use debounce::QueryDebouncer;
pub use runtime::SearchRuntime;

pub(crate) use commands::{FetchCommand, FetchResult};

/// What the results pane is currently showing. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// A request for the current query is in flight.
    Loading,
    /// The current query resolved; an empty list is still a success.
    Ready(Vec<Movie>),
    /// The current query failed; holds the user-facing message.
    Failed(String),
}

impl SearchState {
    pub fn movies(&self) -> &[Movie] {
        match self {
            SearchState::Ready(movies) => movies,
            _ => &[],
        }
    }
}
