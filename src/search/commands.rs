use crate::catalog::{CatalogError, Movie};

/// Commands understood by the background fetch dispatcher.
#[derive(Debug)]
pub(crate) enum FetchCommand {
    /// Fetch results for one settled query.
    Query {
        /// Identifier that lets the UI correlate responses with the
        /// originating request.
        id: u64,
        /// Raw query text; empty means discover mode.
        term: String,
    },
    /// Stop the dispatcher thread.
    Shutdown,
}

/// Outcome of one fetch, tagged with the request id that issued it.
#[derive(Debug)]
pub(crate) struct FetchResult {
    pub(crate) id: u64,
    pub(crate) outcome: Result<Vec<Movie>, CatalogError>,
}
