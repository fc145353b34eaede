//! Best-effort search analytics: record popular search terms and serve the
//! trending strip.
//!
//! Nothing in here may disturb the search pipeline. Failures are logged by
//! the caller and otherwise swallowed; an unconfigured store degrades to
//! [`DisabledTrendingStore`], which does nothing at all.

mod http;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::catalog::Movie;

pub use http::{HttpTrendingStore, TrendingOptions};

/// One entry of the trending strip, as stored by the analytics service.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingEntry {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Failures raised by the analytics store.
#[derive(Debug, Error)]
pub enum TrendingError {
    #[error("trending request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("trending store returned status {status}")]
    Status { status: reqwest::StatusCode },
}

/// Write and read side of the search analytics service.
pub trait TrendingStore: Send + Sync {
    /// Increment (or create) the counter document for `term`, denormalizing
    /// the top-ranked result for display.
    fn record_search(&self, term: &str, top_result: &Movie) -> Result<(), TrendingError>;

    /// Top-N search terms by recorded count, descending.
    fn trending(&self) -> Result<Vec<TrendingEntry>, TrendingError>;
}

/// Store used when no analytics endpoint is configured.
pub struct DisabledTrendingStore;

impl TrendingStore for DisabledTrendingStore {
    fn record_search(&self, _term: &str, _top_result: &Movie) -> Result<(), TrendingError> {
        Ok(())
    }

    fn trending(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
        Ok(Vec::new())
    }
}

/// Counter documents are keyed by the normalized form of the search text.
pub(crate) fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Load the trending list once, off the UI thread.
///
/// The sender is dropped after a single message, so the strip can never
/// refresh mid-session. A failed load is logged and delivers nothing; the
/// strip simply stays empty.
pub fn spawn_trending_fetch(store: Arc<dyn TrendingStore>) -> Receiver<Vec<TrendingEntry>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || match store.trending() {
        Ok(entries) => {
            let _ = tx.send(entries);
        }
        Err(err) => warn!(error = %err, "failed to load trending movies"),
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn terms_normalize_to_a_shared_key() {
        assert_eq!(normalize_term("  Batman "), normalize_term("batman"));
        assert_eq!(normalize_term("The MATRIX"), "the matrix");
    }

    #[test]
    fn disabled_store_is_inert() {
        let store = DisabledTrendingStore;
        store
            .record_search("batman", &Movie::default())
            .expect("record is a no-op");
        assert!(store.trending().expect("empty list").is_empty());
    }

    #[test]
    fn startup_fetch_delivers_exactly_once() {
        let rx = spawn_trending_fetch(Arc::new(DisabledTrendingStore));
        let first = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("one delivery");
        assert!(first.is_empty());
        assert!(rx.recv().is_err(), "sender must be gone after one message");
    }
}
