use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::catalog::{CatalogSource, MovieQuery};
use crate::trending::TrendingStore;

use super::commands::{FetchCommand, FetchResult};

/// Launch the background fetch dispatcher and return its channels plus the
/// shared latest-request-id cell.
pub(crate) fn spawn(
    catalog: Arc<dyn CatalogSource + Send + Sync>,
    trending: Arc<dyn TrendingStore>,
) -> (Sender<FetchCommand>, Receiver<FetchResult>, Arc<AtomicU64>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let latest_id = Arc::new(AtomicU64::new(0));
    let thread_latest = Arc::clone(&latest_id);

    thread::spawn(move || dispatcher_loop(catalog, trending, command_rx, result_tx, thread_latest));

    (command_tx, result_rx, latest_id)
}

/// One fetch thread per request, so a slow query can overlap a later fast one.
fn dispatcher_loop(
    catalog: Arc<dyn CatalogSource + Send + Sync>,
    trending: Arc<dyn TrendingStore>,
    command_rx: Receiver<FetchCommand>,
    result_tx: Sender<FetchResult>,
    latest_id: Arc<AtomicU64>,
) {
    while let Ok(command) = command_rx.recv() {
        match command {
            FetchCommand::Query { id, term } => {
                let catalog = Arc::clone(&catalog);
                let trending = Arc::clone(&trending);
                let result_tx = result_tx.clone();
                let latest_id = Arc::clone(&latest_id);
                thread::spawn(move || {
                    run_fetch(&*catalog, &*trending, &result_tx, &latest_id, id, term)
                });
            }
            FetchCommand::Shutdown => break,
        }
    }
}

fn run_fetch(
    catalog: &(dyn CatalogSource + Send + Sync),
    trending: &dyn TrendingStore,
    result_tx: &Sender<FetchResult>,
    latest_id: &AtomicU64,
    id: u64,
    term: String,
) {
    // A newer request has already been issued; skip the HTTP call entirely.
    if latest_id.load(Ordering::Acquire) != id {
        debug!(id, "skipping superseded fetch");
        return;
    }

    let outcome = catalog.fetch(&MovieQuery::from_term(&term));

    if let Ok(movies) = &outcome
        && !term.is_empty()
        && let Some(top) = movies.first()
        && let Err(err) = trending.record_search(&term, top)
    {
        // Analytics are best-effort; the search result is unaffected.
        warn!(error = %err, %term, "failed to record search count");
    }

    let _ = result_tx.send(FetchResult { id, outcome });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::catalog::{CatalogError, Movie};
    use crate::trending::{TrendingEntry, TrendingError};

    struct StubCatalog;

    impl CatalogSource for StubCatalog {
        fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
            match query {
                MovieQuery::Discover => Ok(vec![movie(1, "Popular")]),
                MovieQuery::Title(text) if text == "void" => Ok(Vec::new()),
                MovieQuery::Title(text) if text == "broken" => Err(CatalogError::Api {
                    message: "Invalid API key".into(),
                }),
                MovieQuery::Title(text) => Ok(vec![movie(2, text)]),
            }
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        recorded: Mutex<Vec<(String, i64)>>,
    }

    impl TrendingStore for RecordingStore {
        fn record_search(&self, term: &str, top: &Movie) -> Result<(), TrendingError> {
            self.recorded
                .lock()
                .unwrap()
                .push((term.to_string(), top.id));
            Ok(())
        }

        fn trending(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
            Ok(Vec::new())
        }
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Movie::default()
        }
    }

    fn spawn_with_store() -> (
        Sender<FetchCommand>,
        Receiver<FetchResult>,
        Arc<AtomicU64>,
        Arc<RecordingStore>,
    ) {
        let store = Arc::new(RecordingStore::default());
        let (tx, rx, latest) = spawn(Arc::new(StubCatalog), Arc::clone(&store) as _);
        (tx, rx, latest, store)
    }

    fn issue(tx: &Sender<FetchCommand>, latest: &AtomicU64, id: u64, term: &str) {
        latest.store(id, Ordering::Release);
        tx.send(FetchCommand::Query {
            id,
            term: term.to_string(),
        })
        .expect("send query");
    }

    #[test]
    fn successful_nonempty_search_records_analytics_once() {
        let (tx, rx, latest, store) = spawn_with_store();
        issue(&tx, &latest, 1, "batman");

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("result");
        assert_eq!(result.id, 1);
        assert_eq!(result.outcome.expect("movies").len(), 1);
        assert_eq!(
            store.recorded.lock().unwrap().as_slice(),
            &[("batman".to_string(), 2)]
        );
        tx.send(FetchCommand::Shutdown).unwrap();
    }

    #[test]
    fn discover_mode_never_records_analytics() {
        let (tx, rx, latest, store) = spawn_with_store();
        issue(&tx, &latest, 1, "");

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("result");
        assert!(!result.outcome.expect("movies").is_empty());
        assert!(store.recorded.lock().unwrap().is_empty());
        tx.send(FetchCommand::Shutdown).unwrap();
    }

    #[test]
    fn empty_result_list_never_records_analytics() {
        let (tx, rx, latest, store) = spawn_with_store();
        issue(&tx, &latest, 1, "void");

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("result");
        assert!(result.outcome.expect("movies").is_empty());
        assert!(store.recorded.lock().unwrap().is_empty());
        tx.send(FetchCommand::Shutdown).unwrap();
    }

    #[test]
    fn failed_fetch_reports_error_without_analytics() {
        let (tx, rx, latest, store) = spawn_with_store();
        issue(&tx, &latest, 1, "broken");

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("result");
        let err = result.outcome.expect_err("error");
        assert_eq!(err.user_message(), "Invalid API key");
        assert!(store.recorded.lock().unwrap().is_empty());
        tx.send(FetchCommand::Shutdown).unwrap();
    }

    #[test]
    fn superseded_fetch_is_skipped_before_issuing() {
        let (tx, rx, latest, _store) = spawn_with_store();
        // id 1 is already stale by the time the dispatcher sees it.
        latest.store(2, Ordering::Release);
        tx.send(FetchCommand::Query {
            id: 1,
            term: "batman".to_string(),
        })
        .unwrap();
        issue(&tx, &latest, 2, "aliens");

        let result = rx.recv_timeout(Duration::from_secs(1)).expect("result");
        assert_eq!(result.id, 2);
        assert!(
            rx.recv_timeout(Duration::from_millis(100)).is_err(),
            "stale request must not produce a result"
        );
        tx.send(FetchCommand::Shutdown).unwrap();
    }
}
