use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::catalog::CatalogSource;
use crate::trending::TrendingStore;

use super::commands::{FetchCommand, FetchResult};
use super::worker;

/// Owns the fetch worker channels and the request-id bookkeeping that
/// defeats the late-response race.
///
/// Each issued request gets the next value of a monotonically increasing
/// counter. The same id is published to a shared cell the fetch threads read,
/// so superseded work can be skipped before it hits the network; whatever
/// does come back is compared against the current id at commit time and
/// discarded when stale.
pub struct SearchRuntime {
    tx: Sender<FetchCommand>,
    rx: Receiver<FetchResult>,
    latest_id: Arc<AtomicU64>,
    next_id: u64,
    current_id: Option<u64>,
    in_flight: bool,
}

impl SearchRuntime {
    pub fn spawn(
        catalog: Arc<dyn CatalogSource + Send + Sync>,
        trending: Arc<dyn TrendingStore>,
    ) -> Self {
        let (tx, rx, latest_id) = worker::spawn(catalog, trending);
        Self {
            tx,
            rx,
            latest_id,
            next_id: 0,
            current_id: None,
            in_flight: false,
        }
    }

    /// Issue exactly one fetch for a settled query.
    pub fn issue_search(&mut self, term: String) {
        self.next_id = self.next_id.saturating_add(1);
        let id = self.next_id;
        self.current_id = Some(id);
        self.in_flight = true;
        self.latest_id.store(id, Ordering::Release);
        let _ = self.tx.send(FetchCommand::Query { id, term });
    }

    /// Only the response belonging to the most recently issued request may
    /// commit state.
    pub(crate) fn matches_latest(&self, result_id: u64) -> bool {
        Some(result_id) == self.current_id
    }

    pub(crate) fn record_completion(&mut self) {
        self.in_flight = false;
    }

    pub fn has_issued_query(&self) -> bool {
        self.current_id.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn try_recv(&mut self) -> Result<FetchResult, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(FetchCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::catalog::{CatalogError, Movie, MovieQuery};
    use crate::trending::DisabledTrendingStore;

    /// Catalog stub that releases responses only when the test says so.
    ///
    /// `started` fires after the worker has committed to fetching a term,
    /// which lets a test hold request A in flight while it issues request B.
    struct GatedCatalog {
        gates: Mutex<Vec<(String, std::sync::mpsc::Receiver<()>)>>,
        started: std::sync::mpsc::Sender<String>,
    }

    impl CatalogSource for GatedCatalog {
        fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
            let text = match query {
                MovieQuery::Discover => String::new(),
                MovieQuery::Title(text) => text.clone(),
            };
            let _ = self.started.send(text.clone());
            let gate = {
                let mut gates = self.gates.lock().unwrap();
                gates
                    .iter()
                    .position(|(term, _)| *term == text)
                    .map(|index| gates.remove(index).1)
            };
            if let Some(gate) = gate {
                let _ = gate.recv_timeout(Duration::from_secs(5));
            }
            Ok(vec![Movie {
                id: 1,
                title: text,
                ..Movie::default()
            }])
        }
    }

    #[test]
    fn stale_response_is_rejected_at_commit_time() {
        let (started_tx, _started_rx) = std::sync::mpsc::channel();
        let catalog = Arc::new(GatedCatalog {
            gates: Mutex::new(Vec::new()),
            started: started_tx,
        });
        let mut runtime =
            SearchRuntime::spawn(catalog, Arc::new(DisabledTrendingStore));

        runtime.issue_search("a".into());
        let first_id = runtime.current_id.expect("issued");
        runtime.issue_search("b".into());
        let second_id = runtime.current_id.expect("issued");

        assert!(!runtime.matches_latest(first_id));
        assert!(runtime.matches_latest(second_id));
        runtime.shutdown();
    }

    #[test]
    fn slow_early_response_loses_to_fast_late_one() {
        let (release_a, gate_a) = std::sync::mpsc::channel();
        let (started_tx, started_rx) = std::sync::mpsc::channel();
        let catalog = Arc::new(GatedCatalog {
            gates: Mutex::new(vec![("a".to_string(), gate_a)]),
            started: started_tx,
        });
        let mut runtime =
            SearchRuntime::spawn(catalog, Arc::new(DisabledTrendingStore));

        runtime.issue_search("a".into());
        // Wait until "a" is past the staleness guard and held at the gate,
        // so issuing "b" cannot cause it to be skipped outright.
        assert_eq!(
            started_rx.recv_timeout(Duration::from_secs(1)).unwrap(),
            "a"
        );
        runtime.issue_search("b".into());

        // "b" resolves first; "a" is released afterwards.
        let fast = runtime.rx.recv_timeout(Duration::from_secs(1)).expect("b");
        release_a.send(()).unwrap();
        let slow = runtime.rx.recv_timeout(Duration::from_secs(1)).expect("a");

        assert!(runtime.matches_latest(fast.id), "latest result commits");
        assert!(!runtime.matches_latest(slow.id), "stale result is dropped");
        assert_eq!(fast.outcome.expect("movies")[0].title, "b");
        runtime.shutdown();
    }
}
