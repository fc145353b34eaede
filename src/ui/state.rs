use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, error};

use crate::catalog::{CatalogSource, Movie};
use crate::search::{FetchResult, QueryDebouncer, SearchRuntime, SearchState};
use crate::trending::{TrendingEntry, TrendingStore, spawn_trending_fetch};
use crate::ui::components::{DEFAULT_HEADERS, SearchInput};
use crate::ui::style::Theme;

/// Default quiescence window between the last keystroke and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

impl Drop for App {
    fn drop(&mut self) {
        self.search.shutdown();
    }
}

/// Owns every piece of interactive state: the query input, the debounce
/// timer, the fetch runtime, and the current [`SearchState`].
pub struct App {
    pub search_input: SearchInput,
    pub table_state: TableState,
    pub theme: Theme,
    pub(crate) input_title: Option<String>,
    pub(crate) headers: Vec<String>,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) state: SearchState,
    pub(crate) trending: Vec<TrendingEntry>,
    trending_rx: Option<Receiver<Vec<TrendingEntry>>>,
    debouncer: QueryDebouncer,
    pub(super) search: SearchRuntime,
}

impl App {
    pub fn new(
        catalog: Arc<dyn CatalogSource + Send + Sync>,
        trending: Arc<dyn TrendingStore>,
    ) -> Self {
        crate::logging::initialize();
        let search = SearchRuntime::spawn(catalog, Arc::clone(&trending));
        let trending_rx = spawn_trending_fetch(trending);
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            search_input: SearchInput::default(),
            table_state,
            theme: Theme::default(),
            input_title: None,
            headers: DEFAULT_HEADERS.iter().map(|s| s.to_string()).collect(),
            throbber_state: ThrobberState::default(),
            state: SearchState::Loading,
            trending: Vec::new(),
            trending_rx: Some(trending_rx),
            debouncer: QueryDebouncer::new(DEFAULT_DEBOUNCE),
            search,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_input_title(&mut self, title: impl Into<String>) {
        self.input_title = Some(title.into());
    }

    pub fn set_headers(&mut self, headers: Vec<String>) {
        if !headers.is_empty() {
            self.headers = headers;
        }
    }

    pub fn set_initial_query(&mut self, query: impl Into<String>) {
        self.search_input = SearchInput::new(query);
    }

    pub fn set_debounce_window(&mut self, window: Duration) {
        self.debouncer = QueryDebouncer::new(window);
    }

    /// Issue the fetch for the initial query. The initial value counts as
    /// already settled, so there is no debounce wait on startup.
    pub(crate) fn hydrate_initial_fetch(&mut self) {
        if !self.search.has_issued_query() {
            self.begin_search(self.search_input.text().to_string());
        }
    }

    /// Record a query edit; the fetch happens once the value settles.
    pub(crate) fn note_query_edit(&mut self, now: Instant) {
        self.debouncer
            .note(self.search_input.text().to_string(), now);
    }

    /// Fire a fetch for any query value that has finished its quiet period.
    pub(crate) fn poll_debounce(&mut self, now: Instant) {
        if let Some(settled) = self.debouncer.poll(now) {
            self.begin_search(settled);
        }
    }

    fn begin_search(&mut self, term: String) {
        self.state = SearchState::Loading;
        self.table_state.select(Some(0));
        self.search.issue_search(term);
    }

    /// Drain any fetch results waiting on the receiver channel.
    pub(crate) fn pump_fetch_results(&mut self) {
        loop {
            match self.search.try_recv() {
                Ok(result) => self.handle_fetch_result(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Commit a fetch result, unless a newer request has superseded it.
    fn handle_fetch_result(&mut self, result: FetchResult) {
        if !self.search.matches_latest(result.id) {
            debug!(id = result.id, "discarding stale fetch result");
            return;
        }

        self.state = match result.outcome {
            Ok(movies) => SearchState::Ready(movies),
            Err(err) => {
                error!(error = %err, "movie fetch failed");
                SearchState::Failed(err.user_message().to_string())
            }
        };
        self.ensure_selection();
        self.search.record_completion();
    }

    /// Accept the one-shot trending delivery, if it has arrived.
    pub(crate) fn pump_trending(&mut self) {
        let Some(rx) = &self.trending_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(entries) => {
                self.trending = entries;
                self.trending_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.trending_rx = None;
            }
        }
    }

    pub(crate) fn filtered_len(&self) -> usize {
        self.state.movies().len()
    }

    pub(crate) fn ensure_selection(&mut self) {
        let len = self.filtered_len();
        if len == 0 {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= len {
                self.table_state.select(Some(len - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub(crate) fn current_selection(&self) -> Option<Movie> {
        let selected = self.table_state.selected()?;
        self.state.movies().get(selected).cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::catalog::{CatalogError, MovieQuery};
    use crate::trending::DisabledTrendingStore;

    pub(crate) struct ScriptedCatalog {
        pub(crate) calls: Mutex<Vec<MovieQuery>>,
    }

    impl CatalogSource for ScriptedCatalog {
        fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
            self.calls.lock().unwrap().push(query.clone());
            match query {
                MovieQuery::Discover => Ok(vec![Movie {
                    id: 1,
                    title: "Popular".into(),
                    ..Movie::default()
                }]),
                MovieQuery::Title(text) if text == "void" => Ok(Vec::new()),
                MovieQuery::Title(text) if text == "broken" => Err(CatalogError::Api {
                    message: "Invalid API key".into(),
                }),
                MovieQuery::Title(text) => Ok(vec![Movie {
                    id: 2,
                    title: text.clone(),
                    ..Movie::default()
                }]),
            }
        }
    }

    pub(crate) fn scripted_app() -> (App, Arc<ScriptedCatalog>) {
        let catalog = Arc::new(ScriptedCatalog {
            calls: Mutex::new(Vec::new()),
        });
        let app = App::new(Arc::clone(&catalog) as _, Arc::new(DisabledTrendingStore));
        (app, catalog)
    }

    pub(crate) fn wait_for_result(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while app.search.is_in_flight() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
            app.pump_fetch_results();
        }
        app.pump_fetch_results();
    }

    #[test]
    fn initial_mount_issues_a_discover_fetch() {
        let (mut app, catalog) = scripted_app();
        app.hydrate_initial_fetch();
        assert_eq!(app.state, SearchState::Loading);

        wait_for_result(&mut app);
        assert_eq!(app.state.movies().len(), 1);
        assert_eq!(
            catalog.calls.lock().unwrap().as_slice(),
            &[MovieQuery::Discover]
        );
    }

    #[test]
    fn char_by_char_typing_issues_one_search() {
        let (mut app, catalog) = scripted_app();
        app.hydrate_initial_fetch();
        wait_for_result(&mut app);

        let start = Instant::now();
        for (i, len) in (1..=6).enumerate() {
            app.set_initial_query(&"batman"[..len]);
            app.note_query_edit(start + Duration::from_millis(i as u64 * 100));
        }
        // Polls inside the window do nothing.
        app.poll_debounce(start + Duration::from_millis(600));
        assert_eq!(catalog.calls.lock().unwrap().len(), 1);

        app.poll_debounce(start + Duration::from_millis(500) + DEFAULT_DEBOUNCE);
        wait_for_result(&mut app);

        let calls = catalog.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], MovieQuery::Title("batman".into()));
        assert_eq!(app.state.movies()[0].title, "batman");
    }

    #[test]
    fn empty_result_is_a_success_without_selection() {
        let (mut app, _catalog) = scripted_app();
        app.set_initial_query("void");
        app.hydrate_initial_fetch();
        wait_for_result(&mut app);

        assert_eq!(app.state, SearchState::Ready(Vec::new()));
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn api_failure_surfaces_the_payload_message() {
        let (mut app, _catalog) = scripted_app();
        app.set_initial_query("broken");
        app.hydrate_initial_fetch();
        wait_for_result(&mut app);

        assert_eq!(app.state, SearchState::Failed("Invalid API key".into()));
        assert!(app.current_selection().is_none());
    }

    #[test]
    fn selection_clamps_to_the_result_list() {
        let (mut app, _catalog) = scripted_app();
        app.hydrate_initial_fetch();
        wait_for_result(&mut app);

        app.table_state.select(Some(10));
        app.ensure_selection();
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.current_selection().map(|m| m.id), Some(1));
    }
}
