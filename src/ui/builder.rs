use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::catalog::CatalogSource;
use crate::trending::TrendingStore;

use super::{App, SearchOutcome};

/// A small builder for configuring the interactive movie finder. This
/// presents an fzf-like API for setting the prompt, theme, and table
/// headers before running the interactive picker.
pub struct SearchUi {
    catalog: Arc<dyn CatalogSource + Send + Sync>,
    trending: Arc<dyn TrendingStore>,
    input_title: Option<String>,
    initial_query: Option<String>,
    theme: Option<String>,
    headers: Option<Vec<String>>,
    debounce_window: Option<Duration>,
}

impl SearchUi {
    pub fn new(
        catalog: Arc<dyn CatalogSource + Send + Sync>,
        trending: Arc<dyn TrendingStore>,
    ) -> Self {
        Self {
            catalog,
            trending,
            input_title: None,
            initial_query: None,
            theme: None,
            headers: None,
            debounce_window: None,
        }
    }

    pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
        self.input_title = Some(title.into());
        self
    }

    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = Some(query.into());
        self
    }

    pub fn with_theme_name(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(name.into());
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = Some(window);
        self
    }

    /// Run the interactive finder with the configured options.
    pub fn run(self) -> Result<SearchOutcome> {
        let mut app = App::new(self.catalog, self.trending);
        if let Some(title) = self.input_title {
            app.set_input_title(title);
        }
        if let Some(query) = self.initial_query {
            app.set_initial_query(query);
        }
        if let Some(name) = self.theme
            && let Some(theme) = crate::ui::style::by_name(&name)
        {
            app.set_theme(theme);
        }
        if let Some(headers) = self.headers {
            app.set_headers(headers);
        }
        if let Some(window) = self.debounce_window {
            app.set_debounce_window(window);
        }
        app.run()
    }
}
