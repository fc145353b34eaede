use std::sync::Arc;

use anyhow::{Context, Result};
use reel::{
    CatalogClient, DisabledTrendingStore, HttpTrendingStore, SearchOutcome, SearchUi,
    TrendingStore,
};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive search experience.
pub(crate) struct SearchWorkflow {
    search_ui: SearchUi,
}

impl SearchWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let search_ui = build_search_ui(config)?;
        Ok(Self { search_ui })
    }

    pub(crate) fn run(self) -> Result<SearchOutcome> {
        self.search_ui.run()
    }
}

/// Translate resolved configuration into a configured [`SearchUi`].
fn build_search_ui(config: ResolvedConfig) -> Result<SearchUi> {
    let ResolvedConfig {
        catalog,
        trending,
        input_title,
        initial_query,
        theme,
        debounce,
        headers,
    } = config;

    let catalog = Arc::new(
        CatalogClient::new(catalog).context("failed to construct the catalog client")?,
    );
    let trending: Arc<dyn TrendingStore> = match trending {
        Some(options) => Arc::new(
            HttpTrendingStore::new(options)
                .context("failed to construct the trending client")?,
        ),
        None => Arc::new(DisabledTrendingStore),
    };

    let mut builder = SearchUi::new(catalog, trending).with_debounce_window(debounce);
    if let Some(title) = input_title {
        builder = builder.with_input_title(title);
    }
    if !initial_query.is_empty() {
        builder = builder.with_initial_query(initial_query);
    }
    if let Some(theme) = theme {
        builder = builder.with_theme_name(theme);
    }
    if let Some(headers) = headers {
        builder = builder.with_headers(headers);
    }

    Ok(builder)
}
