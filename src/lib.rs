//! Core crate exports for building and running the `reel` terminal movie
//! finder.
//!
//! The root module primarily re-exports types from the catalog, search, and
//! UI subsystems so that embedders can configure the application without
//! digging through the module hierarchy.

pub mod app_dirs;
pub mod catalog;
pub mod logging;
pub mod search;
pub mod trending;
pub mod ui;

pub use catalog::{CatalogClient, CatalogError, CatalogOptions, CatalogSource, Movie, MovieQuery};
pub use search::{QueryDebouncer, SearchState};
pub use trending::{
    DisabledTrendingStore, HttpTrendingStore, TrendingEntry, TrendingOptions, TrendingStore,
};
pub use ui::{App, SearchOutcome, SearchUi};
pub use ui::style::{Theme, default_theme};
