//! UI building blocks shared across rendering and state modules.

/// Single-line query input widget.
pub mod input;
/// Results table rendering.
pub mod tables;
/// Trending strip rendering.
pub mod trending;

pub use input::SearchInput;
pub use tables::{DEFAULT_HEADERS, render_movie_table};
pub use trending::render_trending_strip;
