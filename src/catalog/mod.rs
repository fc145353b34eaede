//! Client for the remote movie catalog HTTP API.
//!
//! The catalog speaks two read-only query shapes: a popularity-ranked
//! discover feed for the empty query and a text search for everything else.
//! [`CatalogSource`] is the seam the background fetch worker drives; the
//! reqwest-backed [`CatalogClient`] is the production implementation.

mod client;
mod error;
mod movie;

pub use client::{CatalogClient, CatalogOptions, CatalogSource, MovieQuery};
pub use error::{CatalogError, GENERIC_FETCH_MESSAGE};
pub use movie::Movie;
