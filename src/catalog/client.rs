use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Request};
use reqwest::header::ACCEPT;
use tracing::debug;

use super::error::{API_FALLBACK_MESSAGE, CatalogError};
use super::movie::{Movie, MoviePage};

/// Immutable connection settings injected into [`CatalogClient::new`].
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Root of the catalog API, without a trailing slash.
    pub base_url: String,
    /// Bearer credential sent with every request.
    pub api_key: String,
    /// Optional per-request timeout. `None` matches the upstream behavior of
    /// letting a hung request sit until it resolves.
    pub timeout: Option<Duration>,
}

/// The two query shapes the catalog understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// Popularity-ranked feed used when no search text is present.
    Discover,
    /// Free-text title search.
    Title(String),
}

impl MovieQuery {
    /// Derive the query mode from raw input text.
    pub fn from_term(term: &str) -> Self {
        if term.is_empty() {
            MovieQuery::Discover
        } else {
            MovieQuery::Title(term.to_string())
        }
    }
}

/// Seam between the fetch worker and the catalog transport.
pub trait CatalogSource {
    fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError>;
}

/// Blocking HTTP client for the movie catalog.
pub struct CatalogClient {
    client: Client,
    options: CatalogOptions,
}

impl CatalogClient {
    pub fn new(options: CatalogOptions) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, options })
    }

    /// Assemble the GET request for a query without sending it.
    fn build_request(&self, query: &MovieQuery) -> Result<Request, CatalogError> {
        let builder = match query {
            MovieQuery::Discover => self
                .client
                .get(format!("{}/discover/movie", self.options.base_url))
                .query(&[("sort_by", "popularity.desc")]),
            MovieQuery::Title(text) => self
                .client
                .get(format!("{}/search/movie", self.options.base_url))
                .query(&[("query", text.as_str())]),
        };
        let request = builder
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.options.api_key)
            .build()?;
        Ok(request)
    }
}

impl CatalogSource for CatalogClient {
    fn fetch(&self, query: &MovieQuery) -> Result<Vec<Movie>, CatalogError> {
        let request = self.build_request(query)?;
        debug!(url = %request.url(), "fetching movies");
        let response = self.client.execute(request)?;
        ensure_success(response.status())?;
        let body = response.text()?;
        parse_page(&body)
    }
}

/// A non-2xx status is a transport failure before the body is even read.
fn ensure_success(status: StatusCode) -> Result<(), CatalogError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CatalogError::Status { status })
    }
}

/// Decode one page of results, honoring the payload-level error marker.
///
/// A missing `results` field on an otherwise healthy payload counts as an
/// empty page, not an error. An undecodable body is a transport-level
/// failure: only errors the payload itself declares may reach the user.
fn parse_page(body: &str) -> Result<Vec<Movie>, CatalogError> {
    let page: MoviePage = serde_json::from_str(body).map_err(|err| {
        debug!(error = %err, "catalog payload decode failed");
        CatalogError::Decode(err)
    })?;

    if page.response.as_deref() == Some("False") {
        return Err(CatalogError::Api {
            message: page.error.unwrap_or_else(|| API_FALLBACK_MESSAGE.to_string()),
        });
    }

    Ok(page.results.unwrap_or_default())
}
