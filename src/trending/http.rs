use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::catalog::Movie;

use super::{TrendingEntry, TrendingError, TrendingStore, normalize_term};

/// Connection settings for the analytics document store.
#[derive(Debug, Clone)]
pub struct TrendingOptions {
    /// Root of the document collection, without a trailing slash.
    pub endpoint: String,
    /// Optional API key sent as `X-Api-Key`.
    pub api_key: Option<String>,
    /// How many entries the trending read returns.
    pub limit: usize,
    /// Image host prefix used to denormalize poster URLs.
    pub image_base_url: String,
}

/// Counter document as the store persists it.
#[derive(Debug, Serialize, Deserialize)]
struct SearchDocument {
    #[serde(rename = "$id", default, skip_serializing)]
    id: String,
    search_term: String,
    count: u64,
    movie_id: i64,
    title: String,
    #[serde(default)]
    poster_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentList<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

/// Analytics store speaking a small document-store REST dialect.
pub struct HttpTrendingStore {
    client: Client,
    options: TrendingOptions,
}

impl HttpTrendingStore {
    pub fn new(options: TrendingOptions) -> Result<Self, TrendingError> {
        let client = Client::builder().build()?;
        Ok(Self { client, options })
    }

    fn documents_url(&self) -> String {
        format!("{}/documents", self.options.endpoint)
    }

    fn request(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, TrendingError> {
        let mut builder = builder;
        if let Some(key) = &self.options.api_key {
            builder = builder.header("X-Api-Key", key);
        }
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrendingError::Status { status });
        }
        Ok(response)
    }

    fn lookup(&self, term: &str) -> Result<Option<SearchDocument>, TrendingError> {
        let response = self.request(
            self.client
                .get(self.documents_url())
                .query(&[("search_term", term)]),
        )?;
        let list: DocumentList<SearchDocument> = response.json()?;
        Ok(list.documents.into_iter().next())
    }

    fn poster_url(&self, movie: &Movie) -> Option<String> {
        movie
            .poster_path
            .as_deref()
            .map(|path| format!("{}{path}", self.options.image_base_url))
    }
}

impl TrendingStore for HttpTrendingStore {
    fn record_search(&self, term: &str, top_result: &Movie) -> Result<(), TrendingError> {
        let term = normalize_term(term);
        match self.lookup(&term)? {
            Some(existing) => {
                debug!(%term, count = existing.count + 1, "incrementing search count");
                self.request(
                    self.client
                        .patch(format!("{}/{}", self.documents_url(), existing.id))
                        .json(&json!({ "count": existing.count + 1 })),
                )?;
            }
            None => {
                debug!(%term, "creating search count document");
                let document = SearchDocument {
                    id: String::new(),
                    search_term: term,
                    count: 1,
                    movie_id: top_result.id,
                    title: top_result.title.clone(),
                    poster_url: self.poster_url(top_result),
                };
                self.request(self.client.post(self.documents_url()).json(&document))?;
            }
        }
        Ok(())
    }

    fn trending(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
        let response = self.request(self.client.get(self.documents_url()).query(&[
            ("order_by", "count.desc".to_string()),
            ("limit", self.options.limit.to_string()),
        ]))?;
        let list: DocumentList<TrendingEntry> = response.json()?;
        Ok(list.documents)
    }
}
