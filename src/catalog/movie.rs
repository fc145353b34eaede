use serde::{Deserialize, Serialize};

/// A movie record as returned by the catalog.
///
/// Fields are passed through as-is; anything the API adds beyond these is
/// ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl Movie {
    /// Release year, when the catalog supplied a date.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}

/// One page of catalog results, including the payload-level error marker.
#[derive(Debug, Deserialize)]
pub(crate) struct MoviePage {
    #[serde(default)]
    pub(crate) results: Option<Vec<Movie>>,
    #[serde(default, rename = "Response")]
    pub(crate) response: Option<String>,
    #[serde(default, rename = "Error")]
    pub(crate) error: Option<String>,
}
