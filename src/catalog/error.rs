use reqwest::StatusCode;
use thiserror::Error;

/// Message shown for transport-level failures, regardless of the payload.
pub const GENERIC_FETCH_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Fallback for API-level failures that carry no error string.
pub(crate) const API_FALLBACK_MESSAGE: &str = "Failed to fetch movies";

/// Failures raised by the remote movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a usable response.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The catalog answered outside the 2xx range.
    #[error("catalog returned status {status}")]
    Status { status: StatusCode },
    /// A 2xx response whose body was not the expected JSON shape.
    #[error("catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    /// A 2xx response whose payload declared an error.
    #[error("catalog API error: {message}")]
    Api { message: String },
}

impl CatalogError {
    /// The message the UI shows for this failure.
    ///
    /// Transport errors collapse into one generic line; only API-declared
    /// errors surface their own text. The underlying detail is logged at the
    /// commit site instead.
    pub fn user_message(&self) -> &str {
        match self {
            CatalogError::Http(_) | CatalogError::Status { .. } | CatalogError::Decode(_) => {
                GENERIC_FETCH_MESSAGE
            }
            CatalogError::Api { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_maps_to_generic_message() {
        let err = CatalogError::Status {
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(err.user_message(), GENERIC_FETCH_MESSAGE);
    }

    #[test]
    fn api_error_surfaces_payload_message() {
        let err = CatalogError::Api {
            message: "Invalid API key".into(),
        };
        assert_eq!(err.user_message(), "Invalid API key");
    }
}
