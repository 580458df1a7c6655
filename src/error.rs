//! Error type shared by the scraper and the HTTP handlers.
//!
//! Every failure is rendered as a JSON `{"error": "..."}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Generic message returned for upstream/internal failures.
const UPSTREAM_MESSAGE: &str = "Unable to fetch data";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required query parameter was absent or empty.
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// Instagram does not know the post, or it has no media of the requested kind.
    #[error("{0}")]
    NotFound(String),

    /// Instagram answered, but not with anything usable.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidUrl(_) | Self::InvalidMediaType(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Upstream(_) | Self::Http(_) => {
                tracing::error!(error = %self, "upstream failure");
                UPSTREAM_MESSAGE.to_string()
            }
            Self::NotFound(_) => {
                tracing::warn!(error = %self, "not found");
                self.to_string()
            }
            _ => {
                tracing::debug!(error = %self, "bad request");
                self.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
