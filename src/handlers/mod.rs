pub mod download;
pub mod health;
pub mod info;
pub mod scrape;

use serde::Deserialize;

/// Query string shared by the lookup endpoints.
#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}
