//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::scraper::Resolver;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// The one resolver (and HTTP client) for the whole process.
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let resolver = Resolver::new(&config)?;

        tracing::info!(
            oembed_endpoint = %config.oembed_endpoint,
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            resolver,
        })
    }
}
