//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use url::Url;

const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.instagram.com/oembed/";

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Instagram oEmbed endpoint.
    pub oembed_endpoint: Url,

    /// Directory holding `index.html` and the frontend assets.
    pub frontend_dir: PathBuf,

    /// Timeout applied to oEmbed lookups.
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: listen port (default: 3000)
    /// - `HOST`: listen host (default: "0.0.0.0")
    /// - `OEMBED_ENDPOINT`: oEmbed base URL (default: Instagram's public endpoint)
    /// - `FRONTEND_DIR`: static frontend directory (default: "frontend")
    /// - `UPSTREAM_TIMEOUT_SECS`: oEmbed request timeout (default: 15)
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => 3000,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let endpoint_raw = std::env::var("OEMBED_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_OEMBED_ENDPOINT.to_string());
        let oembed_endpoint = Url::parse(&endpoint_raw)
            .with_context(|| format!("OEMBED_ENDPOINT is not a valid URL: {endpoint_raw:?}"))?;

        let frontend_dir = PathBuf::from(
            std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string()),
        );

        let timeout_secs: u64 = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS must be an integer, got {raw:?}"))?,
            Err(_) => 15,
        };

        let bind_addr = format!("{host}:{port}");

        tracing::info!(
            bind_addr = %bind_addr,
            oembed_endpoint = %oembed_endpoint,
            frontend_dir = %frontend_dir.display(),
            upstream_timeout_secs = timeout_secs,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            oembed_endpoint,
            frontend_dir,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Configuration pointing at a mock oEmbed endpoint.
    #[cfg(test)]
    pub fn with_endpoint(oembed_endpoint: Url) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            oembed_endpoint,
            frontend_dir: PathBuf::from("frontend"),
            upstream_timeout: Duration::from_secs(5),
        }
    }
}
