pub mod media;
pub mod oembed;
pub mod types;

use std::time::Duration;

use url::Url;

use crate::config::Config;
use crate::error::AppError;
use crate::utils::instagram::{clean_post_url, extract_post_id};

use self::media::fetch_media;
use self::oembed::{fetch_oembed, media_from_oembed};
use self::types::MediaInfo;

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns post URLs into [`MediaInfo`] through the oEmbed endpoint.
///
/// Holds the process-wide HTTP client. It is built once at startup and
/// cloned cheaply into every request, so all lookups and media downloads
/// share one connection pool.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl Resolver {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(CHROME_UA)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.oembed_endpoint.clone(),
            timeout: config.upstream_timeout,
        })
    }

    /// Validates and cleans a raw post URL from a query string.
    pub fn post_url(raw: Option<&str>) -> Result<Url, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AppError::MissingParameter("url"))?;
        clean_post_url(raw).ok_or_else(|| AppError::InvalidUrl(raw.to_string()))
    }

    /// Resolves a cleaned post URL.
    ///
    /// A post that exists but exposes no media yields an empty
    /// [`MediaInfo`], not an error.
    pub async fn resolve(&self, post_url: &Url) -> Result<MediaInfo, AppError> {
        let post_id = extract_post_id(post_url.path()).unwrap_or_default();
        tracing::info!(post_id = %post_id, url = %post_url, "resolving post");

        let data = fetch_oembed(&self.client, &self.endpoint, post_url, self.timeout).await?;
        let info = media_from_oembed(data);

        tracing::info!(
            post_id = %post_id,
            media_type = %info.media_type(),
            has_media = !info.is_empty(),
            "resolved post"
        );
        Ok(info)
    }

    pub async fn open_media(&self, media_url: &str) -> Result<reqwest::Response, AppError> {
        fetch_media(&self.client, media_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn resolver_for(server: &MockServer) -> Resolver {
        let endpoint = Url::parse(&format!("{}/oembed/", server.uri())).unwrap();
        Resolver::new(&Config::with_endpoint(endpoint)).unwrap()
    }

    #[test]
    fn post_url_requires_value() {
        assert!(matches!(
            Resolver::post_url(None),
            Err(AppError::MissingParameter("url"))
        ));
        assert!(matches!(
            Resolver::post_url(Some("  ")),
            Err(AppError::MissingParameter("url"))
        ));
        assert!(matches!(
            Resolver::post_url(Some("nope")),
            Err(AppError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn sends_cleaned_url_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed/"))
            .and(query_param("url", "https://www.instagram.com/p/ABC123/"))
            .and(query_param("omitscript", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "thumbnail_url": "https://cdn.example.com/abc.jpg",
                "title": "hello",
                "author_name": "someone"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver_for(&server).await;
        let url = Resolver::post_url(Some("https://www.instagram.com/p/ABC123/?igshid=x")).unwrap();
        let info = resolver.resolve(&url).await.unwrap();

        assert_eq!(info.image_url.as_deref(), Some("https://cdn.example.com/abc.jpg"));
        assert_eq!(info.caption.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn client_error_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server).await;
        let url = Url::parse("https://www.instagram.com/p/GONE/").unwrap();
        assert!(matches!(
            resolver.resolve(&url).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn server_error_maps_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server).await;
        let url = Url::parse("https://www.instagram.com/p/ABC/").unwrap();
        assert!(matches!(
            resolver.resolve(&url).await,
            Err(AppError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server).await;
        let url = Url::parse("https://www.instagram.com/p/ABC/").unwrap();
        assert!(matches!(
            resolver.resolve(&url).await,
            Err(AppError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn media_fetch_rejects_non_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/a.jpg"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let resolver = resolver_for(&server).await;
        let result = resolver
            .open_media(&format!("{}/media/a.jpg", server.uri()))
            .await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }
}
