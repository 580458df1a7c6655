use std::time::Duration;

use url::Url;

use super::types::{MediaInfo, OEmbedResponse};
use crate::error::AppError;

/// Calls the oEmbed endpoint for an already-cleaned post URL.
///
/// 4xx answers mean Instagram does not know (or will not show) the post;
/// everything else that is not a success is an upstream failure.
pub async fn fetch_oembed(
    client: &reqwest::Client,
    endpoint: &Url,
    post_url: &Url,
    timeout: Duration,
) -> Result<OEmbedResponse, AppError> {
    let resp = client
        .get(endpoint.clone())
        .query(&[("url", post_url.as_str()), ("omitscript", "true")])
        .timeout(timeout)
        .send()
        .await?;

    let status = resp.status();
    tracing::debug!(status = status.as_u16(), url = %post_url, "oembed response");

    if status.is_client_error() {
        return Err(AppError::NotFound(
            "Failed to fetch data from Instagram".to_string(),
        ));
    }
    if !status.is_success() {
        return Err(AppError::Upstream(format!("oEmbed returned {status}")));
    }

    resp.json::<OEmbedResponse>()
        .await
        .map_err(|e| AppError::Upstream(format!("malformed oEmbed response: {e}")))
}

/// Maps oEmbed fields onto [`MediaInfo`].
///
/// oEmbed only exposes a thumbnail; it is treated as a video when its path
/// ends in `.mp4`.
pub fn media_from_oembed(data: OEmbedResponse) -> MediaInfo {
    let thumbnail = non_empty(data.thumbnail_url);
    let (image_url, video_url) = match thumbnail {
        Some(url) if is_video_url(&url) => (None, Some(url)),
        Some(url) => (Some(url), None),
        None => (None, None),
    };

    MediaInfo {
        image_url,
        video_url,
        caption: non_empty(data.title),
        author: non_empty(data.author_name),
    }
}

fn is_video_url(raw: &str) -> bool {
    let path = match Url::parse(raw) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => raw.split('?').next().unwrap_or_default().to_ascii_lowercase(),
    };
    path.ends_with(".mp4")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oembed(thumbnail: Option<&str>, title: Option<&str>) -> OEmbedResponse {
        OEmbedResponse {
            thumbnail_url: thumbnail.map(String::from),
            title: title.map(String::from),
            author_name: Some("cat.account".to_string()),
        }
    }

    #[test]
    fn image_thumbnail_maps_to_image() {
        let info = media_from_oembed(oembed(
            Some("https://scontent.cdninstagram.com/v/t51/abc.jpg?stp=dst-jpg&oh=1"),
            Some("a cat"),
        ));
        assert_eq!(
            info.image_url.as_deref(),
            Some("https://scontent.cdninstagram.com/v/t51/abc.jpg?stp=dst-jpg&oh=1")
        );
        assert!(info.video_url.is_none());
        assert_eq!(info.caption.as_deref(), Some("a cat"));
        assert_eq!(info.author.as_deref(), Some("cat.account"));
    }

    #[test]
    fn mp4_thumbnail_maps_to_video_even_with_query() {
        let info = media_from_oembed(oembed(
            Some("https://scontent.cdninstagram.com/v/t50/clip.MP4?efg=x&oe=2"),
            None,
        ));
        assert!(info.image_url.is_none());
        assert!(info.video_url.is_some());
        assert!(info.caption.is_none());
    }

    #[test]
    fn missing_thumbnail_yields_empty_media() {
        let info = media_from_oembed(oembed(None, Some("")));
        assert!(info.is_empty());
        assert!(info.caption.is_none());
    }

    #[test]
    fn blank_thumbnail_is_ignored() {
        let info = media_from_oembed(oembed(Some("   "), None));
        assert!(info.is_empty());
    }
}
