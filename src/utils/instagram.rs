use url::{ParseError, Url};

use crate::scraper::types::MediaType;

/// Parses a post URL and drops its query string and fragment.
///
/// Share links carry tracking parameters (`igshid`, `utm_source`, ...) that
/// the oEmbed endpoint rejects or ignores. A pasted link without a scheme
/// (`www.instagram.com/p/...`) is read as `https`. Anything else must be an
/// absolute `http`/`https` URL.
pub fn clean_post_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    let mut parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => {
            let parsed = Url::parse(&format!("https://{raw}")).ok()?;
            // a bare word like "nope" is not a host
            if !parsed.host_str()?.contains('.') {
                return None;
            }
            parsed
        }
        Err(_) => return None,
    };
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    parsed.set_query(None);
    parsed.set_fragment(None);
    Some(parsed)
}

/// Extracts the post ID (shortcode) from an Instagram URL path.
///
/// Handles paths like `/p/ABC123/`, `/reel/ABC123/`, `/tv/ABC123/`,
/// `/username/p/ABC123/`, with or without trailing slashes and extra path
/// segments.
pub fn extract_post_id(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    for (i, segment) in segments.iter().enumerate() {
        if matches!(*segment, "p" | "reel" | "tv" | "reels") {
            return segments.get(i + 1).map(|s| s.to_string());
        }
    }

    None
}

/// Attachment filename for a proxied download, e.g. `instagram_ABC123.mp4`.
pub fn download_filename(post_url: &Url, media_type: MediaType) -> String {
    let stem = extract_post_id(post_url.path())
        .filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or_else(|| "media".to_string());
    format!("instagram_{}.{}", stem, media_type.extension())
}
