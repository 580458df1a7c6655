use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::AppError;
use crate::scraper::types::MediaType;
use crate::scraper::Resolver;
use crate::state::AppState;
use crate::utils::instagram::download_filename;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

fn parse_media_type(raw: Option<&str>) -> Result<MediaType, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("type"))?;
    raw.parse().map_err(AppError::InvalidMediaType)
}

/// Download proxy.
///
/// Route: `/download?url=&type=image|video`
/// Re-resolves the post, picks the URL for the requested kind and streams
/// the upstream bytes back as an attachment.
pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let post_url = Resolver::post_url(params.url.as_deref())?;
    let media_type = parse_media_type(params.media_type.as_deref())?;

    let info = state.resolver.resolve(&post_url).await?;
    let media_url = info
        .url_for(media_type)
        .ok_or_else(|| AppError::NotFound(format!("No {media_type} found for this post")))?;

    let upstream = state.resolver.open_media(media_url).await?;
    let filename = download_filename(&post_url, media_type);

    tracing::info!(
        filename = %filename,
        media_type = %media_type,
        content_length = ?upstream.content_length(),
        "streaming media"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(media_type.content_type()),
    );
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Upstream(format!("invalid filename header: {e}")))?;
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    if let Some(len) = upstream.content_length() {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    let body = Body::from_stream(upstream.bytes_stream());
    Ok((StatusCode::OK, headers, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_is_required() {
        assert!(matches!(
            parse_media_type(None),
            Err(AppError::MissingParameter("type"))
        ));
        assert!(matches!(
            parse_media_type(Some("")),
            Err(AppError::MissingParameter("type"))
        ));
    }

    #[test]
    fn media_type_must_be_known() {
        assert!(matches!(
            parse_media_type(Some("audio")),
            Err(AppError::InvalidMediaType(v)) if v == "audio"
        ));
        assert_eq!(parse_media_type(Some("video")).unwrap(), MediaType::Video);
    }
}
