use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use super::UrlQuery;
use crate::error::AppError;
use crate::scraper::types::MediaType;
use crate::scraper::Resolver;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub media_type: MediaType,
    pub thumbnail: Option<String>,
    pub caption: String,
    pub author: String,
    pub original_url: String,
}

/// Route: `/api/scrape?url=`
///
/// Same lookup as `/info`, shaped the way oEmbed presents it: one thumbnail
/// plus its kind, and empty strings instead of missing text.
pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<UrlQuery>,
) -> Result<Json<ScrapeResponse>, AppError> {
    let post_url = Resolver::post_url(params.url.as_deref())?;
    let info = state.resolver.resolve(&post_url).await?;
    let media_type = info.media_type();

    Ok(Json(ScrapeResponse {
        media_type,
        thumbnail: info.video_url.or(info.image_url),
        caption: info.caption.unwrap_or_default(),
        author: info.author.unwrap_or_default(),
        original_url: post_url.to_string(),
    }))
}
