use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use super::UrlQuery;
use crate::error::AppError;
use crate::scraper::Resolver;
use crate::state::AppState;

/// Body of `GET /info`. Absent media is serialized as `null`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub image: Option<String>,
    pub video: Option<String>,
    pub caption: Option<String>,
}

/// Route: `/info?url=`
pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<UrlQuery>,
) -> Result<Json<InfoResponse>, AppError> {
    let post_url = Resolver::post_url(params.url.as_deref())?;
    let info = state.resolver.resolve(&post_url).await?;

    Ok(Json(InfoResponse {
        image: info.image_url,
        video: info.video_url,
        caption: info.caption,
    }))
}
