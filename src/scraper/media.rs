use crate::error::AppError;

/// Opens the upstream media URL for streaming.
///
/// The response body is left unread so the caller can forward it chunk by
/// chunk. No timeout is applied beyond the client's connect timeout, since
/// videos can take a while to transfer.
pub async fn fetch_media(
    client: &reqwest::Client,
    media_url: &str,
) -> Result<reqwest::Response, AppError> {
    let resp = client
        .get(media_url)
        .header(reqwest::header::ACCEPT, "*/*")
        .send()
        .await?;

    let status = resp.status();
    tracing::debug!(status = status.as_u16(), content_length = ?resp.content_length(), "media response");

    if !status.is_success() {
        return Err(AppError::Upstream(format!("media fetch returned {status}")));
    }

    Ok(resp)
}
