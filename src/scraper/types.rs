use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// MIME type sent on proxied downloads.
    pub fn content_type(self) -> &'static str {
        match self {
            MediaType::Image => "image/jpeg",
            MediaType::Video => "video/mp4",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            MediaType::Image => "jpg",
            MediaType::Video => "mp4",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(other.to_string()),
        }
    }
}

/// Best-effort media for a single post. At most one of the URLs is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub caption: Option<String>,
    pub author: Option<String>,
}

impl MediaInfo {
    pub fn url_for(&self, media_type: MediaType) -> Option<&str> {
        match media_type {
            MediaType::Image => self.image_url.as_deref(),
            MediaType::Video => self.video_url.as_deref(),
        }
    }

    pub fn media_type(&self) -> MediaType {
        if self.video_url.is_some() {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_url.is_none() && self.video_url.is_none()
    }
}

/// Subset of the oEmbed response Instagram returns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbedResponse {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
}
