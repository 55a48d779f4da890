//! Upload policy for advertisement images and videos.

use serde::{Deserialize, Serialize};

/// Size, count and format limits applied to advertisement media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Maximum size of a single image in bytes.
    #[serde(default = "default_image_max_bytes")]
    pub image_max_bytes: u64,
    /// Maximum size of the video in bytes.
    #[serde(default = "default_video_max_bytes")]
    pub video_max_bytes: u64,
    /// Maximum number of images per advertisement.
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    /// Accepted image MIME types.
    #[serde(default = "default_image_formats")]
    pub image_formats: Vec<String>,
    /// Accepted video MIME types.
    #[serde(default = "default_video_formats")]
    pub video_formats: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            image_max_bytes: default_image_max_bytes(),
            video_max_bytes: default_video_max_bytes(),
            max_images: default_max_images(),
            image_formats: default_image_formats(),
            video_formats: default_video_formats(),
        }
    }
}

fn default_image_max_bytes() -> u64 {
    5_242_880 // 5 MB
}

fn default_video_max_bytes() -> u64 {
    104_857_600 // 100 MB
}

fn default_max_images() -> usize {
    10
}

fn default_image_formats() -> Vec<String> {
    ["image/jpeg", "image/png", "image/webp"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_video_formats() -> Vec<String> {
    ["video/mp4", "video/webm", "video/quicktime"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}
