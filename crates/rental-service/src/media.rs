//! Media validation for advertisement images and videos.
//!
//! Validation is pure: files are checked against the configured policy
//! and assigned fresh storage keys, but nothing is uploaded here.

use std::path::Path;

use bytes::Bytes;
use uuid::Uuid;

use rental_core::config::MediaConfig;
use rental_core::error::DomainError;
use rental_core::result::AppResult;

/// A file part received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, used only for its extension.
    pub file_name: Option<String>,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

/// A validated file waiting to be uploaded under `key`.
#[derive(Debug, Clone)]
pub struct StagedBlob {
    pub key: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Output of a successful validation.
#[derive(Debug, Clone, Default)]
pub struct ValidatedMedia {
    pub images: Vec<StagedBlob>,
    pub video: Option<StagedBlob>,
}

impl ValidatedMedia {
    /// Storage keys of the staged images, in upload order.
    pub fn image_keys(&self) -> Vec<String> {
        self.images.iter().map(|blob| blob.key.clone()).collect()
    }

    /// Every staged blob, images first.
    pub fn blobs(&self) -> impl Iterator<Item = &StagedBlob> {
        self.images.iter().chain(self.video.iter())
    }
}

/// Checks uploaded media against the configured size, count and format limits.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    policy: MediaConfig,
}

impl MediaValidator {
    /// Creates a validator for the given policy.
    pub fn new(policy: MediaConfig) -> Self {
        Self { policy }
    }

    /// Validate new uploads.
    ///
    /// `retained_images` is the number of already stored images the
    /// listing keeps; it counts against the image limit together with the
    /// new uploads. At least one image must remain in total.
    pub fn validate(
        &self,
        images: Vec<UploadedFile>,
        video: Option<UploadedFile>,
        retained_images: usize,
    ) -> AppResult<ValidatedMedia> {
        let total = images.len() + retained_images;
        if total > self.policy.max_images {
            return Err(DomainError::ImageLimitExceeded.into());
        }
        if total == 0 {
            return Err(DomainError::NoImages.into());
        }

        let video = match video {
            Some(file) => {
                if !accepts(&self.policy.video_formats, &file.content_type) {
                    return Err(DomainError::UnsupportedVideoFormat.into());
                }
                if file.bytes.len() as u64 > self.policy.video_max_bytes {
                    return Err(DomainError::OversizedVideo.into());
                }
                Some(stage(file))
            }
            None => None,
        };

        let mut staged = Vec::with_capacity(images.len());
        for file in images {
            if file.bytes.len() as u64 > self.policy.image_max_bytes {
                return Err(DomainError::OversizedImage.into());
            }
            if !accepts(&self.policy.image_formats, &file.content_type) {
                return Err(DomainError::UnsupportedImageFormat.into());
            }
            staged.push(stage(file));
        }

        Ok(ValidatedMedia {
            images: staged,
            video,
        })
    }
}

fn accepts(formats: &[String], content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    formats.iter().any(|f| f.eq_ignore_ascii_case(essence))
}

fn stage(file: UploadedFile) -> StagedBlob {
    StagedBlob {
        key: storage_key(file.file_name.as_deref()),
        content_type: file.content_type,
        bytes: file.bytes,
    }
}

/// `{uuid}{.ext}`, keeping the original extension when it is plain ASCII.
fn storage_key(file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    match ext {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}
