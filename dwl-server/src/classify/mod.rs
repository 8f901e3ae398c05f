//! Waste photo classification
//!
//! A [`Classifier`] turns image bytes into a [`Classification`]. Remote and
//! local strategies are composed by [`FallbackClassifier`], which tries each in
//! order and ends with a random pick, so callers always get a label.

mod fallback;
mod heuristic;
mod random;
mod remote;

pub use fallback::FallbackClassifier;
pub use heuristic::HeuristicClassifier;
pub use random::RandomClassifier;
pub use remote::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiConfig, RemoteClassifier, parse_reply};

use std::path::Path;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::utils::validation::validate_file_name;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Classification, ClassifyRequest, Contamination};

/// Uploaded images above this size are refused
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Cleaning advice attached to every result
pub const DEFAULT_ADVICE: &str = "Bersihkan bagian yang berminyak, lalu keringkan.";

/// Score used when a classifier reports no recyclability score of its own
pub fn default_score(contamination: Contamination) -> i32 {
    match contamination {
        Contamination::Clean => 85,
        Contamination::SlightlyContaminated => 65,
        Contamination::Contaminated => 40,
        Contamination::Unknown => 50,
    }
}

/// A single classification strategy
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short name reported in [`Classification::source`] and in logs
    fn name(&self) -> &'static str;

    async fn classify(&self, image: &ImageInput) -> Result<Classification, ClassifyError>;
}

/// Classifier failure; swallowed by the fallback chain
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected reply: {0}")]
    InvalidReply(String),
}

/// Raw image handed to the classifiers
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// Sniffed from the bytes; `image/jpeg` when unknown
    pub mime_type: &'static str,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>) -> Self {
        let mime_type = image::guess_format(&bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("image/jpeg");
        Self { bytes, mime_type }
    }

    /// Resolve a classify request to image bytes
    ///
    /// `photo_ref` must be a bare file name inside `upload_dir`; `image_base64`
    /// carries the bytes inline. `Ok(None)` when the request names no image.
    pub async fn from_request(req: &ClassifyRequest, upload_dir: &Path) -> AppResult<Option<Self>> {
        let bytes = if let Some(encoded) = req.image_base64.as_deref().filter(|s| !s.is_empty()) {
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid base64 image: {e}")))?
        } else if let Some(photo_ref) = req.photo_ref.as_deref().filter(|s| !s.is_empty()) {
            validate_file_name(photo_ref, "photo_ref")?;
            let path = upload_dir.join(photo_ref);
            match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(AppError::with_message(
                        ErrorCode::ImageNotFound,
                        format!("Image {photo_ref} not found"),
                    )
                    .with_detail("photo_ref", photo_ref));
                }
                Err(e) => {
                    return Err(AppError::internal(format!("Failed to read image {photo_ref}: {e}")));
                }
            }
        } else {
            return Ok(None);
        };

        if bytes.is_empty() {
            return Err(AppError::with_message(ErrorCode::InvalidImageFile, "Image is empty"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::with_message(
                ErrorCode::InvalidImageFile,
                format!("Image too large ({} bytes, max {MAX_IMAGE_BYTES})", bytes.len()),
            ));
        }
        Ok(Some(Self::new(bytes)))
    }
}

#[cfg(test)]
pub(crate) mod test_images {
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    /// Solid-colour PNG of the given size
    pub fn png(width: u32, height: u32, value: u8) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([value, value, value]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }
}
