use async_trait::async_trait;
use image::imageops::FilterType;

use super::{Classifier, ClassifyError, DEFAULT_ADVICE, ImageInput, default_score};
use shared::models::{Classification, Contamination};

/// Mean channel value above which an image counts as bright
const BRIGHTNESS_THRESHOLD: f64 = 130.0;
/// Long side / short side above which an image counts as elongated
const ASPECT_THRESHOLD: f64 = 1.8;
/// Images are downsampled to this square before averaging
const SAMPLE_SIDE: u32 = 50;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Brightness / aspect-ratio guess; needs no network
///
/// Undecodable input yields [`UNKNOWN_LABEL`] instead of an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub const NAME: &'static str = "heuristic";

    pub fn label(bytes: &[u8]) -> &'static str {
        let img = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(e) => {
                tracing::debug!(error = %e, "Heuristic classifier could not decode image");
                return UNKNOWN_LABEL;
            }
        };

        let (w, h) = (img.width() as f64, img.height() as f64);
        if w == 0.0 || h == 0.0 {
            return UNKNOWN_LABEL;
        }
        let ratio = (w / h).max(h / w);

        let sample = img
            .resize_exact(SAMPLE_SIDE, SAMPLE_SIDE, FilterType::Triangle)
            .to_rgb8();
        let mut sum = 0u64;
        for p in sample.pixels() {
            sum += p.0.iter().map(|&c| u64::from(c)).sum::<u64>();
        }
        let brightness = sum as f64 / (f64::from(SAMPLE_SIDE * SAMPLE_SIDE) * 3.0);

        if brightness > BRIGHTNESS_THRESHOLD {
            "Plastic (likely)"
        } else if ratio > ASPECT_THRESHOLD {
            "Textile (likely)"
        } else {
            "Paper / Cardboard (likely)"
        }
    }
}

#[async_trait]
impl Classifier for HeuristicClassifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn classify(&self, image: &ImageInput) -> Result<Classification, ClassifyError> {
        Ok(Classification {
            label: Self::label(&image.bytes).to_string(),
            contamination: Contamination::Unknown,
            recyclability_score: default_score(Contamination::Unknown),
            advice: DEFAULT_ADVICE.to_string(),
            source: Self::NAME.to_string(),
        })
    }
}
