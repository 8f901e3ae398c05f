use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

use super::{Classifier, ClassifyError, DEFAULT_ADVICE, ImageInput};
use shared::models::{Classification, Contamination, WASTE_TYPES};

/// Random label, contamination and score; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomClassifier;

impl RandomClassifier {
    pub const NAME: &'static str = "random";

    pub fn pick(&self) -> Classification {
        let mut rng = rand::thread_rng();
        let label = WASTE_TYPES.choose(&mut rng).copied().unwrap_or("Organik");
        let contamination = Contamination::ASSESSED
            .choose(&mut rng)
            .copied()
            .unwrap_or(Contamination::Clean);

        Classification {
            label: label.to_string(),
            contamination,
            recyclability_score: rng.gen_range(40..=98),
            advice: DEFAULT_ADVICE.to_string(),
            source: Self::NAME.to_string(),
        }
    }
}

#[async_trait]
impl Classifier for RandomClassifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn classify(&self, _image: &ImageInput) -> Result<Classification, ClassifyError> {
        Ok(self.pick())
    }
}
