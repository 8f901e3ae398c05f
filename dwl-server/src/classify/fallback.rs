use std::sync::Arc;

use super::{Classifier, GeminiConfig, HeuristicClassifier, ImageInput, RandomClassifier, RemoteClassifier};
use shared::models::Classification;

/// Ordered chain of classifiers with an infallible last resort
///
/// Each link is tried in turn; the first success wins. Failures are logged and
/// skipped. Without an image, or when every link fails, [`RandomClassifier`]
/// answers.
#[derive(Clone)]
pub struct FallbackClassifier {
    chain: Vec<Arc<dyn Classifier>>,
    terminal: RandomClassifier,
}

impl FallbackClassifier {
    pub fn new(chain: Vec<Arc<dyn Classifier>>) -> Self {
        Self {
            chain,
            terminal: RandomClassifier,
        }
    }

    /// remote (when an API key is set) -> heuristic -> random
    pub fn standard(gemini: &GeminiConfig) -> Self {
        let mut chain: Vec<Arc<dyn Classifier>> = Vec::new();
        if gemini.is_configured() {
            match RemoteClassifier::new(gemini.clone()) {
                Ok(remote) => chain.push(Arc::new(remote)),
                Err(e) => tracing::warn!(error = %e, "Remote classifier disabled: client setup failed"),
            }
        } else {
            tracing::info!("GEMINI_API_KEY not set, remote classification disabled");
        }
        chain.push(Arc::new(HeuristicClassifier));
        Self::new(chain)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.chain
            .iter()
            .map(|c| c.name())
            .chain(std::iter::once(RandomClassifier::NAME))
            .collect()
    }

    pub async fn classify(&self, image: Option<&ImageInput>) -> Classification {
        if let Some(image) = image {
            for classifier in &self.chain {
                match classifier.classify(image).await {
                    Ok(result) => return result,
                    Err(e) => tracing::warn!(
                        classifier = classifier.name(),
                        error = %e,
                        "Classification unavailable, falling back"
                    ),
                }
            }
        }
        self.terminal.pick()
    }
}
