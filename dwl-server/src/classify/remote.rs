//! Gemini `generateContent` client

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;

use super::{Classifier, ClassifyError, DEFAULT_ADVICE, ImageInput, default_score};
use shared::models::{Classification, Contamination};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const PROMPT: &str = "You are an assistant that classifies household waste images into a short label \
(one of: 'Plastik PET', 'HDPE', 'PP', 'Kertas', 'Kaca', 'Logam', 'Tekstil', 'Minyak Jelantah', 'Organik', \
'Tidak Dapat Didaur Ulang'). Also estimate contamination level as 'Clean', 'Slightly contaminated', or \
'Contaminated'. Return a single-line comma-separated answer like: LABEL, CONTAMINATION.";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without the `/v1beta` path
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// api_key stays out of logs
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parse a `LABEL, CONTAMINATION[, SCORE]` reply
///
/// Only the first non-empty line counts. A missing contamination becomes
/// `Unknown`; a missing or non-numeric score falls back to the contamination
/// default. `None` when there is no label at all.
pub fn parse_reply(text: &str) -> Option<Classification> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut fields = line.split(',').map(str::trim);

    let label = fields.next()?.trim_matches(|c| c == '\'' || c == '"' || c == '*').trim();
    if label.is_empty() {
        return None;
    }
    let contamination = fields
        .next()
        .map(Contamination::parse_loose)
        .unwrap_or(Contamination::Unknown);
    let score = fields
        .next()
        .and_then(|s| s.trim_end_matches('%').parse::<i32>().ok())
        .map(|s| s.clamp(0, 100))
        .unwrap_or_else(|| default_score(contamination));

    Some(Classification {
        label: label.to_string(),
        contamination,
        recyclability_score: score,
        advice: DEFAULT_ADVICE.to_string(),
        source: RemoteClassifier::NAME.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

/// Classifies through the hosted model; fails on any error
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl RemoteClassifier {
    pub const NAME: &'static str = "gemini";

    pub fn new(config: GeminiConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn classify(&self, image: &ImageInput) -> Result<Classification, ClassifyError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(k) if !k.is_empty() => k,
            _ => return Err(ClassifyError::NotConfigured),
        };

        let body = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    { "inline_data": { "mime_type": image.mime_type, "data": STANDARD.encode(&image.bytes) } }
                ]
            }],
            "generationConfig": { "maxOutputTokens": 150 }
        });

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: GenerateResponse = resp.json().await?;
        let text = reply
            .first_text()
            .ok_or_else(|| ClassifyError::InvalidReply("no text in response".into()))?;

        tracing::debug!(model = %self.config.model, reply = %text, "Model replied");
        parse_reply(text).ok_or_else(|| ClassifyError::InvalidReply(text.to_string()))
    }
}
