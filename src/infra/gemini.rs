// Responsible for all communication with the Gemini vision API.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use thiserror::Error;

use crate::domain::identify::ImagePayload;
use crate::infra::config;

/// Instruction prompt sent with every identification request. Constrains the
/// model to a single JSON object so the response parser stays simple.
pub const IDENTIFY_PROMPT: &str = "\
You are a plant identification expert. Analyze the photo and identify the plant species. \
Respond with exactly one JSON object and nothing else (no markdown, no commentary), \
with these fields: \
\"name\" (common name), \
\"scientificName\" (Latin binomial), \
\"wateringNeeds\" (one of: low, medium, high), \
\"sunlight\" (one of: low, medium, high), \
\"temperature\" (preferred range formatted as \"<low>-<high>°F\"), \
\"description\" (3-5 sentences about the plant). \
If you cannot identify the plant, make your best guess from what is visible.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("vision model is not configured")]
    NotConfigured,
    #[error("transport error contacting vision model: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("vision model returned no usable content")]
    EmptyResponse,
}

/// Seam between the identification workflow and the concrete vision API, so
/// tests can script responses without network access.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Returns the model's raw text answer for the image.
    async fn analyze_image(&self, image: &ImagePayload) -> Result<String, VisionError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Builds a client from `GEMINI_API_KEY` / `GEMINI_MODEL` /
    /// `GEMINI_TIMEOUT_SECS`. `Ok(None)` when no key is configured.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        match config::gemini_api_key() {
            Some(key) => {
                let timeout = Duration::from_secs(config::gemini_timeout_secs());
                Ok(Some(Self::new(key, config::gemini_model(), timeout)?))
            }
            None => Ok(None),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the API endpoint (used against stub servers).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn extract_text(body: &JsonValue) -> Option<String> {
        let parts = body
            .pointer("/candidates/0/content/parts")?
            .as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    async fn analyze_image(&self, image: &ImagePayload) -> Result<String, VisionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{
                "parts": [
                    { "text": IDENTIFY_PROMPT },
                    { "inline_data": { "mime_type": image.mime_type, "data": image.data } }
                ]
            }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: JsonValue = response.json().await?;

        Self::extract_text(&payload).ok_or(VisionError::EmptyResponse)
    }
}
