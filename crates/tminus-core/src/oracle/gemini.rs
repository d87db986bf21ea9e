//! Gemini `generateContent` backend.
//!
//! Classification sends a plain text prompt and expects a bare label back.
//! Image reading sends the picture as base64 inline data and asks for JSON
//! matching a small response schema.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::CategoryOracle;
use crate::error::OracleError;
use crate::event::ExtractedFields;
use crate::storage::OracleConfig;

const EXTRACT_PROMPT: &str = "Read this image and find the event it announces. \
Return the event title, its date as YYYY-MM-DD and its start time as HH:MM (24-hour). \
Leave any field you cannot find as an empty string.";

pub struct GeminiOracle {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiOracle {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build from configuration, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        if !config.enabled {
            return Err(OracleError::Disabled);
        }
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(
            &config.endpoint,
            &config.model,
            &api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// POST a request body and return the concatenated candidate text.
    async fn generate(&self, body: Value) -> Result<String, OracleError> {
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        // Gateways in front of the API answer errors with HTML.
        let text = resp.text().await?;
        let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        if !status.is_success() {
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .or(status.canonical_reason())
                .unwrap_or("unknown error")
                .to_string();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        candidate_text(&payload).ok_or(OracleError::EmptyResponse)
    }
}

fn classify_prompt(title: &str, labels: &[String]) -> String {
    format!(
        "Categorize the following event title into one of these exact categories: {}. \
         Respond with only the single, most appropriate category name. Title: \"{title}\"",
        labels.join(", ")
    )
}

fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

/// Parse the structured reply. Anything that is not the expected object
/// counts as "nothing extracted".
fn parse_extraction(text: &str) -> ExtractedFields {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);
    match serde_json::from_str::<ExtractedFields>(unfenced) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("could not parse image extraction reply: {e}");
            ExtractedFields::default()
        }
    }
}

#[async_trait]
impl CategoryOracle for GeminiOracle {
    async fn classify(&self, title: &str, labels: &[String]) -> Result<String, OracleError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": classify_prompt(title, labels) }] }]
        });
        Ok(self.generate(body).await?.trim().to_string())
    }

    async fn extract_from_image(
        &self,
        bytes: &[u8],
        mime: &str,
    ) -> Result<ExtractedFields, OracleError> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": mime, "data": STANDARD.encode(bytes) } },
                    { "text": EXTRACT_PROMPT }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "date": { "type": "STRING", "description": "YYYY-MM-DD" },
                        "time": { "type": "STRING", "description": "HH:MM, 24-hour" }
                    }
                }
            }
        });
        Ok(parse_extraction(&self.generate(body).await?))
    }
}
