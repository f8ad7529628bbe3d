use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use crate::TARGET_LLM_REQUEST;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The seam between the orchestration core and the generative text API: one
/// free-form prompt in, one free-form completion out. Production uses
/// [`GeminiClient`]; tests substitute scripted fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for Gemini's `generateContent` REST endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to build HTTP client for Gemini")?;
        let endpoint = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, model, api_key
        );
        Ok(GeminiClient { client, endpoint })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(target: TARGET_LLM_REQUEST, "Sending generation request with prompt: {}", prompt);

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .context("Generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(target: TARGET_LLM_REQUEST, "Generation request returned status {}: {}", status, error_text);
            return Err(anyhow!("Generation request returned status {}", status));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to decode generation response body")?;

        let text = body
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Generation response contained no text candidate"))?;

        debug!(target: TARGET_LLM_REQUEST, "Generation response received: {}", text);

        Ok(text.to_string())
    }
}
