// src/providers/gemini.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::GeminiConfig;
use crate::errors::{GradeError, Result};
use crate::providers::LlmProvider;

/// A provider for Google's Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: &str, schema: &Value) -> Value {
        json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
                "temperature": self.config.temperature
            }
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<(String, u64)> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GradeError::Config("GEMINI_API_KEY (or API_KEY) is not set.".to_string()))?;

        let url = self.endpoint();
        log::info!("📡 Calling Gemini model {}", self.config.model);

        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(prompt, schema))
            .send()
            .await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::info!("📥 Gemini response status: {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(GradeError::ApiError {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let response_json: Value = resp.json().await?;
        let output = candidate_text(&response_json)?;

        Ok((output, latency_ms))
    }
}

/// Pulls the first candidate's text out of a `generateContent` response.
fn candidate_text(response_json: &Value) -> Result<String> {
    if let Some(error) = response_json.get("error") {
        return Err(GradeError::ApiResponse(error.to_string()));
    }

    let output = response_json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| GradeError::UnexpectedResponse(response_json.to_string()))?;

    if output.trim().is_empty() {
        return Err(GradeError::EmptyResponse);
    }

    Ok(output.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_base: "https://example.invalid/".to_string(),
            api_key: api_key.map(str::to_string),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new(Client::new(), config(Some("k")));
        assert_eq!(
            provider.endpoint(),
            "https://example.invalid/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_asks_for_structured_json() {
        let provider = GeminiProvider::new(Client::new(), config(Some("k")));
        let schema = json!({"type": "OBJECT"});
        let body = provider.request_body("grade this", &schema);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "grade this");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        // The base URL is unroutable; reaching the network would surface a Request error instead.
        let provider = GeminiProvider::new(Client::new(), config(None));
        let err = provider
            .generate_structured("prompt", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GradeError::Config(_)));
    }

    #[test]
    fn test_candidate_text_extraction() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "{\"ok\":true}"}]}}]
        });
        assert_eq!(candidate_text(&response).unwrap(), "{\"ok\":true}");
    }

    #[test]
    fn test_candidate_text_errors() {
        let api_error = json!({"error": {"code": 429, "message": "quota"}});
        assert!(matches!(candidate_text(&api_error), Err(GradeError::ApiResponse(_))));

        let no_candidates = json!({"candidates": []});
        assert!(matches!(
            candidate_text(&no_candidates),
            Err(GradeError::UnexpectedResponse(_))
        ));

        let blank = json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]});
        assert!(matches!(candidate_text(&blank), Err(GradeError::EmptyResponse)));
    }
}
